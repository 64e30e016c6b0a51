//! Structured logging for pipeline diagnostics.
//!
//! # Responsibilities
//! - Initialize the host-side tracing subscriber
//! - Respect `RUST_LOG` overrides via the environment filter
//!
//! # Design Decisions
//! - Initialization is optional; embedding hosts usually install their
//!   own subscriber and skip this helper

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatting subscriber with an env-filter default.
///
/// Does nothing when a global subscriber is already set, so tests and
/// hosts can call it unconditionally.
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
