//! Structured-event relay pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────────┐
//!                  │                  EVENT RELAY                      │
//!                  │                                                   │
//!  producer code   │  ┌─────────┐      ┌────────────────────────────┐  │
//!  ────────────────┼─▶│ record  │─────▶│         dispatch           │  │
//!  Record::new()   │  │ builder │      │  ordered handlers +        │  │
//!                  │  └─────────┘      │  level thresholds + bubble │  │
//!                  │                   └──────┬──────────┬──────────┘  │
//!                  │                          │          │             │
//!                  │                          ▼          ▼             │
//!                  │                  ┌──────────┐ ┌───────────────┐   │
//!                  │                  │ console/ │ │ buffered http │   │
//!                  │                  │ archive  │ │ + span sinks  │   │
//!                  │                  └──────────┘ └──────┬────────┘   │
//!                  │                                      │ batch      │
//!                  │                                      ▼            │
//!  collector       │                              ┌──────────────┐     │
//!  ◀───────────────┼──────────────────────────────│  transport   │     │
//!  (fire & forget) │                              │ (bounded)    │     │
//!                  │                              └──────────────┘     │
//!                  │                                                   │
//!                  │  ┌─────────────────────────────────────────────┐  │
//!                  │  │            Cross-Cutting Concerns           │  │
//!                  │  │  ┌────────┐ ┌─────────┐ ┌───────────────┐   │  │
//!                  │  │  │ config │ │lifecycle│ │ observability │   │  │
//!                  │  │  └────────┘ └─────────┘ └───────────────┘   │  │
//!                  │  └─────────────────────────────────────────────┘  │
//!                  └───────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is best effort: batches go out in a single bounded call,
//! failures are counted and forgotten, and the only guaranteed flush
//! points are buffer pressure and graceful shutdown.

// Core pipeline
pub mod dispatch;
pub mod handler;
pub mod record;
pub mod trace;
pub mod transport;

// Producer facades
pub mod monitor;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use dispatch::Dispatcher;
pub use lifecycle::{bootstrap, BootstrapOptions, ExecutionMode, ShutdownGuard};
pub use monitor::{Monitor, Profile};
pub use record::{Level, Record};
