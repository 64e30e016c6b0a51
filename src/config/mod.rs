//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → lifecycle::bootstrap builds handlers from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require rebuilding the
//!   dispatcher, not live mutation
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggerConfig, RelayConfig, SinkConfig, TraceFormat};
