//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → MiddlemanConfig (validated, immutable)
//!     → handed by value to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the upstream origin never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    ClientConfig, ForwardConfig, ListenerConfig, LogFormat, MiddlemanConfig, ObservabilityConfig,
};
pub use validation::{validate_config, ValidationError};
