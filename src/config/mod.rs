//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (PORT / LOG_LEVEL overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the service runs with no file at all
//! - Malformed environment values are errors, not silently ignored
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_with, ConfigError};
pub use schema::{ListenerConfig, LoggingConfig, ServiceConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
