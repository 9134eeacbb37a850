//! Configuration sources
//!
//! - Schema loading with figment (built-in defaults, YAML file, local overrides)
//! - Raw settings from the process environment and `.env` files
//! - Structural schema validation

pub mod env_source;
pub mod loader;

pub use env_source::{EnvSource, EnvSourceError};
pub use loader::{SchemaError, SchemaLoader};
