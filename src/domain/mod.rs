//! Domain layer: settings schema, resolved configuration and violations.
//!
//! Nothing here reads the environment or performs I/O.

pub mod errors;
pub mod models;

pub use errors::{ConfigViolation, ResolutionError, ResolutionResult};
