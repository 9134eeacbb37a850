//! Infrastructure layer module
//!
//! Everything that touches the outside world:
//! - Schema files (figment + YAML)
//! - Process environment and `.env` files
//! - Logging infrastructure

pub mod config;
pub mod logging;
