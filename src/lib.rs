//! chaincfg - typed configuration for smart-contract toolchains
//!
//! Resolves environment-derived settings (RPC endpoints, signing keys, API
//! keys, compiler versions, gas-reporter options and named account roles)
//! against a schema, producing an immutable, validated configuration or a
//! single error listing every problem found.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Schema types, resolved config, violations
//! - **Service Layer** (`services`): The configuration resolver
//! - **Infrastructure Layer** (`infrastructure`): Schema files, environment, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use chaincfg::{ConfigResolver, ConfigSchema, RawSettings};
//!
//! let raw: RawSettings = [
//!     ("GOERLI_RPC_URL", "https://rpc.example"),
//!     ("PRIVATE_KEY", "0xabc"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = ConfigResolver::resolve(&raw, &ConfigSchema::default()).unwrap();
//! assert_eq!(config.network("goerli").unwrap().chain_id, 5);
//!
//! let view = ConfigResolver::redacted_view(&config);
//! assert_eq!(view["PRIVATE_KEY"], "<redacted>");
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AccountRole, AccountRoleSpec, CompilerSpec, ConfigSchema, NetworkProfile, NetworkSpec,
    RawSettings, ResolvedConfig, Secret, SettingKind, SettingSpec, SettingValue, ValidationRule,
    REDACTION_MARKER,
};
pub use domain::{ConfigViolation, ResolutionError};
pub use infrastructure::config::{EnvSource, SchemaError, SchemaLoader};
pub use services::ConfigResolver;
