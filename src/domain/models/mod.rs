pub mod account;
pub mod config;
pub mod network;
pub mod schema;
pub mod secret;
pub mod setting;
pub mod toolchain;

pub use account::{AccountRole, AccountRoleSpec};
pub use config::ResolvedConfig;
pub use network::{NetworkProfile, NetworkSpec, BUILTIN_NETWORK};
pub use schema::ConfigSchema;
pub use secret::{Secret, REDACTION_MARKER};
pub use setting::{RawSettings, SettingKind, SettingSpec, SettingValue, ValidationRule};
pub use toolchain::{
    CompilerSpec, EtherscanConfig, EtherscanSpec, GasReporterConfig, GasReporterSpec,
    OptimizerSettings,
};
