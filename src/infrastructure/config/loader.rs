use anyhow::{Context, Result};
use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::domain::models::{ConfigSchema, SettingKind, SettingSpec};

/// Default schema file, looked up in the working directory.
pub const DEFAULT_SCHEMA_FILE: &str = "chaincfg.yaml";

/// Local override file, merged over the schema file when present.
pub const LOCAL_SCHEMA_FILE: &str = "chaincfg.local.yaml";

/// Schema error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Setting name cannot be empty")]
    EmptySettingName,

    #[error("Network name cannot be empty")]
    EmptyNetworkName,

    #[error("Duplicate network name: {0}")]
    DuplicateNetwork(String),

    #[error("Account role name cannot be empty")]
    EmptyRoleName,

    #[error("Duplicate account role: {0}")]
    DuplicateRole(String),

    #[error("Setting {name} declared as both {first} and {second}")]
    ConflictingKind {
        name: String,
        first: SettingKind,
        second: SettingKind,
    },

    #[error("Setting {0} declares two different defaults")]
    ConflictingDefault(String),

    #[error("Secret setting {0} cannot declare a default value")]
    SecretDefault(String),

    #[error("Account setting {setting} of network {network} must be a secret")]
    AccountNotSecret { network: String, setting: String },

    #[error("Setting {setting} must be declared as {expected}")]
    WrongKind {
        setting: String,
        expected: SettingKind,
    },

    #[error("Default network cannot be empty")]
    EmptyDefaultNetwork,
}

fn expect_kind(spec: &SettingSpec, expected: SettingKind) -> Result<(), SchemaError> {
    if spec.kind == expected {
        Ok(())
    } else {
        Err(SchemaError::WrongKind {
            setting: spec.name.clone(),
            expected,
        })
    }
}

/// Schema loader with hierarchical merging
pub struct SchemaLoader;

impl SchemaLoader {
    /// Load the schema with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Built-in defaults (Serialized)
    /// 2. `chaincfg.yaml`, or the file given as `path`
    /// 3. `chaincfg.local.yaml` next to it (optional)
    ///
    /// Missing files are skipped, so with no files at all the built-in
    /// schema is returned.
    pub fn load(path: Option<&Path>) -> Result<ConfigSchema> {
        let primary = path.map_or_else(|| PathBuf::from(DEFAULT_SCHEMA_FILE), Path::to_path_buf);
        let local = primary
            .parent()
            .map_or_else(|| PathBuf::from(LOCAL_SCHEMA_FILE), |dir| dir.join(LOCAL_SCHEMA_FILE));

        if path.is_some() && !primary.exists() {
            anyhow::bail!("Schema file not found: {}", primary.display());
        }

        debug!(
            schema = %primary.display(),
            local = %local.display(),
            "loading configuration schema"
        );

        let schema: ConfigSchema = Figment::new()
            .merge(Serialized::defaults(ConfigSchema::default()))
            .merge(Yaml::file(&primary))
            .merge(Yaml::file(&local))
            .extract()
            .context(format!("Failed to load schema from {}", primary.display()))?;

        Self::validate(&schema)?;
        Ok(schema)
    }

    /// Load the schema from a specific file, without local overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<ConfigSchema> {
        let schema: ConfigSchema = Figment::new()
            .merge(Serialized::defaults(ConfigSchema::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load schema from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&schema)?;
        Ok(schema)
    }

    /// Structural checks on the schema itself, independent of raw input
    pub fn validate(schema: &ConfigSchema) -> Result<(), SchemaError> {
        if schema.default_network.trim().is_empty() {
            return Err(SchemaError::EmptyDefaultNetwork);
        }

        let mut kinds: HashMap<&str, SettingKind> = HashMap::new();
        let mut defaults: HashMap<&str, &str> = HashMap::new();
        for spec in schema.setting_specs() {
            if spec.name.trim().is_empty() {
                return Err(SchemaError::EmptySettingName);
            }
            if spec.kind == SettingKind::Secret && spec.default.is_some() {
                return Err(SchemaError::SecretDefault(spec.name.clone()));
            }
            let first = *kinds.entry(spec.name.as_str()).or_insert(spec.kind);
            if first != spec.kind {
                return Err(SchemaError::ConflictingKind {
                    name: spec.name.clone(),
                    first,
                    second: spec.kind,
                });
            }
            if let Some(default) = spec.default.as_deref() {
                let first = *defaults.entry(spec.name.as_str()).or_insert(default);
                if first != default {
                    return Err(SchemaError::ConflictingDefault(spec.name.clone()));
                }
            }
        }

        let mut networks = HashSet::new();
        for network in &schema.networks {
            if network.name.trim().is_empty() {
                return Err(SchemaError::EmptyNetworkName);
            }
            if !networks.insert(network.name.as_str()) {
                return Err(SchemaError::DuplicateNetwork(network.name.clone()));
            }
            if let Some(account) = network.accounts.iter().find(|a| a.kind != SettingKind::Secret) {
                return Err(SchemaError::AccountNotSecret {
                    network: network.name.clone(),
                    setting: account.name.clone(),
                });
            }
            expect_kind(&network.url, SettingKind::String)?;
            expect_kind(&network.chain_id, SettingKind::Number)?;
            expect_kind(&network.block_confirmations, SettingKind::Number)?;
        }

        expect_kind(&schema.gas_reporter.enabled, SettingKind::Bool)?;
        expect_kind(&schema.gas_reporter.no_colors, SettingKind::Bool)?;

        let mut roles = HashSet::new();
        for role in &schema.named_accounts {
            if role.role.trim().is_empty() {
                return Err(SchemaError::EmptyRoleName);
            }
            if !roles.insert(role.role.as_str()) {
                return Err(SchemaError::DuplicateRole(role.role.clone()));
            }
            expect_kind(&role.index, SettingKind::Number)?;
        }

        Ok(())
    }
}
