//! Resolution errors.

use thiserror::Error;

use super::models::SettingKind;

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single problem found while resolving configuration.
///
/// Values carried here are already redacted when they belong to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("Missing required setting: {0}")]
    MissingRequiredSetting(String),

    #[error("Invalid type for {name}: expected {expected}, got {got:?}")]
    InvalidSettingType {
        name: String,
        expected: SettingKind,
        got: String,
    },

    #[error("Validation failed for {name}: rule {rule} rejected {value:?}")]
    ValidationFailed {
        name: String,
        rule: String,
        value: String,
    },

    #[error("Duplicate chain id {chain_id} across networks: {}", .profiles.join(", "))]
    DuplicateChainId { chain_id: u64, profiles: Vec<String> },

    #[error("Invalid account index {index} for role {role}")]
    InvalidAccountRoleIndex { role: String, index: i64 },
}

impl ConfigViolation {
    /// Name of the setting, network group or role the violation is about.
    pub fn subject(&self) -> String {
        match self {
            Self::MissingRequiredSetting(name)
            | Self::InvalidSettingType { name, .. }
            | Self::ValidationFailed { name, .. } => name.clone(),
            Self::DuplicateChainId { profiles, .. } => profiles.join(","),
            Self::InvalidAccountRoleIndex { role, .. } => role.clone(),
        }
    }
}

/// Every violation found in one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Configuration resolution failed with {} violation(s):\n{}",
    .violations.len(),
    format_violations(.violations)
)]
pub struct ResolutionError {
    violations: Vec<ConfigViolation>,
}

impl ResolutionError {
    pub(crate) const fn new(violations: Vec<ConfigViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[ConfigViolation] {
        &self.violations
    }
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;
