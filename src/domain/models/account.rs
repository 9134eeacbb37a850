use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::setting::SettingSpec;

/// Schema for a named account role such as `deployer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AccountRoleSpec {
    pub role: String,

    /// Default account index, overridable from the environment
    pub index: SettingSpec,

    /// Per-network index overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, i64>,
}

impl AccountRoleSpec {
    /// Role whose index comes from `<ROLE>_ACCOUNT_INDEX`, defaulting to `index`.
    pub fn with_default_index(role: impl Into<String>, index: usize) -> Self {
        let role = role.into();
        let env_name = format!("{}_ACCOUNT_INDEX", role.to_ascii_uppercase());
        Self {
            index: SettingSpec::number(env_name).with_default(index.to_string()),
            role,
            networks: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_network_index(mut self, network: impl Into<String>, index: i64) -> Self {
        self.networks.insert(network.into(), index);
        self
    }
}

/// Resolved role-to-account mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRole {
    pub role: String,
    pub default_index: usize,
    pub networks: BTreeMap<String, usize>,
}

impl AccountRole {
    /// Index used on `network`, falling back to the default.
    pub fn index_for(&self, network: &str) -> usize {
        self.networks.get(network).copied().unwrap_or(self.default_index)
    }
}
