use serde::Serialize;
use std::collections::BTreeMap;

use super::account::AccountRole;
use super::network::NetworkProfile;
use super::setting::SettingValue;
use super::toolchain::{CompilerSpec, EtherscanConfig, GasReporterConfig};

/// Validated, immutable configuration produced by the resolver.
///
/// Fields are only readable through accessors; there is no way to change a
/// resolved config after construction. Secrets inside serialize and format as
/// the redaction marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub(crate) values: BTreeMap<String, SettingValue>,
    pub(crate) default_network: String,
    pub(crate) compilers: Vec<CompilerSpec>,
    pub(crate) networks: Vec<NetworkProfile>,
    pub(crate) disabled_networks: Vec<String>,
    pub(crate) named_accounts: Vec<AccountRole>,
    pub(crate) gas_reporter: GasReporterConfig,
    pub(crate) etherscan: EtherscanConfig,
}

impl ResolvedConfig {
    /// Resolved value of a setting, if it had one.
    pub fn value(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    /// All resolved setting values keyed by name.
    pub const fn values(&self) -> &BTreeMap<String, SettingValue> {
        &self.values
    }

    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    pub fn compilers(&self) -> &[CompilerSpec] {
        &self.compilers
    }

    /// Enabled network profiles in declaration order.
    pub fn networks(&self) -> &[NetworkProfile] {
        &self.networks
    }

    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.iter().find(|network| network.name == name)
    }

    /// Optional profiles skipped because they were not configured.
    pub fn disabled_networks(&self) -> &[String] {
        &self.disabled_networks
    }

    pub fn account_roles(&self) -> &[AccountRole] {
        &self.named_accounts
    }

    /// Account index assigned to `role` on `network`.
    pub fn account_index(&self, role: &str, network: &str) -> Option<usize> {
        self.named_accounts
            .iter()
            .find(|r| r.role == role)
            .map(|r| r.index_for(network))
    }

    pub const fn gas_reporter(&self) -> &GasReporterConfig {
        &self.gas_reporter
    }

    pub const fn etherscan(&self) -> &EtherscanConfig {
        &self.etherscan
    }
}
