use serde::{Deserialize, Serialize};

use super::account::AccountRoleSpec;
use super::network::{NetworkSpec, BUILTIN_NETWORK};
use super::setting::SettingSpec;
use super::toolchain::{CompilerSpec, EtherscanSpec, GasReporterSpec};

/// Full set of specs a resolution runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConfigSchema {
    /// Network used when none is selected explicitly
    #[serde(default = "default_network")]
    pub default_network: String,

    #[serde(default = "default_compilers")]
    pub compilers: Vec<CompilerSpec>,

    #[serde(default = "default_networks")]
    pub networks: Vec<NetworkSpec>,

    #[serde(default)]
    pub gas_reporter: GasReporterSpec,

    #[serde(default)]
    pub etherscan: EtherscanSpec,

    #[serde(default = "default_named_accounts")]
    pub named_accounts: Vec<AccountRoleSpec>,

    /// Free-standing settings not tied to any section
    #[serde(default)]
    pub settings: Vec<SettingSpec>,
}

fn default_network() -> String {
    BUILTIN_NETWORK.to_string()
}

fn default_compilers() -> Vec<CompilerSpec> {
    vec![CompilerSpec::new("0.8.8"), CompilerSpec::new("0.6.6")]
}

fn default_networks() -> Vec<NetworkSpec> {
    vec![NetworkSpec::goerli()]
}

fn default_named_accounts() -> Vec<AccountRoleSpec> {
    vec![
        AccountRoleSpec::with_default_index("deployer", 0),
        AccountRoleSpec::with_default_index("users", 1),
    ]
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self {
            default_network: default_network(),
            compilers: default_compilers(),
            networks: default_networks(),
            gas_reporter: GasReporterSpec::default(),
            etherscan: EtherscanSpec::default(),
            named_accounts: default_named_accounts(),
            settings: Vec::new(),
        }
    }
}

impl ConfigSchema {
    /// Every setting spec in resolution order. Names may repeat.
    pub fn setting_specs(&self) -> Vec<&SettingSpec> {
        self.settings
            .iter()
            .chain(self.networks.iter().flat_map(NetworkSpec::settings))
            .chain(self.gas_reporter.settings())
            .chain(std::iter::once(&self.etherscan.api_key))
            .chain(self.named_accounts.iter().map(|role| &role.index))
            .collect()
    }
}
