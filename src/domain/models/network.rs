use serde::{Deserialize, Serialize};

use super::secret::Secret;
use super::setting::{SettingSpec, ValidationRule};

/// Name of the in-process development network, always available.
pub const BUILTIN_NETWORK: &str = "hardhat";

/// Schema for one named remote network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkSpec {
    /// Network name, e.g. `goerli`
    pub name: String,

    /// RPC endpoint
    pub url: SettingSpec,

    /// Signing keys, in account index order
    #[serde(default)]
    pub accounts: Vec<SettingSpec>,

    pub chain_id: SettingSpec,

    /// Blocks to wait before a deployment counts as final
    pub block_confirmations: SettingSpec,

    /// Skip the profile instead of failing when neither its URL nor any of
    /// its accounts appears in the raw settings.
    #[serde(default)]
    pub optional: bool,
}

impl NetworkSpec {
    /// Goerli testnet profile: `GOERLI_RPC_URL` and `PRIVATE_KEY`, chain id 5,
    /// six confirmations.
    pub fn goerli() -> Self {
        Self {
            name: "goerli".to_string(),
            url: SettingSpec::string("GOERLI_RPC_URL")
                .required()
                .with_rule(ValidationRule::Url),
            accounts: vec![SettingSpec::secret("PRIVATE_KEY")
                .required()
                .with_rule(ValidationRule::Hex)],
            chain_id: SettingSpec::number("GOERLI_CHAIN_ID")
                .with_default("5")
                .with_rule(ValidationRule::Range { min: 1, max: i64::MAX }),
            block_confirmations: SettingSpec::number("GOERLI_BLOCK_CONFIRMATIONS").with_default("6"),
            optional: false,
        }
    }

    /// Every setting this profile reads, in resolution order.
    pub fn settings(&self) -> impl Iterator<Item = &SettingSpec> {
        std::iter::once(&self.url)
            .chain(&self.accounts)
            .chain([&self.chain_id, &self.block_confirmations])
    }

    /// Settings whose presence marks the profile as configured.
    pub fn identifying_settings(&self) -> impl Iterator<Item = &SettingSpec> {
        std::iter::once(&self.url).chain(&self.accounts)
    }
}

/// Validated connection descriptor handed to the network client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub name: String,
    pub url: String,
    pub accounts: Vec<Secret>,
    pub chain_id: u64,
    pub block_confirmations: u64,
}
