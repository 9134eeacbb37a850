//! Compiler, gas-reporter and block-explorer sections.

use serde::{Deserialize, Deserializer, Serialize};

use super::secret::Secret;
use super::setting::{SettingSpec, ValidationRule};

/// One compiler the toolchain should install and run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompilerSpec {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerSettings>,
}

impl CompilerSpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            optimizer: None,
        }
    }
}

/// Accepts unquoted YAML versions such as `version: 0.8`, which parse as
/// numbers. Trailing zeros are lost that way (`0.10` reads as `0.1`).
fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Integer(u64),
        Float(f64),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(text) => text,
        Version::Integer(n) => n.to_string(),
        Version::Float(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_optimizer_runs")]
    pub runs: u32,
}

const fn default_optimizer_runs() -> u32 {
    200
}

/// Gas reporter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GasReporterSpec {
    #[serde(default = "default_enabled")]
    pub enabled: SettingSpec,

    #[serde(default = "default_currency")]
    pub currency: SettingSpec,

    #[serde(default = "default_output_file")]
    pub output_file: SettingSpec,

    #[serde(default = "default_token")]
    pub token: SettingSpec,

    #[serde(default = "default_no_colors")]
    pub no_colors: SettingSpec,

    /// Pricing API key, passed through unvalidated
    #[serde(default = "default_pricing_api_key")]
    pub api_key: SettingSpec,
}

fn default_enabled() -> SettingSpec {
    SettingSpec::boolean("REPORT_GAS").with_default("true")
}

fn default_currency() -> SettingSpec {
    SettingSpec::string("GAS_REPORTER_CURRENCY")
        .with_default("USD")
        .with_rule(ValidationRule::NonEmpty)
}

fn default_output_file() -> SettingSpec {
    SettingSpec::string("GAS_REPORTER_OUTPUT_FILE").with_default("gas-report.txt")
}

fn default_token() -> SettingSpec {
    SettingSpec::string("GAS_REPORTER_TOKEN").with_default("ETH")
}

fn default_no_colors() -> SettingSpec {
    SettingSpec::boolean("GAS_REPORTER_NO_COLORS").with_default("true")
}

fn default_pricing_api_key() -> SettingSpec {
    SettingSpec::secret("COINMARKETCAP_API_KEY")
}

impl Default for GasReporterSpec {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            currency: default_currency(),
            output_file: default_output_file(),
            token: default_token(),
            no_colors: default_no_colors(),
            api_key: default_pricing_api_key(),
        }
    }
}

impl GasReporterSpec {
    pub fn settings(&self) -> impl Iterator<Item = &SettingSpec> {
        [
            &self.enabled,
            &self.currency,
            &self.output_file,
            &self.token,
            &self.no_colors,
            &self.api_key,
        ]
        .into_iter()
    }
}

/// Resolved gas reporter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasReporterConfig {
    pub enabled: bool,
    pub currency: String,
    pub output_file: Option<String>,
    pub token: Option<String>,
    pub no_colors: bool,
    pub api_key: Option<Secret>,
}

/// Block-explorer verification schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EtherscanSpec {
    #[serde(default = "default_explorer_api_key")]
    pub api_key: SettingSpec,
}

fn default_explorer_api_key() -> SettingSpec {
    SettingSpec::secret("ETHERSCAN_API_KEY")
}

impl Default for EtherscanSpec {
    fn default() -> Self {
        Self {
            api_key: default_explorer_api_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtherscanConfig {
    pub api_key: Option<Secret>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_version_accepts_unquoted_numbers() {
        let compilers: Vec<CompilerSpec> =
            serde_yaml::from_str("- version: 0.8\n- version: 1\n- version: \"0.8.8\"\n").unwrap();
        let versions: Vec<_> = compilers.iter().map(|c| c.version.as_str()).collect();
        assert_eq!(versions, ["0.8", "1", "0.8.8"]);
    }

    #[test]
    fn test_optimizer_runs_default() {
        let compiler: CompilerSpec =
            serde_yaml::from_str("version: 0.6.6\noptimizer:\n  enabled: true\n").unwrap();
        assert_eq!(
            compiler.optimizer,
            Some(OptimizerSettings {
                enabled: true,
                runs: 200
            })
        );
    }
}
