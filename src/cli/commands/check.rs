//! Implementation of the `chaincfg check` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SourceArgs;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub default_network: String,
    pub networks: Vec<String>,
    pub disabled_networks: Vec<String>,
    pub compilers: Vec<String>,
    pub roles: Vec<String>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["Configuration is valid".to_string()];
        lines.push(format!("  default network: {}", self.default_network));
        if !self.networks.is_empty() {
            lines.push(format!("  networks: {}", self.networks.join(", ")));
        }
        if !self.disabled_networks.is_empty() {
            lines.push(format!(
                "  skipped (not configured): {}",
                self.disabled_networks.join(", ")
            ));
        }
        lines.push(format!("  compilers: {}", self.compilers.join(", ")));
        lines.push(format!("  roles: {}", self.roles.join(", ")));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolution failures propagate as errors and are rendered by the caller.
pub fn execute(sources: &SourceArgs, json_mode: bool) -> Result<()> {
    let config = super::resolve_config(sources)?;

    let output_data = CheckOutput {
        valid: true,
        default_network: config.default_network().to_string(),
        networks: config.networks().iter().map(|n| n.name.clone()).collect(),
        disabled_networks: config.disabled_networks().to_vec(),
        compilers: config.compilers().iter().map(|c| c.version.clone()).collect(),
        roles: config
            .account_roles()
            .iter()
            .map(|r| format!("{}={}", r.role, r.default_index))
            .collect(),
    };
    output(&output_data, json_mode);
    Ok(())
}
