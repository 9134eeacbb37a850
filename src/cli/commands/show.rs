//! Implementation of the `chaincfg show` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SourceArgs;
use crate::services::ConfigResolver;

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub entries: BTreeMap<String, String>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No matching settings".to_string();
        }
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Key", "Value"]);
        for (key, value) in &self.entries {
            table.add_row(vec![key.as_str(), value.as_str()]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.entries).unwrap_or_default()
    }
}

pub fn execute(sources: &SourceArgs, prefix: Option<&str>, json_mode: bool) -> Result<()> {
    let config = super::resolve_config(sources)?;

    let entries: BTreeMap<String, String> = ConfigResolver::redacted_view(&config)
        .into_iter()
        .filter(|(key, _)| prefix.is_none_or(|p| key.starts_with(p)))
        .collect();
    debug!(entries = entries.len(), "rendering redacted view");

    output(&ShowOutput { entries }, json_mode);
    Ok(())
}
