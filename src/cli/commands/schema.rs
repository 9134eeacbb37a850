//! Implementation of the `chaincfg schema` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SourceArgs;
use crate::domain::models::ConfigSchema;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SchemaOutput {
    pub schema: ConfigSchema,
}

impl CommandOutput for SchemaOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.schema).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.schema).unwrap_or_default()
    }
}

pub fn execute(sources: &SourceArgs, json_mode: bool) -> Result<()> {
    let schema = super::load_schema(sources)?;
    output(&SchemaOutput { schema }, json_mode);
    Ok(())
}
