//! CLI command implementations.

pub mod check;
pub mod schema;
pub mod show;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::types::SourceArgs;
use crate::domain::models::{ConfigSchema, RawSettings, ResolvedConfig};
use crate::infrastructure::config::{EnvSource, SchemaLoader};
use crate::services::ConfigResolver;

/// Load the schema named by `sources`, or the default lookup.
pub fn load_schema(sources: &SourceArgs) -> Result<ConfigSchema> {
    SchemaLoader::load(sources.schema.as_deref())
}

/// Collect raw settings from the environment sources named by `sources`.
pub fn collect_raw(sources: &SourceArgs) -> Result<RawSettings> {
    let source = match (&sources.env_file, sources.no_dotenv) {
        (_, true) => EnvSource::new().without_env_file(),
        (Some(path), false) => EnvSource::new().with_env_file(path),
        (None, false) => EnvSource::new(),
    };
    source.collect().context("Failed to collect raw settings")
}

/// Load, collect and resolve. The resolved config is shared read-only.
pub fn resolve_config(sources: &SourceArgs) -> Result<Arc<ResolvedConfig>> {
    let schema = load_schema(sources)?;
    let raw = collect_raw(sources)?;
    let config = ConfigResolver::resolve(&raw, &schema)?;
    Ok(Arc::new(config))
}
