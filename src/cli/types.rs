//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::logging::{LogConfig, LogFormat, RotationPolicy};

#[derive(Parser, Debug)]
#[command(name = "chaincfg")]
#[command(about = "Resolve and validate smart-contract toolchain configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Where the schema and raw settings are read from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Schema file (defaults to ./chaincfg.yaml when present)
    #[arg(long, global = true, env = "CHAINCFG_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Env file to read settings from (defaults to ./.env when present)
    #[arg(long, global = true, env = "CHAINCFG_ENV_FILE", conflicts_with = "no_dotenv")]
    pub env_file: Option<PathBuf>,

    /// Ignore .env files and read only the process environment
    #[arg(long, global = true)]
    pub no_dotenv: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "CHAINCFG_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format on stderr
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Also write JSON logs to this directory
    #[arg(long, global = true, env = "CHAINCFG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl LoggingArgs {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            log_dir: self.log_dir.clone(),
            enable_stderr: true,
            rotation: RotationPolicy::Daily,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and report every violation
    Check,

    /// Print the resolved configuration with secrets redacted
    Show {
        /// Only show keys starting with this prefix, e.g. `networks.goerli`
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Print the effective schema after merging defaults and files
    Schema,
}
