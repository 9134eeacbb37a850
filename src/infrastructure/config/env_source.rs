//! Collects raw settings from the process environment and `.env` files.
//!
//! This is the only place the crate reads ambient environment state. The
//! `.env` file is parsed without exporting anything into the process.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::RawSettings;

/// Conventional dotenv file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Error, Debug)]
pub enum EnvSourceError {
    #[error("Env file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read env file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Where raw settings come from.
#[derive(Debug, Clone)]
pub struct EnvSource {
    env_file: Option<PathBuf>,
    explicit_file: bool,
    include_process: bool,
}

impl Default for EnvSource {
    fn default() -> Self {
        Self {
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            explicit_file: false,
            include_process: true,
        }
    }
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` instead of `./.env`; a missing file becomes an error.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self.explicit_file = true;
        self
    }

    /// Skip dotenv files entirely.
    #[must_use]
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self.explicit_file = false;
        self
    }

    /// Skip process environment variables, reading only the env file.
    #[must_use]
    pub const fn without_process_env(mut self) -> Self {
        self.include_process = false;
        self
    }

    /// Gather raw settings. Process variables win over env file entries,
    /// matching dotenv's no-override behaviour.
    pub fn collect(&self) -> Result<RawSettings, EnvSourceError> {
        let mut raw = RawSettings::new();

        if let Some(path) = &self.env_file {
            let loaded = self.read_env_file(path, &mut raw)?;
            debug!(path = %path.display(), entries = loaded, "env file read");
        }

        if self.include_process {
            let mut skipped = 0usize;
            for (name, value) in std::env::vars_os() {
                match (name.into_string(), value.into_string()) {
                    (Ok(name), Ok(value)) => {
                        raw.insert(name, value);
                    }
                    _ => skipped += 1,
                }
            }
            if skipped > 0 {
                warn!(skipped, "ignored environment variables that are not valid UTF-8");
            }
        }

        debug!(settings = raw.len(), "raw settings collected");
        Ok(raw)
    }

    fn read_env_file(&self, path: &Path, raw: &mut RawSettings) -> Result<usize, EnvSourceError> {
        if !path.exists() {
            if self.explicit_file {
                return Err(EnvSourceError::NotFound(path.to_path_buf()));
            }
            return Ok(0);
        }

        let read_error = |source| EnvSourceError::Read {
            path: path.to_path_buf(),
            source,
        };
        let mut loaded = 0;
        for entry in dotenvy::from_path_iter(path).map_err(read_error)? {
            let (name, value) = entry.map_err(read_error)?;
            raw.insert(name, value);
            loaded += 1;
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_env_file_without_exporting() {
        let file = env_file("CHAINCFG_TEST_ONLY_IN_FILE=0xfeed\n# comment\nCHAINCFG_TEST_QUOTED=\"https://x\"\n");

        let raw = EnvSource::new()
            .with_env_file(file.path())
            .without_process_env()
            .collect()
            .unwrap();

        assert_eq!(raw.get("CHAINCFG_TEST_ONLY_IN_FILE"), Some("0xfeed"));
        assert_eq!(raw.get("CHAINCFG_TEST_QUOTED"), Some("https://x"));
        assert!(std::env::var("CHAINCFG_TEST_ONLY_IN_FILE").is_err());
    }

    #[test]
    fn test_process_env_wins_over_file() {
        let file = env_file("CHAINCFG_TEST_PRECEDENCE=from-file\n");

        temp_env::with_var("CHAINCFG_TEST_PRECEDENCE", Some("from-process"), || {
            let raw = EnvSource::new().with_env_file(file.path()).collect().unwrap();
            assert_eq!(raw.get("CHAINCFG_TEST_PRECEDENCE"), Some("from-process"));
        });
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EnvSource::new()
            .with_env_file(dir.path().join("missing.env"))
            .collect();
        assert!(matches!(result, Err(EnvSourceError::NotFound(_))));
    }

    #[test]
    fn test_without_env_file_reads_process_only() {
        temp_env::with_var("CHAINCFG_TEST_PROCESS_ONLY", Some("1"), || {
            let raw = EnvSource::new().without_env_file().collect().unwrap();
            assert_eq!(raw.get("CHAINCFG_TEST_PROCESS_ONLY"), Some("1"));
        });
    }
}
