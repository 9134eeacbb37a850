// Installs a global subscriber, so this file holds a single test.

use chaincfg::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl, RotationPolicy, LOG_FILE_NAME};
use chaincfg::{ConfigResolver, ConfigSchema, RawSettings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_logging_never_contains_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let config = LogConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        enable_stderr: false,
        rotation: RotationPolicy::Never,
    };

    let logger = LoggerImpl::init(&config).unwrap();

    let raw: RawSettings = [
        ("GOERLI_RPC_URL", "https://x"),
        ("PRIVATE_KEY", "0xc0ffee254729296a45a3885639ac7e10f9d54979"),
        ("ETHERSCAN_API_KEY", "explorer-key-do-not-log"),
    ]
    .into_iter()
    .collect();
    ConfigResolver::resolve(&raw, &ConfigSchema::default()).unwrap();

    let mut broken = raw.clone();
    broken.insert("PRIVATE_KEY", "not-hex-but-secret");
    ConfigResolver::resolve(&broken, &ConfigSchema::default()).unwrap_err();

    // Dropping the logger flushes the non-blocking writer
    drop(logger);

    let contents = fs::read_to_string(temp_dir.path().join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("configuration resolved"));
    assert!(contents.contains("PRIVATE_KEY"));
    assert!(!contents.contains("0xc0ffee254729296a45a3885639ac7e10f9d54979"));
    assert!(!contents.contains("explorer-key-do-not-log"));
    assert!(!contents.contains("not-hex-but-secret"));
}
