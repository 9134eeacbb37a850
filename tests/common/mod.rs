//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use chaincfg::RawSettings;

/// Raw settings for the goerli example project
pub fn goerli_raw() -> RawSettings {
    [
        ("GOERLI_RPC_URL", "https://x"),
        ("PRIVATE_KEY", "0xabc"),
        ("COINMARKETCAP_API_KEY", "k1"),
        ("ETHERSCAN_API_KEY", "k2"),
    ]
    .into_iter()
    .collect()
}

/// Same as [`goerli_raw`] with one entry replaced or added
pub fn goerli_raw_with(name: &str, value: &str) -> RawSettings {
    let mut raw = goerli_raw();
    raw.insert(name, value);
    raw
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
