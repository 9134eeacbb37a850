mod common;

use chaincfg::{
    AccountRoleSpec, ConfigResolver, ConfigSchema, ConfigViolation, EnvSource, NetworkSpec,
    RawSettings, SchemaLoader, SettingSpec, ValidationRule, REDACTION_MARKER,
};
use common::{goerli_raw, goerli_raw_with, setup_test_logging};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_goerli_example_resolves() {
    setup_test_logging();
    let config = ConfigResolver::resolve(&goerli_raw(), &ConfigSchema::default()).unwrap();

    let goerli = config.network("goerli").expect("goerli profile");
    assert_eq!(goerli.chain_id, 5);
    assert_eq!(goerli.block_confirmations, 6);
    assert_eq!(goerli.accounts[0].expose(), "0xabc");
    assert_eq!(config.account_index("deployer", "goerli"), Some(0));
    assert_eq!(config.account_index("users", "goerli"), Some(1));

    let view = ConfigResolver::redacted_view(&config);
    assert_eq!(view["PRIVATE_KEY"], REDACTION_MARKER);
    assert_eq!(view["GOERLI_RPC_URL"], "https://x");
}

#[test]
fn test_missing_private_key_fails() {
    setup_test_logging();
    let raw: RawSettings = [
        ("GOERLI_RPC_URL", "https://x"),
        ("COINMARKETCAP_API_KEY", "k1"),
        ("ETHERSCAN_API_KEY", "k2"),
    ]
    .into_iter()
    .collect();

    let err = ConfigResolver::resolve(&raw, &ConfigSchema::default()).unwrap_err();
    assert_eq!(
        err.violations(),
        [ConfigViolation::MissingRequiredSetting("PRIVATE_KEY".to_string())]
    );
}

#[test]
fn test_duplicate_chain_id_produces_no_config() {
    let mut schema = ConfigSchema::default();
    schema.networks.push(NetworkSpec {
        name: "goerli-archive".to_string(),
        url: SettingSpec::string("ARCHIVE_RPC_URL")
            .required()
            .with_rule(ValidationRule::Url),
        accounts: vec![SettingSpec::secret("PRIVATE_KEY").required()],
        chain_id: SettingSpec::number("ARCHIVE_CHAIN_ID").with_default("5"),
        block_confirmations: SettingSpec::number("ARCHIVE_CONFIRMATIONS").with_default("1"),
        optional: false,
    });

    let raw = goerli_raw_with("ARCHIVE_RPC_URL", "https://archive");
    let err = ConfigResolver::resolve(&raw, &schema).unwrap_err();
    assert_eq!(
        err.violations(),
        [ConfigViolation::DuplicateChainId {
            chain_id: 5,
            profiles: vec!["goerli".to_string(), "goerli-archive".to_string()],
        }]
    );

    let fixed = goerli_raw_with("ARCHIVE_RPC_URL", "https://archive");
    let mut fixed_schema = schema;
    fixed_schema.networks[1].chain_id = SettingSpec::number("ARCHIVE_CHAIN_ID").with_default("1337");
    let config = ConfigResolver::resolve(&fixed, &fixed_schema).unwrap();
    assert_eq!(config.networks().len(), 2);
}

#[test]
fn test_local_only_project_with_optional_remote() {
    let mut schema = ConfigSchema::default();
    schema.networks[0].optional = true;

    let config = ConfigResolver::resolve(&RawSettings::new(), &schema).unwrap();
    assert!(config.network("goerli").is_none());
    assert_eq!(config.disabled_networks(), ["goerli".to_string()]);
    assert_eq!(config.default_network(), "hardhat");
    assert_eq!(config.account_index("deployer", "hardhat"), Some(0));
}

#[test]
fn test_every_violation_reported_in_one_pass() {
    let mut schema = ConfigSchema::default();
    schema.named_accounts.push(
        AccountRoleSpec::with_default_index("treasury", 2).with_network_index("goerli", -1),
    );

    let mut raw = goerli_raw_with("GOERLI_CHAIN_ID", "goerli");
    raw.insert("REPORT_GAS", "sometimes");
    raw.insert("GOERLI_RPC_URL", "rpc.example");

    let err = ConfigResolver::resolve(&raw, &schema).unwrap_err();
    let subjects: Vec<String> = err.violations().iter().map(ConfigViolation::subject).collect();
    assert_eq!(
        subjects,
        ["GOERLI_RPC_URL", "GOERLI_CHAIN_ID", "REPORT_GAS", "treasury"]
    );
    let message = err.to_string();
    assert!(message.contains("4 violation(s)"));
}

#[test]
fn test_resolve_from_schema_and_env_files() {
    let mut schema_file = NamedTempFile::new().unwrap();
    writeln!(
        schema_file,
        r"default_network: sepolia
networks:
  - name: sepolia
    url:
      name: SEPOLIA_RPC_URL
      required: true
      rules:
        - rule: url
    accounts:
      - name: PRIVATE_KEY
        kind: secret
        required: true
    chain_id:
      name: SEPOLIA_CHAIN_ID
      kind: number
      default: '11155111'
    block_confirmations:
      name: SEPOLIA_CONFIRMATIONS
      kind: number
      default: '2'
"
    )
    .unwrap();
    schema_file.flush().unwrap();

    let mut env_file = NamedTempFile::new().unwrap();
    writeln!(env_file, "SEPOLIA_RPC_URL=https://sepolia.example\nPRIVATE_KEY=0x1234").unwrap();
    env_file.flush().unwrap();

    let schema = SchemaLoader::load_from_file(schema_file.path()).unwrap();
    let raw = EnvSource::new()
        .with_env_file(env_file.path())
        .without_process_env()
        .collect()
        .unwrap();

    let config = ConfigResolver::resolve(&raw, &schema).unwrap();
    let sepolia = config.network("sepolia").unwrap();
    assert_eq!(sepolia.chain_id, 11_155_111);
    assert_eq!(sepolia.block_confirmations, 2);
    assert_eq!(sepolia.url, "https://sepolia.example");
    assert_eq!(config.default_network(), "sepolia");
    assert_eq!(config.gas_reporter().currency, "USD");
}

#[test]
fn test_resolved_config_serializes_redacted() {
    let config = ConfigResolver::resolve(&goerli_raw(), &ConfigSchema::default()).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let debug = format!("{config:?}");

    for secret in ["0xabc", "\"k1\"", "\"k2\""] {
        assert!(!json.contains(secret), "json leaked {secret}");
    }
    assert!(!debug.contains("0xabc"));
    assert!(json.contains(REDACTION_MARKER));
}
