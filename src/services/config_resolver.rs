//! Schema-driven configuration resolution.
//!
//! A single pass over the schema turns raw settings into a [`ResolvedConfig`]
//! or an aggregated [`ResolutionError`] naming every violation found.

use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{ConfigViolation, ResolutionError, ResolutionResult};
use crate::domain::models::{
    AccountRole, AccountRoleSpec, CompilerSpec, ConfigSchema, EtherscanConfig, GasReporterConfig,
    NetworkProfile, NetworkSpec, RawSettings, ResolvedConfig, SettingKind, SettingSpec,
    SettingValue, BUILTIN_NETWORK, REDACTION_MARKER,
};

/// Outcome of resolving one setting name.
#[derive(Debug, Clone)]
enum Outcome {
    Value(SettingValue),
    Absent,
    Invalid,
}

/// Resolves raw settings against a [`ConfigSchema`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve `raw` against `schema`.
    ///
    /// Pure: reads only its arguments, and identical inputs always produce
    /// identical results. Secret values never reach the log.
    #[instrument(skip_all, fields(raw_settings = raw.len(), networks = schema.networks.len()))]
    pub fn resolve(raw: &RawSettings, schema: &ConfigSchema) -> ResolutionResult<ResolvedConfig> {
        let mut pass = Resolution::new(raw, schema);

        for spec in &schema.settings {
            pass.setting(spec);
        }

        let mut networks = Vec::new();
        let mut disabled_networks = Vec::new();
        for spec in &schema.networks {
            if spec.optional && !pass.is_configured(spec) {
                info!(network = %spec.name, "optional network not configured, skipping");
                disabled_networks.push(spec.name.clone());
                continue;
            }
            if let Some(profile) = pass.network(spec) {
                networks.push(profile);
            }
        }
        pass.check_chain_ids(&networks);

        let gas_reporter = pass.gas_reporter(schema);
        let etherscan = EtherscanConfig {
            api_key: pass.setting(&schema.etherscan.api_key).and_then(SettingValue::into_secret),
        };
        let named_accounts: Vec<AccountRole> = schema
            .named_accounts
            .iter()
            .filter_map(|spec| pass.account_role(spec))
            .collect();

        pass.check_compilers(&schema.compilers);
        pass.check_default_network(&schema.default_network, &networks);

        if !pass.violations.is_empty() {
            warn!(violations = pass.violations.len(), "configuration resolution failed");
            return Err(ResolutionError::new(pass.violations));
        }

        let values: BTreeMap<String, SettingValue> = pass
            .outcomes
            .into_iter()
            .filter_map(|(name, outcome)| match outcome {
                Outcome::Value(value) => Some((name, value)),
                Outcome::Absent | Outcome::Invalid => None,
            })
            .collect();

        info!(
            settings = values.len(),
            networks = networks.len(),
            roles = named_accounts.len(),
            "configuration resolved"
        );

        Ok(ResolvedConfig {
            values,
            default_network: schema.default_network.clone(),
            compilers: schema.compilers.clone(),
            networks,
            disabled_networks,
            named_accounts,
            gas_reporter,
            etherscan,
        })
    }

    /// Log-safe flat view of a resolved config with every secret replaced by
    /// [`REDACTION_MARKER`].
    pub fn redacted_view(config: &ResolvedConfig) -> BTreeMap<String, String> {
        let mut view: BTreeMap<String, String> = config
            .values()
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        view.insert("default_network".to_string(), config.default_network().to_string());

        for (i, compiler) in config.compilers().iter().enumerate() {
            view.insert(format!("compilers.{i}.version"), compiler.version.clone());
            if let Some(optimizer) = compiler.optimizer {
                view.insert(format!("compilers.{i}.optimizer.enabled"), optimizer.enabled.to_string());
                view.insert(format!("compilers.{i}.optimizer.runs"), optimizer.runs.to_string());
            }
        }

        for network in config.networks() {
            let prefix = format!("networks.{}", network.name);
            view.insert(format!("{prefix}.url"), network.url.clone());
            view.insert(format!("{prefix}.chain_id"), network.chain_id.to_string());
            view.insert(
                format!("{prefix}.block_confirmations"),
                network.block_confirmations.to_string(),
            );
            view.insert(
                format!("{prefix}.accounts"),
                vec![REDACTION_MARKER; network.accounts.len()].join(","),
            );
        }

        for role in config.account_roles() {
            view.insert(format!("named_accounts.{}", role.role), role.default_index.to_string());
            for (network, index) in &role.networks {
                view.insert(format!("named_accounts.{}.{network}", role.role), index.to_string());
            }
        }

        let gas = config.gas_reporter();
        view.insert("gas_reporter.enabled".to_string(), gas.enabled.to_string());
        view.insert("gas_reporter.currency".to_string(), gas.currency.clone());
        view.insert("gas_reporter.no_colors".to_string(), gas.no_colors.to_string());
        if let Some(output_file) = &gas.output_file {
            view.insert("gas_reporter.output_file".to_string(), output_file.clone());
        }
        if let Some(token) = &gas.token {
            view.insert("gas_reporter.token".to_string(), token.clone());
        }
        if gas.api_key.is_some() {
            view.insert("gas_reporter.api_key".to_string(), REDACTION_MARKER.to_string());
        }
        if config.etherscan().api_key.is_some() {
            view.insert("etherscan.api_key".to_string(), REDACTION_MARKER.to_string());
        }

        view
    }
}

/// State of one in-flight resolution.
struct Resolution<'a> {
    raw: &'a RawSettings,
    /// Every declaration of a name merged into one
    effective: BTreeMap<&'a str, SettingSpec>,
    outcomes: BTreeMap<String, Outcome>,
    violations: Vec<ConfigViolation>,
}

impl<'a> Resolution<'a> {
    fn new(raw: &'a RawSettings, schema: &'a ConfigSchema) -> Self {
        let mut effective: BTreeMap<&'a str, SettingSpec> = BTreeMap::new();
        for spec in schema.setting_specs() {
            effective
                .entry(spec.name.as_str())
                .and_modify(|merged| merged.merge(spec))
                .or_insert_with(|| spec.clone());
        }

        Self {
            raw,
            effective,
            outcomes: BTreeMap::new(),
            violations: Vec::new(),
        }
    }

    fn report(&mut self, violation: ConfigViolation) {
        if !self.violations.contains(&violation) {
            self.violations.push(violation);
        }
    }

    /// Resolve one setting. A name is resolved once, against the merge of
    /// all its declarations, whichever of them asks first.
    fn setting(&mut self, spec: &SettingSpec) -> Option<SettingValue> {
        let outcome = match self.outcomes.get(&spec.name) {
            Some(outcome) => outcome.clone(),
            None => {
                let merged = self
                    .effective
                    .get(spec.name.as_str())
                    .cloned()
                    .unwrap_or_else(|| spec.clone());
                let outcome = self.evaluate(&merged);
                self.outcomes.insert(spec.name.clone(), outcome.clone());
                outcome
            }
        };
        match outcome {
            Outcome::Value(value) => Some(value),
            Outcome::Absent | Outcome::Invalid => None,
        }
    }

    /// Like [`Self::setting`], but absence is a violation even when the setting spec
    /// itself is optional.
    fn required_setting(&mut self, spec: &SettingSpec) -> Option<SettingValue> {
        let value = self.setting(spec);
        if value.is_none() && matches!(self.outcomes.get(&spec.name), Some(Outcome::Absent)) {
            self.report(ConfigViolation::MissingRequiredSetting(spec.name.clone()));
        }
        value
    }

    fn evaluate(&mut self, spec: &SettingSpec) -> Outcome {
        let raw = self.raw;
        let (raw_value, source) = match raw.get(&spec.name) {
            Some(value) => (value, "raw"),
            None => match spec.default.as_deref() {
                Some(default) => (default, "default"),
                None => {
                    debug!(setting = %spec.name, "setting absent");
                    if spec.required {
                        self.report(ConfigViolation::MissingRequiredSetting(spec.name.clone()));
                    }
                    return Outcome::Absent;
                }
            },
        };

        let Some(value) = spec.kind.coerce(raw_value) else {
            self.report(ConfigViolation::InvalidSettingType {
                name: spec.name.clone(),
                expected: spec.kind,
                got: display_raw(spec.kind, raw_value),
            });
            return Outcome::Invalid;
        };

        let mut valid = true;
        for rule in &spec.rules {
            if !rule.check(&value) {
                valid = false;
                self.report(ConfigViolation::ValidationFailed {
                    name: spec.name.clone(),
                    rule: rule.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if !valid {
            return Outcome::Invalid;
        }

        debug!(setting = %spec.name, kind = %spec.kind, source, "setting resolved");
        Outcome::Value(value)
    }

    fn is_configured(&self, spec: &NetworkSpec) -> bool {
        spec.identifying_settings().any(|s| self.raw.contains(&s.name))
    }

    fn network(&mut self, spec: &NetworkSpec) -> Option<NetworkProfile> {
        let url = self.required_setting(&spec.url).map(|v| v.to_string());

        let mut accounts = Vec::with_capacity(spec.accounts.len());
        for account in &spec.accounts {
            if let Some(secret) = self.setting(account).and_then(SettingValue::into_secret) {
                accounts.push(secret);
            }
        }

        let chain_id = self
            .required_setting(&spec.chain_id)
            .and_then(|v| self.non_negative(&spec.chain_id.name, &v));
        let block_confirmations = self
            .required_setting(&spec.block_confirmations)
            .and_then(|v| self.non_negative(&spec.block_confirmations.name, &v));

        let profile = NetworkProfile {
            name: spec.name.clone(),
            url: url?,
            accounts,
            chain_id: chain_id?,
            block_confirmations: block_confirmations?,
        };
        debug!(
            network = %profile.name,
            chain_id = profile.chain_id,
            accounts = profile.accounts.len(),
            "network profile resolved"
        );
        Some(profile)
    }

    fn non_negative(&mut self, name: &str, value: &SettingValue) -> Option<u64> {
        let number = value.as_number()?;
        match u64::try_from(number) {
            Ok(n) => Some(n),
            Err(_) => {
                self.report(ConfigViolation::ValidationFailed {
                    name: name.to_string(),
                    rule: "non_negative".to_string(),
                    value: number.to_string(),
                });
                None
            }
        }
    }

    fn check_chain_ids(&mut self, networks: &[NetworkProfile]) {
        let mut by_chain: BTreeMap<u64, Vec<String>> = BTreeMap::new();
        for network in networks {
            by_chain.entry(network.chain_id).or_default().push(network.name.clone());
        }
        for (chain_id, profiles) in by_chain {
            if profiles.len() > 1 {
                self.report(ConfigViolation::DuplicateChainId { chain_id, profiles });
            }
        }
    }

    fn gas_reporter(&mut self, schema: &ConfigSchema) -> GasReporterConfig {
        let spec = &schema.gas_reporter;
        let enabled = self.required_setting(&spec.enabled).and_then(|v| v.as_bool());
        let currency = self.required_setting(&spec.currency).map(|v| v.to_string());
        let output_file = self.setting(&spec.output_file).map(|v| v.to_string());
        let token = self.setting(&spec.token).map(|v| v.to_string());
        let no_colors = self.setting(&spec.no_colors).and_then(|v| v.as_bool());
        let api_key = self.setting(&spec.api_key).and_then(SettingValue::into_secret);

        GasReporterConfig {
            enabled: enabled.unwrap_or_default(),
            currency: currency.unwrap_or_default(),
            output_file,
            token,
            no_colors: no_colors.unwrap_or_default(),
            api_key,
        }
    }

    fn account_role(&mut self, spec: &AccountRoleSpec) -> Option<AccountRole> {
        let default_index = self
            .required_setting(&spec.index)
            .and_then(|v| v.as_number())
            .and_then(|index| self.role_index(&spec.role, index));

        let mut networks = BTreeMap::new();
        for (network, &index) in &spec.networks {
            if let Some(index) = self.role_index(&spec.role, index) {
                networks.insert(network.clone(), index);
            }
        }

        Some(AccountRole {
            role: spec.role.clone(),
            default_index: default_index?,
            networks,
        })
    }

    fn role_index(&mut self, role: &str, index: i64) -> Option<usize> {
        if let Ok(index) = usize::try_from(index) {
            return Some(index);
        }
        self.report(ConfigViolation::InvalidAccountRoleIndex {
            role: role.to_string(),
            index,
        });
        None
    }

    fn check_compilers(&mut self, compilers: &[CompilerSpec]) {
        for (i, compiler) in compilers.iter().enumerate() {
            if compiler.version.trim().is_empty() {
                self.report(ConfigViolation::ValidationFailed {
                    name: format!("compilers[{i}].version"),
                    rule: "non_empty".to_string(),
                    value: compiler.version.clone(),
                });
            }
        }
    }

    fn check_default_network(&mut self, default_network: &str, networks: &[NetworkProfile]) {
        if default_network == BUILTIN_NETWORK {
            return;
        }
        let enabled: HashSet<&str> = networks.iter().map(|n| n.name.as_str()).collect();
        if !enabled.contains(default_network) {
            self.report(ConfigViolation::ValidationFailed {
                name: "default_network".to_string(),
                rule: "enabled network".to_string(),
                value: default_network.to_string(),
            });
        }
    }
}

fn display_raw(kind: SettingKind, raw: &str) -> String {
    if kind == SettingKind::Secret {
        REDACTION_MARKER.to_string()
    } else {
        raw.to_string()
    }
}
