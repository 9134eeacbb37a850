//! Setting schema entries, raw input and typed values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::secret::{Secret, REDACTION_MARKER};

/// Declared type of a setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    #[default]
    String,
    Number,
    Bool,
    Secret,
}

impl SettingKind {
    /// Coerce a raw string into a value of this kind.
    ///
    /// Returns `None` when the raw value cannot be read as this kind.
    pub fn coerce(self, raw: &str) -> Option<SettingValue> {
        let raw = raw.trim();
        match self {
            Self::String => Some(SettingValue::Text(raw.to_string())),
            Self::Secret => Some(SettingValue::Secret(Secret::new(raw))),
            Self::Number => raw.parse::<i64>().ok().map(SettingValue::Number),
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(SettingValue::Bool(true)),
                "false" | "0" | "no" | "off" => Some(SettingValue::Bool(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Secret => "secret",
        };
        f.write_str(name)
    }
}

/// Validation rule attached to a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// Text must contain something other than whitespace.
    NonEmpty,
    /// Absolute http(s) or ws(s) URL with a host.
    Url,
    /// Hex digits with an optional `0x` prefix.
    Hex,
    /// Inclusive numeric range.
    Range { min: i64, max: i64 },
    /// Text must equal one of the listed values.
    OneOf { values: Vec<String> },
}

const URL_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

impl ValidationRule {
    pub fn check(&self, value: &SettingValue) -> bool {
        match self {
            Self::NonEmpty => match value {
                SettingValue::Text(text) => !text.trim().is_empty(),
                SettingValue::Secret(secret) => !secret.expose().trim().is_empty(),
                SettingValue::Number(_) | SettingValue::Bool(_) => true,
            },
            Self::Url => value.text().is_some_and(is_well_formed_url),
            Self::Hex => value.text().is_some_and(is_hex),
            Self::Range { min, max } => value.as_number().is_some_and(|n| (*min..=*max).contains(&n)),
            Self::OneOf { values } => value
                .text()
                .is_some_and(|text| values.iter().any(|allowed| allowed == text)),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEmpty => f.write_str("non_empty"),
            Self::Url => f.write_str("url"),
            Self::Hex => f.write_str("hex"),
            Self::Range { min, max } => write!(f, "range {min}..={max}"),
            Self::OneOf { values } => write!(f, "one_of [{}]", values.join(", ")),
        }
    }
}

fn is_well_formed_url(text: &str) -> bool {
    url::Url::parse(text)
        .map(|url| URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

fn is_hex(text: &str) -> bool {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Schema entry describing one expected setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingSpec {
    /// Environment variable name
    pub name: String,

    #[serde(default)]
    pub kind: SettingKind,

    #[serde(default)]
    pub required: bool,

    /// Raw fallback, coerced like any raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ValidationRule>,
}

impl SettingSpec {
    pub fn new(name: impl Into<String>, kind: SettingKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
            rules: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SettingKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, SettingKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, SettingKind::Bool)
    }

    pub fn secret(name: impl Into<String>) -> Self {
        Self::new(name, SettingKind::Secret)
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Fold another declaration of the same name into this one.
    ///
    /// The result is required if either is, carries the rules of both, and
    /// keeps the first default declared.
    pub fn merge(&mut self, other: &Self) {
        self.required |= other.required;
        if self.default.is_none() {
            self.default.clone_from(&other.default);
        }
        for rule in &other.rules {
            if !self.rules.contains(rule) {
                self.rules.push(rule.clone());
            }
        }
    }
}

/// A resolved, typed setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Number(i64),
    Bool(bool),
    Secret(Secret),
}

impl SettingValue {
    /// Textual content, including secrets. Never use this for display.
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Secret(secret) => Some(secret.expose()),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_secret(&self) -> Option<&Secret> {
        match self {
            Self::Secret(secret) => Some(secret),
            _ => None,
        }
    }

    /// Converts text or secret values into a [`Secret`].
    pub fn into_secret(self) -> Option<Secret> {
        match self {
            Self::Secret(secret) => Some(secret),
            Self::Text(text) => Some(Secret::new(text)),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::Secret(_))
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Secret(_) => f.write_str(REDACTION_MARKER),
        }
    }
}

/// Unvalidated key/value input, usually sourced from the environment.
///
/// Blank values (empty or whitespace only) read as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    values: BTreeMap<String, String>,
}

impl RawSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a raw value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        raw.extend(iter);
        raw
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RawSettings {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

// Values may hold secrets, so only names are shown.
impl fmt::Debug for RawSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSettings")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(SettingKind::Number.coerce(" 5 "), Some(SettingValue::Number(5)));
        assert_eq!(SettingKind::Number.coerce("-3"), Some(SettingValue::Number(-3)));
        assert_eq!(SettingKind::Number.coerce("five"), None);
        assert_eq!(SettingKind::Number.coerce("5.5"), None);
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(SettingKind::Bool.coerce("TRUE"), Some(SettingValue::Bool(true)));
        assert_eq!(SettingKind::Bool.coerce("0"), Some(SettingValue::Bool(false)));
        assert_eq!(SettingKind::Bool.coerce("maybe"), None);
    }

    #[test]
    fn test_coerce_secret_wraps_value() {
        let value = SettingKind::Secret.coerce("0xabc").unwrap();
        assert!(value.is_secret());
        assert_eq!(value.as_secret().unwrap().expose(), "0xabc");
        assert_eq!(value.to_string(), REDACTION_MARKER);
    }

    #[test]
    fn test_url_rule() {
        let rule = ValidationRule::Url;
        assert!(rule.check(&SettingValue::Text("https://x".to_string())));
        assert!(rule.check(&SettingValue::Text("wss://node.example:8546/ws".to_string())));
        assert!(!rule.check(&SettingValue::Text("not a url".to_string())));
        assert!(!rule.check(&SettingValue::Text("ftp://files.example".to_string())));
        assert!(!rule.check(&SettingValue::Number(5)));
    }

    #[test]
    fn test_hex_rule() {
        let rule = ValidationRule::Hex;
        assert!(rule.check(&SettingValue::Secret(Secret::new("0xabc"))));
        assert!(rule.check(&SettingValue::Text("DEADbeef".to_string())));
        assert!(!rule.check(&SettingValue::Text("0x".to_string())));
        assert!(!rule.check(&SettingValue::Text("0xzz".to_string())));
    }

    #[test]
    fn test_range_and_one_of_rules() {
        let range = ValidationRule::Range { min: 1, max: 10 };
        assert!(range.check(&SettingValue::Number(10)));
        assert!(!range.check(&SettingValue::Number(0)));
        assert!(!range.check(&SettingValue::Text("5".to_string())));

        let one_of = ValidationRule::OneOf {
            values: vec!["USD".to_string(), "EUR".to_string()],
        };
        assert!(one_of.check(&SettingValue::Text("EUR".to_string())));
        assert!(!one_of.check(&SettingValue::Text("usd".to_string())));
        assert_eq!(one_of.to_string(), "one_of [USD, EUR]");
    }

    #[test]
    fn test_non_empty_rule() {
        assert!(!ValidationRule::NonEmpty.check(&SettingValue::Text("  ".to_string())));
        assert!(ValidationRule::NonEmpty.check(&SettingValue::Bool(false)));
    }

    #[test]
    fn test_raw_settings_blank_reads_as_absent() {
        let raw: RawSettings = [("A", "1"), ("B", "   "), ("C", "")].into_iter().collect();
        assert_eq!(raw.get("A"), Some("1"));
        assert!(!raw.contains("B"));
        assert!(!raw.contains("C"));
        assert!(!raw.contains("D"));
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_raw_settings_debug_hides_values() {
        let raw: RawSettings = [("PRIVATE_KEY", "0xsecretvalue")].into_iter().collect();
        let debug = format!("{raw:?}");
        assert!(debug.contains("PRIVATE_KEY"));
        assert!(!debug.contains("0xsecretvalue"));
    }

    #[test]
    fn test_spec_yaml_shape() {
        let yaml = r"
name: GOERLI_CHAIN_ID
kind: number
default: '5'
rules:
  - rule: range
    min: 1
    max: 100
";
        let spec: SettingSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            SettingSpec::number("GOERLI_CHAIN_ID")
                .with_default("5")
                .with_rule(ValidationRule::Range { min: 1, max: 100 })
        );
    }

    #[test]
    fn test_merge_declarations() {
        let mut spec = SettingSpec::secret("PRIVATE_KEY");
        spec.merge(&SettingSpec::secret("PRIVATE_KEY").required().with_rule(ValidationRule::Hex));
        spec.merge(&SettingSpec::secret("PRIVATE_KEY").with_rule(ValidationRule::Hex));

        assert!(spec.required);
        assert_eq!(spec.rules, vec![ValidationRule::Hex]);

        let mut currency = SettingSpec::string("CURRENCY").with_default("USD");
        currency.merge(&SettingSpec::string("CURRENCY").with_default("EUR"));
        assert_eq!(currency.default.as_deref(), Some("USD"));
        assert!(!currency.required);
    }
}
