use serde::{Serialize, Serializer};
use std::fmt;

/// Marker rendered in place of any secret value.
pub const REDACTION_MARKER: &str = "<redacted>";

/// Opaque wrapper for secret-typed setting values (signing keys, API keys).
///
/// `Debug`, `Display` and `Serialize` all render [`REDACTION_MARKER`]; the
/// plaintext is only reachable through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Plaintext value, for handing to the collaborator that needs it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTION_MARKER)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTION_MARKER)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = Secret::new("0xdeadbeef");
        assert_eq!(format!("{secret:?}"), REDACTION_MARKER);
        assert_eq!(secret.to_string(), REDACTION_MARKER);
        assert!(!format!("{:?}", Some(&secret)).contains("deadbeef"));
    }

    #[test]
    fn test_serialize_is_redacted() {
        let json = serde_json::to_string(&Secret::new("k1")).unwrap();
        assert_eq!(json, "\"<redacted>\"");
    }

    #[test]
    fn test_expose_returns_plaintext() {
        assert_eq!(Secret::new("0xabc").expose(), "0xabc");
    }
}
