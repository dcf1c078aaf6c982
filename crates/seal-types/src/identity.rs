use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identity of a signer (a user or service account).
///
/// A `SignerId` names exactly one key pair in the key store and appears in
/// every document record as `signer_identity`. The character set is
/// restricted to filesystem-safe characters because key stores derive
/// per-identity file names from it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerId(String);

impl SignerId {
    /// Maximum accepted length in bytes.
    pub const MAX_LEN: usize = 128;

    /// Validate and wrap an identity string.
    ///
    /// Accepts non-empty strings up to [`MAX_LEN`](Self::MAX_LEN) bytes of
    /// ASCII alphanumerics plus `.` `_` `-` `@`.
    pub fn parse(s: impl Into<String>) -> Result<Self, TypeError> {
        let s = s.into();
        if s.is_empty() {
            return Err(TypeError::InvalidIdentity("must not be empty".into()));
        }
        if s.len() > Self::MAX_LEN {
            return Err(TypeError::InvalidIdentity(format!(
                "longer than {} bytes",
                Self::MAX_LEN
            )));
        }
        if let Some(bad) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '_' | '-' | '@'))
        {
            return Err(TypeError::InvalidIdentity(format!(
                "character {bad:?} not allowed"
            )));
        }
        Ok(Self(s))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SignerId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerId({})", self.0)
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_identities() {
        for id in ["u1", "alice", "svc.billing", "a-b_c", "me@example.com"] {
            assert!(SignerId::parse(id).is_ok(), "{id} should parse");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(SignerId::parse("").is_err());
    }

    #[test]
    fn rejects_path_characters() {
        assert!(SignerId::parse("../etc/passwd").is_err());
        assert!(SignerId::parse("a/b").is_err());
        assert!(SignerId::parse("a\\b").is_err());
    }

    #[test]
    fn rejects_whitespace() {
        assert!(SignerId::parse("a b").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let long = "x".repeat(SignerId::MAX_LEN + 1);
        assert!(SignerId::parse(long).is_err());
        let max = "x".repeat(SignerId::MAX_LEN);
        assert!(SignerId::parse(max).is_ok());
    }

    #[test]
    fn from_str_parses() {
        let id: SignerId = "u1".parse().unwrap();
        assert_eq!(id.as_str(), "u1");
    }

    #[test]
    fn display_is_plain_string() {
        let id = SignerId::parse("alice").unwrap();
        assert_eq!(format!("{id}"), "alice");
    }

    #[test]
    fn serde_roundtrip() {
        let id = SignerId::parse("u1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"u1\"");
        let parsed: SignerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
