use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Globally unique opaque key naming where a document's bytes live.
///
/// A `StoredRef` is minted once at signing time as `{uuid}_{sanitized
/// display name}`, so two uploads of identically named files never collide
/// and the human-facing display name never doubles as a storage key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRef(String);

/// Portion of the display name carried into the stored reference.
const NAME_SUFFIX_MAX: usize = 64;

impl StoredRef {
    /// Mint a fresh, globally unique reference for a document.
    pub fn mint(display_name: &str) -> Self {
        let uuid = Uuid::now_v7();
        let suffix: String = display_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .take(NAME_SUFFIX_MAX)
            .collect();
        if suffix.is_empty() {
            Self(uuid.to_string())
        } else {
            Self(format!("{uuid}_{suffix}"))
        }
    }

    /// Validate and wrap an existing reference string.
    ///
    /// References are single path components: non-empty, at most 255 bytes,
    /// printable ASCII with no separators.
    pub fn parse(s: impl Into<String>) -> Result<Self, TypeError> {
        let s = s.into();
        if s.is_empty() {
            return Err(TypeError::InvalidStoredRef("must not be empty".into()));
        }
        if s.len() > 255 {
            return Err(TypeError::InvalidStoredRef("longer than 255 bytes".into()));
        }
        if s == "." || s == ".." {
            return Err(TypeError::InvalidStoredRef(format!("{s:?} not allowed")));
        }
        if let Some(bad) = s
            .chars()
            .find(|&c| c == '/' || c == '\\' || !c.is_ascii_graphic())
        {
            return Err(TypeError::InvalidStoredRef(format!(
                "character {bad:?} not allowed"
            )));
        }
        Ok(Self(s))
    }

    /// The reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StoredRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for StoredRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StoredRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoredRef({})", self.0)
    }
}

impl fmt::Display for StoredRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
