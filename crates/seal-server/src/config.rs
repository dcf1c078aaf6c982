//! Server configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use seal_engine::StaticProfiles;
use seal_types::SignerId;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Configuration for the document seal server.
///
/// Loadable from a TOML file; every field has a default so a partial
/// file (or none at all) is fine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Directory holding keys, stored documents, and the ledger.
    pub data_root: PathBuf,
    /// Largest accepted upload body in bytes. Oversize requests are
    /// rejected with 413 before the body is read in full.
    pub max_upload_bytes: usize,
    /// Modulus size for newly generated signing keys.
    pub key_bits: usize,
    /// Publisher labels keyed by signer identity, used when a signing
    /// request does not carry an explicit label.
    pub profiles: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8731".to_string(),
            data_root: PathBuf::from("./seal-data"),
            max_upload_bytes: 32 * 1024 * 1024,
            key_bits: seal_crypto::DEFAULT_KEY_BITS,
            profiles: HashMap::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// The `[profiles]` table with identities validated.
    pub fn profile_directory(&self) -> ServerResult<StaticProfiles> {
        self.profiles
            .iter()
            .map(|(identity, label)| {
                let identity = SignerId::parse(identity.as_str())
                    .map_err(|e| ServerError::Config(format!("profile key: {e}")))?;
                Ok((identity, label.clone()))
            })
            .collect()
    }
}
