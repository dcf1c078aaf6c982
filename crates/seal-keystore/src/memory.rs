//! In-memory key store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use seal_crypto::{SigningKey, DEFAULT_KEY_BITS};
use seal_types::SignerId;

use crate::error::Result;
use crate::keypair::KeyPair;
use crate::traits::KeyStore;

/// An in-memory implementation of [`KeyStore`].
///
/// Pairs live in a `HashMap` behind a `RwLock` and are lost when the
/// store is dropped. Generation happens under the write lock, so
/// concurrent `ensure_key_pair` calls for one identity serialize and
/// observe a single pair.
pub struct InMemoryKeyStore {
    key_bits: usize,
    pairs: RwLock<HashMap<SignerId, KeyPair>>,
}

impl InMemoryKeyStore {
    /// Create an empty store generating [`DEFAULT_KEY_BITS`] keys.
    pub fn new() -> Self {
        Self::with_key_bits(DEFAULT_KEY_BITS)
    }

    /// Create an empty store generating keys of the given modulus size.
    ///
    /// Mainly for tests, where small moduli keep generation cheap.
    pub fn with_key_bits(key_bits: usize) -> Self {
        Self {
            key_bits,
            pairs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of identities with a pair.
    pub fn len(&self) -> usize {
        self.pairs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no pairs exist.
    pub fn is_empty(&self) -> bool {
        self.pairs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn ensure_key_pair(&self, identity: &SignerId) -> Result<KeyPair> {
        if let Some(pair) = self.pairs.read().expect("lock poisoned").get(identity) {
            return Ok(pair.clone());
        }

        let mut pairs = self.pairs.write().expect("lock poisoned");
        // Re-check: another thread may have generated while we waited.
        if let Some(pair) = pairs.get(identity) {
            return Ok(pair.clone());
        }
        let signing_key = SigningKey::generate(self.key_bits)?;
        let pair = KeyPair::new(identity.clone(), signing_key);
        pairs.insert(identity.clone(), pair.clone());
        Ok(pair)
    }

    fn key_pair(&self, identity: &SignerId) -> Result<Option<KeyPair>> {
        let pairs = self.pairs.read().expect("lock poisoned");
        Ok(pairs.get(identity).cloned())
    }

    fn identities(&self) -> Result<Vec<SignerId>> {
        let pairs = self.pairs.read().expect("lock poisoned");
        let mut ids: Vec<SignerId> = pairs.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}

impl std::fmt::Debug for InMemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyStore")
            .field("identities", &self.len())
            .field("key_bits", &self.key_bits)
            .finish()
    }
}
