//! The [`KeyStore`] trait defining key pair storage.
//!
//! Any backend (in-memory, filesystem) implements this trait to manage
//! one RSA key pair per signer identity.

use seal_crypto::{SigningKey, VerifyKey};
use seal_types::SignerId;

use crate::error::{KeyStoreError, Result};
use crate::keypair::KeyPair;

/// Storage backend for per-identity signing key pairs.
///
/// Implementations must be thread-safe (`Send + Sync`) and must uphold
/// key stability: once a pair exists for an identity, every later
/// lookup returns that same pair. Two concurrent
/// [`ensure_key_pair`](Self::ensure_key_pair) calls for the same fresh
/// identity must converge on a single pair rather than racing to
/// overwrite each other.
pub trait KeyStore: Send + Sync {
    /// Return the identity's key pair, generating one first if none
    /// exists yet.
    fn ensure_key_pair(&self, identity: &SignerId) -> Result<KeyPair>;

    /// Look up an existing key pair without creating one.
    ///
    /// Returns `Ok(None)` if the identity has no pair.
    fn key_pair(&self, identity: &SignerId) -> Result<Option<KeyPair>>;

    /// Look up only the public half of an identity's pair.
    ///
    /// Returns `Ok(None)` if the identity has no pair. Never generates.
    fn public_key(&self, identity: &SignerId) -> Result<Option<VerifyKey>> {
        Ok(self.key_pair(identity)?.map(|pair| pair.verify_key))
    }

    /// The private half of an identity's pair, for callers that must
    /// sign with an already-provisioned key.
    ///
    /// Unlike the lookups above, a missing pair is an error here.
    fn signing_key(&self, identity: &SignerId) -> Result<SigningKey> {
        self.key_pair(identity)?
            .map(|pair| pair.signing_key)
            .ok_or_else(|| KeyStoreError::NotFound {
                identity: identity.clone(),
            })
    }

    /// Whether a key pair exists for the identity.
    fn contains(&self, identity: &SignerId) -> Result<bool> {
        Ok(self.key_pair(identity)?.is_some())
    }

    /// All identities with a stored pair, sorted.
    fn identities(&self) -> Result<Vec<SignerId>>;
}
