//! Publisher profile lookups.
//!
//! A profile maps a signer identity to the display label shown as the
//! publishing party on its records. Labels are optional everywhere; a
//! signing call may override the directory, and an identity without a
//! profile simply publishes unlabelled.

use std::collections::HashMap;

use seal_types::SignerId;

/// Directory of publisher display labels keyed by signer identity.
pub trait ProfileDirectory: Send + Sync {
    /// Display name registered for the identity, if any.
    fn display_name_for(&self, identity: &SignerId) -> Option<String>;
}

/// The empty directory: no identity has a label.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProfiles;

impl ProfileDirectory for NoProfiles {
    fn display_name_for(&self, _identity: &SignerId) -> Option<String> {
        None
    }
}

/// A fixed directory, typically built from server configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticProfiles {
    labels: HashMap<SignerId, String>,
}

impl StaticProfiles {
    /// Build from an identity-to-label map.
    pub fn new(labels: HashMap<SignerId, String>) -> Self {
        Self { labels }
    }

    /// Number of registered profiles.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no profiles are registered.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(SignerId, String)> for StaticProfiles {
    fn from_iter<I: IntoIterator<Item = (SignerId, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl ProfileDirectory for StaticProfiles {
    fn display_name_for(&self, identity: &SignerId) -> Option<String> {
        self.labels.get(identity).cloned()
    }
}
