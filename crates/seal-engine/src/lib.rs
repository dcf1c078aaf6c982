//! High-level engine for DocSeal.
//!
//! [`DocSeal`] ties the key store, content store, and ledger together
//! into the two operations everything else builds on: signing a
//! document into the ledger and verifying it later. The HTTP server
//! and the CLI are both thin layers over this crate.

pub mod engine;
pub mod error;
pub mod outcome;
pub mod profile;

pub use engine::{DocSeal, EngineStats};
pub use error::{EngineError, EngineResult};
pub use outcome::{DocumentKey, VerifyReport, VerifyStatus};
pub use profile::{NoProfiles, ProfileDirectory, StaticProfiles};

// Re-export key types so embedders rarely need the lower crates.
pub use seal_crypto::Signature;
pub use seal_ledger::DocumentRecord;
pub use seal_types::{ContentDigest, DocumentId, SignerId, StoredRef};
