//! The append-only signing ledger for DocSeal.
//!
//! Every signed document gets exactly one [`DocumentRecord`] holding
//! its digest, signature, and the signer's public key at signing time.
//! Records are immutable and never deleted; verification replays
//! against them. Two backends ship here:
//!
//! - [`FileLedger`]: CRC-framed records in a single append-only file,
//!   fsynced per append and replayed on open.
//! - [`InMemoryLedger`]: ephemeral records for tests and embedding.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{LedgerError, Result};
pub use file::FileLedger;
pub use memory::InMemoryLedger;
pub use record::{DocumentDraft, DocumentRecord};
pub use traits::Ledger;
