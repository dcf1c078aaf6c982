//! File-backed ledger with CRC-framed records.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, warn};

use seal_types::{DocumentId, StoredRef};

use crate::error::{LedgerError, Result};
use crate::record::{DocumentDraft, DocumentRecord};
use crate::traits::Ledger;

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Mutable state behind the ledger mutex.
struct FileLedgerInner {
    file: File,
    records: Vec<DocumentRecord>,
    by_id: HashMap<DocumentId, usize>,
    by_ref: HashMap<StoredRef, usize>,
    next_id: u64,
}

/// Crash-recoverable append-only ledger in a single file.
///
/// On-disk format, one frame per record:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized DocumentRecord)]
/// ```
///
/// Every append is fsynced before the record is acknowledged. On open
/// the file is replayed front-to-back: frames failing the CRC check
/// are skipped, and a torn tail left by a crash is truncated so later
/// appends land on a clean frame boundary. The full record set stays
/// resident in memory with id and reference indexes; the file assumes
/// a single owning process.
pub struct FileLedger {
    path: PathBuf,
    inner: Mutex<FileLedgerInner>,
}

impl FileLedger {
    /// Open (or create) a ledger file at the given path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let (records, good_len) = Self::replay(&path)?;
        let file_len = file.metadata()?.len();
        if good_len < file_len {
            warn!(
                path = %path.display(),
                good_len,
                file_len,
                "discarding torn ledger tail"
            );
            file.set_len(good_len)?;
            file.sync_all()?;
        }

        let mut by_id = HashMap::new();
        let mut by_ref = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_id.insert(record.id, idx);
            by_ref.insert(record.stored_ref.clone(), idx);
        }
        let next_id = records.last().map(|r| r.id.value() + 1).unwrap_or(1);

        debug!(path = %path.display(), records = records.len(), "ledger opened");
        Ok(Self {
            path,
            inner: Mutex::new(FileLedgerInner {
                file,
                records,
                by_id,
                by_ref,
                next_id,
            }),
        })
    }

    /// Path to the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replay the file front-to-back.
    ///
    /// Returns the decoded records and the byte length of the
    /// structurally sound prefix. Complete frames with a bad CRC or an
    /// undecodable payload are skipped but still count toward the
    /// prefix; an incomplete tail does not.
    fn replay(path: &Path) -> Result<(Vec<DocumentRecord>, u64)> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);
        let mut records = Vec::new();
        let mut offset: u64 = 0;

        loop {
            if offset + HEADER_SIZE as u64 > file_len {
                break;
            }

            let mut header = [0u8; HEADER_SIZE];
            match reader.read_exact(&mut header) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            if length == 0 || offset + HEADER_SIZE as u64 + length as u64 > file_len {
                warn!(offset, length, file_len, "invalid ledger frame; stopping replay");
                break;
            }

            let mut payload = vec![0u8; length as usize];
            match reader.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(offset, "truncated ledger frame; stopping replay");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
            let frame_end = offset + HEADER_SIZE as u64 + length as u64;

            let actual_crc = crc32fast::hash(&payload);
            if actual_crc != expected_crc {
                warn!(offset, expected_crc, actual_crc, "CRC mismatch; skipping record");
                offset = frame_end;
                continue;
            }

            match bincode::deserialize::<DocumentRecord>(&payload) {
                Ok(record) => records.push(record),
                Err(e) => warn!(offset, error = %e, "undecodable ledger record; skipping"),
            }
            offset = frame_end;
        }

        Ok((records, offset))
    }
}

impl Ledger for FileLedger {
    fn record(&self, draft: DocumentDraft) -> Result<DocumentRecord> {
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        if inner.by_ref.contains_key(&draft.stored_ref) {
            return Err(LedgerError::DuplicateStoredRef(draft.stored_ref));
        }

        let record = DocumentRecord {
            id: DocumentId::new(inner.next_id),
            stored_ref: draft.stored_ref,
            display_name: draft.display_name,
            content_ref: draft.content_ref,
            content_hash: draft.content_hash,
            signature: draft.signature,
            signer_identity: draft.signer_identity,
            signer_public_key: draft.signer_public_key,
            publisher_label: draft.publisher_label,
            created_at: Utc::now(),
        };

        let payload =
            bincode::serialize(&record).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let length = payload.len() as u32;
        let crc = crc32fast::hash(&payload);

        // A failure part-way through leaves a torn tail; the next open
        // truncates it and the in-memory state stays untouched.
        inner.file.write_all(&length.to_le_bytes())?;
        inner.file.write_all(&crc.to_le_bytes())?;
        inner.file.write_all(&payload)?;
        inner.file.sync_all()?;

        let idx = inner.records.len();
        inner.by_id.insert(record.id, idx);
        inner.by_ref.insert(record.stored_ref.clone(), idx);
        inner.records.push(record.clone());
        inner.next_id += 1;

        debug!(id = record.id.value(), stored_ref = %record.stored_ref, "ledger append");
        Ok(record)
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<DocumentRecord>> {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        Ok(inner.by_id.get(&id).map(|&idx| inner.records[idx].clone()))
    }

    fn find_by_stored_ref(&self, stored_ref: &StoredRef) -> Result<Option<DocumentRecord>> {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        Ok(inner
            .by_ref
            .get(stored_ref)
            .map(|&idx| inner.records[idx].clone()))
    }

    fn all(&self) -> Result<Vec<DocumentRecord>> {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        Ok(inner.records.clone())
    }

    fn count(&self) -> Result<u64> {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        Ok(inner.records.len() as u64)
    }
}

impl std::fmt::Debug for FileLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.inner.lock().expect("ledger mutex poisoned").records.len();
        f.debug_struct("FileLedger")
            .field("path", &self.path)
            .field("records", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Seek, SeekFrom};

    use seal_crypto::Signature;
    use seal_types::ContentDigest;
    use tempfile::TempDir;

    use super::*;

    fn draft(stored_ref: &str, name: &str) -> DocumentDraft {
        DocumentDraft {
            stored_ref: stored_ref.parse().unwrap(),
            display_name: name.to_string(),
            content_ref: format!("/data/{stored_ref}"),
            content_hash: ContentDigest::from_raw([0x42; 32]),
            signature: Signature::from_bytes(vec![7; 32]),
            signer_identity: "u1".parse().unwrap(),
            signer_public_key: "-----BEGIN PUBLIC KEY-----\n".to_string(),
            publisher_label: Some("Acme Corp".to_string()),
        }
    }

    #[test]
    fn fresh_ledger_is_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = FileLedger::open(dir.path().join("ledger.log")).unwrap();
        assert_eq!(ledger.count().unwrap(), 0);
        assert!(ledger.all().unwrap().is_empty());
        assert!(ledger.find_by_id(DocumentId::new(1)).unwrap().is_none());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("ledger.log");
        let ledger = FileLedger::open(&path).unwrap();
        ledger.record(draft("r1", "a.pdf")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.log");

        let before = {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.record(draft("r1", "a.pdf")).unwrap();
            ledger.record(draft("r2", "b.pdf")).unwrap();
            ledger.all().unwrap()
        };

        let reopened = FileLedger::open(&path).unwrap();
        assert_eq!(reopened.all().unwrap(), before);
        assert_eq!(
            reopened.all().unwrap()[0].publisher_label.as_deref(),
            Some("Acme Corp")
        );
    }

    #[test]
    fn ids_resume_after_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.log");
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.record(draft("r1", "a.pdf")).unwrap();
            ledger.record(draft("r2", "b.pdf")).unwrap();
        }

        let ledger = FileLedger::open(&path).unwrap();
        let next = ledger.record(draft("r3", "c.pdf")).unwrap();
        assert_eq!(next.id, DocumentId::new(3));
    }

    #[test]
    fn duplicate_ref_rejected_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.log");
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.record(draft("r1", "a.pdf")).unwrap();
        }

        let ledger = FileLedger::open(&path).unwrap();
        let err = ledger.record(draft("r1", "imposter.pdf")).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateStoredRef(_)));
    }

    #[test]
    fn crc_corruption_skips_only_that_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.log");
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.record(draft("r1", "a.pdf")).unwrap();
            ledger.record(draft("r2", "b.pdf")).unwrap();
        }

        // Flip a byte in the first record's payload (first payload byte
        // sits right after the first header).
        {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&path)
                .unwrap();
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            let mut buf = [0u8; 1];
            file.read_exact(&mut buf).unwrap();
            buf[0] ^= 0xFF;
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            file.write_all(&buf).unwrap();
            file.sync_all().unwrap();
        }

        let ledger = FileLedger::open(&path).unwrap();
        let survivors = ledger.all().unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].display_name, "b.pdf");
        assert_eq!(survivors[0].id, DocumentId::new(2));

        // Id assignment continues after the surviving record.
        let next = ledger.record(draft("r3", "c.pdf")).unwrap();
        assert_eq!(next.id, DocumentId::new(3));
    }

    #[test]
    fn torn_tail_is_discarded_and_appends_continue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.log");
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.record(draft("r1", "a.pdf")).unwrap();
            ledger.record(draft("r2", "b.pdf")).unwrap();
        }

        // Chop the last 4 bytes, simulating a crash mid-append.
        let full_len = fs::metadata(&path).unwrap().len();
        {
            let file = OpenOptions::new().write(true).open(&path).unwrap();
            file.set_len(full_len - 4).unwrap();
        }

        let ledger = FileLedger::open(&path).unwrap();
        assert_eq!(ledger.count().unwrap(), 1);
        assert_eq!(ledger.all().unwrap()[0].display_name, "a.pdf");

        let next = ledger.record(draft("r2-again", "b-retry.pdf")).unwrap();
        assert_eq!(next.id, DocumentId::new(2));

        // After the clean append everything replays.
        let reopened = FileLedger::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 2);
    }

    #[test]
    fn find_by_id_and_by_ref() {
        let dir = TempDir::new().unwrap();
        let ledger = FileLedger::open(dir.path().join("ledger.log")).unwrap();
        let recorded = ledger.record(draft("r1", "a.pdf")).unwrap();

        assert_eq!(ledger.find_by_id(recorded.id).unwrap().unwrap(), recorded);
        assert_eq!(
            ledger
                .find_by_stored_ref(&"r1".parse().unwrap())
                .unwrap()
                .unwrap(),
            recorded
        );
        assert!(ledger.find_by_id(DocumentId::new(42)).unwrap().is_none());
    }
}
