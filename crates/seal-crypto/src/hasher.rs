//! Streaming SHA-256 content hashing.
//!
//! Documents are fingerprinted by hashing their raw bytes in bounded
//! chunks, so arbitrarily large content can be digested without ever
//! holding more than one chunk in memory. The same routine runs at
//! signing time and at verification time; equal bytes always produce
//! an equal [`ContentDigest`].

use std::io::Read;

use sha2::{Digest, Sha256};

use seal_types::ContentDigest;

/// Number of bytes read per iteration when hashing a stream.
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Errors that can occur while hashing streamed content.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    /// The underlying reader failed.
    #[error("I/O error while hashing: {0}")]
    Io(#[from] std::io::Error),
}

/// Incremental SHA-256 hasher over document content.
///
/// Feed bytes with [`update`](Self::update) in any split and call
/// [`finalize`](Self::finalize) once to obtain the digest. For common
/// cases prefer the [`hash_bytes`] and [`hash_reader`] helpers.
#[derive(Clone)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    /// Create a hasher with empty state.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Absorb the next run of content bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    /// Consume the hasher and produce the final digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest::from_raw(self.inner.finalize().into())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a complete in-memory buffer.
pub fn hash_bytes(bytes: &[u8]) -> ContentDigest {
    let mut hasher = ContentHasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Hash everything a reader yields, in [`HASH_CHUNK_SIZE`] chunks.
///
/// Reads until EOF. Memory use stays constant regardless of how much
/// content the reader produces.
pub fn hash_reader<R: Read>(mut reader: R) -> Result<ContentDigest, HasherError> {
    let mut hasher = ContentHasher::new();
    let mut buf = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_input_matches_known_vector() {
        let digest = hash_bytes(b"");
        assert_eq!(
            digest.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn abc_matches_known_vector() {
        let digest = hash_bytes(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn incremental_updates_match_one_shot() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"hello");
        hasher.update(b"-");
        hasher.update(b"sig");
        assert_eq!(hasher.finalize(), hash_bytes(b"hello-sig"));
    }

    #[test]
    fn reader_matches_bytes_across_chunk_boundaries() {
        // Three full chunks plus a ragged tail.
        let content: Vec<u8> = (0..HASH_CHUNK_SIZE * 3 + 97)
            .map(|i| (i % 251) as u8)
            .collect();
        let streamed = hash_reader(Cursor::new(content.clone())).unwrap();
        assert_eq!(streamed, hash_bytes(&content));
    }

    #[test]
    fn empty_reader_matches_empty_bytes() {
        let streamed = hash_reader(Cursor::new(Vec::new())).unwrap();
        assert_eq!(streamed, hash_bytes(b""));
    }

    #[test]
    fn reader_io_error_is_surfaced() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let err = hash_reader(FailingReader).unwrap_err();
        assert!(matches!(err, HasherError::Io(_)));
    }

    proptest! {
        #[test]
        fn hashing_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(hash_bytes(&data), hash_bytes(&data));
        }

        #[test]
        fn distinct_content_gets_distinct_digests(
            a in proptest::collection::vec(any::<u8>(), 0..512),
            b in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(hash_bytes(&a), hash_bytes(&b));
        }

        #[test]
        fn any_split_matches_one_shot(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            cut in any::<prop::sample::Index>(),
        ) {
            let at = cut.index(data.len());
            let mut hasher = ContentHasher::new();
            hasher.update(&data[..at]);
            hasher.update(&data[at..]);
            prop_assert_eq!(hasher.finalize(), hash_bytes(&data));
        }
    }
}
