use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use seal_types::StoredRef;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContentStore;

/// Filesystem content store: one file per document under a root
/// directory, named by the stored reference.
///
/// Stored references are restricted to a filesystem-safe charset (no
/// separators, no dot-dot), so the file name is the reference itself.
/// Files are created with `create_new` and fsynced, which enforces
/// write-once even across processes.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Open (creating if needed) a content directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory holding document files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing a stored reference.
    pub fn content_path(&self, stored_ref: &StoredRef) -> PathBuf {
        self.root.join(stored_ref.as_str())
    }
}

impl ContentStore for FsContentStore {
    fn put(&self, stored_ref: &StoredRef, content: &[u8]) -> StoreResult<()> {
        let path = self.content_path(stored_ref);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(stored_ref.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content)?;
        file.sync_all()?;
        Ok(())
    }

    fn reader(&self, stored_ref: &StoredRef) -> StoreResult<Option<Box<dyn Read + Send>>> {
        match fs::File::open(self.content_path(stored_ref)) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, stored_ref: &StoredRef) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.content_path(stored_ref)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, stored_ref: &StoredRef) -> StoreResult<bool> {
        Ok(self.content_path(stored_ref).try_exists()?)
    }

    fn delete(&self, stored_ref: &StoredRef) -> StoreResult<bool> {
        match fs::remove_file(self.content_path(stored_ref)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn locator(&self, stored_ref: &StoredRef) -> String {
        self.content_path(stored_ref).display().to_string()
    }
}

impl std::fmt::Debug for FsContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsContentStore")
            .field("root", &self.root)
            .finish()
    }
}
