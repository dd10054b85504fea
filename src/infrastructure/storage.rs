// src/infrastructure/storage.rs
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::import_file_store::ImportFileStore;

/// Filesystem-backed store for uploaded export files, laid out as
/// `<root>/<user_id>/<import_id>`.
#[derive(Debug)]
pub struct FsImportFileStore {
    root: PathBuf,
}

impl FsImportFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, user_id: &str, import_id: &str) -> PathBuf {
        self.root.join(user_id).join(import_id)
    }
}

impl ImportFileStore for FsImportFileStore {
    fn exists(&self, user_id: &str, import_id: &str) -> bool {
        self.path_for(user_id, import_id).is_file()
    }

    fn read(&self, user_id: &str, import_id: &str) -> DomainResult<Vec<u8>> {
        let path = self.path_for(user_id, import_id);
        debug!("Reading import file: {}", path.display());
        fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DomainError::FileNotFound(path.display().to_string())
            } else {
                DomainError::Io(e)
            }
        })
    }
}
