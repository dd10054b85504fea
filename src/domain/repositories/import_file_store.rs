// src/domain/repositories/import_file_store.rs
use std::fmt::Debug;

use crate::domain::error::DomainResult;

/// Storage collaborator holding uploaded export files, addressed by
/// `(user_id, import_id)`.
///
/// `exists` signals absence as a plain `false`; `read` may return
/// `DomainError::FileNotFound` when the existence precondition was
/// violated between the two calls.
pub trait ImportFileStore: Send + Sync + Debug {
    fn exists(&self, user_id: &str, import_id: &str) -> bool;
    fn read(&self, user_id: &str, import_id: &str) -> DomainResult<Vec<u8>>;
}
