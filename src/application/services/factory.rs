// src/application/services/factory.rs
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::events::{EventSink, ImportListener, LoggingListener};
use crate::application::services::import_engine::ImportEngine;
use crate::config::load_settings;
use crate::infrastructure::storage::FsImportFileStore;

/// Wires a per-run engine from loaded settings: filesystem store, a sink
/// with the caller's listeners (persistence, integrations) in insertion
/// order, plus the tracing listener last.
pub fn create_import_engine(
    listeners: Vec<Box<dyn ImportListener>>,
) -> ApplicationResult<ImportEngine<FsImportFileStore>> {
    let settings = Arc::new(load_settings()?);
    let store = Arc::new(FsImportFileStore::new(&settings.import_dir));

    let mut sink = EventSink::new();
    for listener in listeners {
        sink.attach(listener);
    }
    sink.attach(Box::new(LoggingListener));

    Ok(ImportEngine::new(store, settings, sink))
}
