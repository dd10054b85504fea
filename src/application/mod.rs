// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key types for easier imports
pub use services::events::{EventSink, ImportListener, LoggingListener, StatRecorder};
pub use services::import_engine::{ImportEngine, ImportRequest};
