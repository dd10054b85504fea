// src/application/services/import_engine.rs
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::events::EventSink;
use crate::domain::candidate::Candidate;
use crate::domain::error::DomainResult;
use crate::domain::import::{FailReason, ImportOptions, ImportOutcome};
use crate::domain::policy;
use crate::domain::repositories::import_file_store::ImportFileStore;
use crate::domain::services::settings::{SettingsProvider, MAX_TAGS_PER_BOOKMARK};
use crate::infrastructure::parser::{SourceFormat, SourceParser};

/// Fallback when the settings provider carries no cap.
const DEFAULT_MAX_TAGS: i64 = 10;

/// Everything the caller supplies for one import run. Construction of the
/// `ImportOptions` and the addressing of the uploaded file belong to the
/// excluded request layer.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub user_id: String,
    pub import_id: String,
    pub format: SourceFormat,
    pub options: ImportOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Running,
    /// A failure reason has been latched; remaining candidates are only
    /// counted, never reclassified.
    Halted(FailReason),
}

/// Orchestrates one import run: source file -> lazy candidates -> policy
/// -> lifecycle events -> outcome.
///
/// An engine is built per run and consumed by `import`; separate runs
/// share no state.
#[derive(Debug)]
pub struct ImportEngine<S: ImportFileStore> {
    store: Arc<S>,
    settings: Arc<dyn SettingsProvider>,
    sink: EventSink,
}

impl<S: ImportFileStore> ImportEngine<S> {
    pub fn new(store: Arc<S>, settings: Arc<dyn SettingsProvider>, sink: EventSink) -> Self {
        Self {
            store,
            settings,
            sink,
        }
    }

    /// Run the import to completion.
    ///
    /// A missing source file fails fast, before any lifecycle event.
    /// Policy failures become outcome data; only system-level faults
    /// propagate as errors, and on that path the sink still observes a
    /// final `imports_ended` carrying a system-error outcome built from
    /// the statistics accumulated so far. The original error is never
    /// swallowed.
    #[instrument(skip(self), level = "debug",
        fields(user_id = %request.user_id, import_id = %request.import_id))]
    pub fn import(mut self, request: &ImportRequest) -> ApplicationResult<ImportOutcome> {
        if !self.store.exists(&request.user_id, &request.import_id) {
            return Err(ApplicationError::ImportFileNotFound {
                user_id: request.user_id.clone(),
                import_id: request.import_id.clone(),
            });
        }

        match self.execute(request) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let outcome = ImportOutcome::system_error(self.sink.report());
                self.sink.imports_ended(&outcome);
                Err(err)
            }
        }
    }

    fn execute(&mut self, request: &ImportRequest) -> ApplicationResult<ImportOutcome> {
        let raw = self.store.read(&request.user_id, &request.import_id)?;
        let max_tags = self
            .settings
            .get_int(MAX_TAGS_PER_BOOKMARK)
            .unwrap_or(DEFAULT_MAX_TAGS)
            .max(0) as usize;
        debug!("classifying with max_tags={}", max_tags);

        self.sink.imports_started();

        let parser = SourceParser::new(&raw, request.format);
        let latched = self.drain(parser.candidates().map(Ok), &request.options, max_tags)?;

        let stats = self.sink.report();
        let outcome = match latched {
            None => ImportOutcome::success(stats),
            Some(reason) => ImportOutcome::failed(reason, stats),
        };
        self.sink.imports_ended(&outcome);
        Ok(outcome)
    }

    /// Drive the state machine over the candidate sequence.
    ///
    /// The sequence is single-pass, so even after a failure latches the
    /// engine keeps draining it: abandoning iteration early would also
    /// abandon counting. Halted candidates are never reclassified, not
    /// even for URL validity.
    fn drain<I>(
        &mut self,
        candidates: I,
        options: &ImportOptions,
        max_tags: usize,
    ) -> DomainResult<Option<FailReason>>
    where
        I: Iterator<Item = DomainResult<Candidate>>,
    {
        let mut state = EngineState::Running;

        for item in candidates {
            let candidate = item?;
            self.sink.import_started(&candidate);

            match state {
                EngineState::Halted(_) => {
                    self.sink.bookmark_not_processed(&candidate);
                }
                EngineState::Running => {
                    if let Some(reason) =
                        policy::classify_for_failure(&candidate, options, max_tags)
                    {
                        self.sink.import_failed(&candidate, reason);
                        if policy::should_halt_processing(options) {
                            state = EngineState::Halted(reason);
                        }
                    } else if let Some(reason) =
                        policy::classify_for_skip(&candidate, options, max_tags)
                    {
                        self.sink.bookmark_skipped(&candidate, reason);
                    } else {
                        self.sink.bookmark_imported(&candidate);
                    }
                }
            }
        }

        Ok(match state {
            EngineState::Running => None,
            EngineState::Halted(reason) => Some(reason),
        })
    }
}
