//! Session state machine.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Viewing ──trigger──▶ Exporting
//!  ▲                   │                 ▲                    │
//!  │                   └──err──▶ Error   └────done/failed─────┘
//!  └──────────── back (from any other state) ─────────────────┘
//! ```
//!
//! The session owns the current [`DocumentModel`]. Transitions that start I/O
//! hand out a ticket; the I/O result is committed with the ticket and is
//! discarded when the session has moved on in the meantime (a back
//! navigation or a new submission).

use std::path::PathBuf;
use std::sync::Arc;

use archdoc_export::{ExportError, ExportStrategy};
use archdoc_model::{AnalysisResult, DocumentModel};
use archdoc_render::{RenderedDocument, render_document};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::AnalyzerError;

/// Status of an export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The most recent export action of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub strategy: ExportStrategy,
    pub status: JobStatus,
    /// Set only when `status` is [`JobStatus::Failed`].
    pub error_message: Option<String>,
    /// Where the artifact was saved, when `status` is [`JobStatus::Succeeded`].
    pub delivered_to: Option<PathBuf>,
}

impl ExportJob {
    fn running(strategy: ExportStrategy) -> Self {
        Self {
            strategy,
            status: JobStatus::Running,
            error_message: None,
            delivered_to: None,
        }
    }
}

/// A built document and its rendering.
#[derive(Debug, Clone)]
pub struct View {
    document: Arc<DocumentModel>,
    rendered: Arc<RenderedDocument>,
    job: Option<ExportJob>,
}

impl View {
    fn new(result: &AnalysisResult) -> Self {
        let document = DocumentModel::build(result);
        let rendered = render_document(&document);
        Self {
            document: Arc::new(document),
            rendered: Arc::new(rendered),
            job: None,
        }
    }

    pub fn document(&self) -> &DocumentModel {
        &self.document
    }

    pub fn rendered(&self) -> &RenderedDocument {
        &self.rendered
    }

    pub fn job(&self) -> Option<&ExportJob> {
        self.job.as_ref()
    }
}

/// Current session state.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting {
        source_path: String,
    },
    Viewing(View),
    Exporting(View),
    Error {
        message: String,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting { .. } => "submitting",
            Self::Viewing(_) => "viewing",
            Self::Exporting(_) => "exporting",
            Self::Error { .. } => "error",
        }
    }

    pub fn view(&self) -> Option<&View> {
        match self {
            Self::Viewing(view) | Self::Exporting(view) => Some(view),
            _ => None,
        }
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a source path is required")]
    EmptyPath,
    #[error("cannot submit while {0}")]
    Busy(&'static str),
}

/// Whether a completion was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The session moved on; the result was discarded.
    Stale,
}

/// Proof of an outstanding analyzer request.
#[derive(Debug)]
pub struct SubmitTicket {
    epoch: u64,
    source_path: String,
}

impl SubmitTicket {
    pub fn source_path(&self) -> &str {
        &self.source_path
    }
}

/// Proof of an outstanding export job, with everything the exporter needs.
#[derive(Debug)]
pub struct ExportTicket {
    epoch: u64,
    strategy: ExportStrategy,
    document: Arc<DocumentModel>,
    rendered: Arc<RenderedDocument>,
}

impl ExportTicket {
    pub fn strategy(&self) -> ExportStrategy {
        self.strategy
    }

    pub fn document(&self) -> Arc<DocumentModel> {
        Arc::clone(&self.document)
    }

    pub fn rendered(&self) -> Arc<RenderedDocument> {
        Arc::clone(&self.rendered)
    }
}

/// One user's session.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    strategy: ExportStrategy,
    epoch: u64,
}

impl Session {
    pub fn new(strategy: ExportStrategy) -> Self {
        Self {
            state: SessionState::Idle,
            strategy,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn strategy(&self) -> ExportStrategy {
        self.strategy
    }

    /// The banner message: an analysis error or the last export failure.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Error { message } => Some(message),
            SessionState::Viewing(view) => view.job.as_ref()?.error_message.as_deref(),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, SessionState::Idle | SessionState::Error { .. })
    }

    /// Idle/Error -> Submitting.
    ///
    /// The path is submitted as typed; an empty or blank path leaves the state
    /// unchanged.
    pub fn submit(&mut self, source_path: &str) -> Result<SubmitTicket, SubmitRejected> {
        if source_path.trim().is_empty() {
            return Err(SubmitRejected::EmptyPath);
        }
        if !self.can_submit() {
            return Err(SubmitRejected::Busy(self.state.name()));
        }
        self.epoch += 1;
        self.state = SessionState::Submitting {
            source_path: source_path.to_string(),
        };
        info!(epoch = self.epoch, source_path, "submitted source folder");
        Ok(SubmitTicket {
            epoch: self.epoch,
            source_path: source_path.to_string(),
        })
    }

    /// Submitting -> Viewing or Error.
    ///
    /// A new document model replaces any previous one.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<AnalysisResult, AnalyzerError>,
    ) -> Outcome {
        if ticket.epoch != self.epoch || !matches!(self.state, SessionState::Submitting { .. }) {
            debug!(epoch = ticket.epoch, current = self.epoch, "discarding stale analysis");
            return Outcome::Stale;
        }
        self.state = match result {
            Ok(result) => {
                let view = View::new(&result);
                info!(
                    stats = view.document.stats().len(),
                    sections = view.document.sections().len(),
                    "document ready"
                );
                SessionState::Viewing(view)
            }
            Err(err) => {
                warn!(error = %err, "analysis failed");
                SessionState::Error {
                    message: err.user_message(),
                }
            }
        };
        Outcome::Applied
    }

    /// Viewing -> Exporting.
    ///
    /// Returns `None` (and changes nothing) unless the session is viewing a
    /// document, so a second trigger while a job runs is a no-op.
    pub fn trigger_export(&mut self) -> Option<ExportTicket> {
        if !matches!(self.state, SessionState::Viewing(_)) {
            debug!(state = self.state.name(), "export trigger ignored");
            return None;
        }
        let SessionState::Viewing(mut view) = std::mem::take(&mut self.state) else {
            return None;
        };
        view.job = Some(ExportJob::running(self.strategy));
        let ticket = ExportTicket {
            epoch: self.epoch,
            strategy: self.strategy,
            document: Arc::clone(&view.document),
            rendered: Arc::clone(&view.rendered),
        };
        self.state = SessionState::Exporting(view);
        info!(strategy = %self.strategy, "export started");
        Some(ticket)
    }

    /// Exporting -> Viewing, with the job outcome recorded.
    ///
    /// The document model is kept whether or not the export succeeded.
    pub fn complete_export(
        &mut self,
        ticket: ExportTicket,
        result: Result<PathBuf, ExportError>,
    ) -> Outcome {
        if ticket.epoch != self.epoch || !matches!(self.state, SessionState::Exporting(_)) {
            debug!(epoch = ticket.epoch, current = self.epoch, "discarding stale export");
            return Outcome::Stale;
        }
        let SessionState::Exporting(mut view) = std::mem::take(&mut self.state) else {
            return Outcome::Stale;
        };
        let mut job = ExportJob::running(ticket.strategy);
        match result {
            Ok(path) => {
                info!(path = %path.display(), "export succeeded");
                job.status = JobStatus::Succeeded;
                job.delivered_to = Some(path);
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                job.status = JobStatus::Failed;
                job.error_message = Some(err.user_message());
            }
        }
        view.job = Some(job);
        self.state = SessionState::Viewing(view);
        Outcome::Applied
    }

    /// Any state -> Idle, discarding the document model and any error.
    ///
    /// Returns `false` when already idle.
    pub fn back(&mut self) -> bool {
        if matches!(self.state, SessionState::Idle) {
            return false;
        }
        self.epoch += 1;
        debug!(from = self.state.name(), "navigating back");
        self.state = SessionState::Idle;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ExportStrategy::default())
    }
}
