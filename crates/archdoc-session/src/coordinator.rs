//! Drives the session through real analyzer and export I/O.

use std::path::PathBuf;

use archdoc_export::{Artifact, ArtifactSink, ExportError, Exporter};
use archdoc_model::AnalysisResult;
use tracing::info;

use crate::analyzer::AnalyzerClient;
use crate::config::DeploymentConfig;
use crate::error::ConfigError;
use crate::state::{Outcome, Session, SessionState, SubmitRejected};

/// Summary of a delivered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub path: PathBuf,
    pub bytes: usize,
    pub page_count: Option<usize>,
}

/// Owns one session and the collaborators its transitions call.
///
/// Every failure is converted into a state transition; nothing propagates
/// past the coordinator except rejected inputs.
#[derive(Debug)]
pub struct ExportCoordinator {
    session: Session,
    analyzer: AnalyzerClient,
    exporter: Exporter,
    sink: ArtifactSink,
}

impl ExportCoordinator {
    pub fn new(analyzer: AnalyzerClient, exporter: Exporter, sink: ArtifactSink) -> Self {
        Self {
            session: Session::new(exporter.strategy()),
            analyzer,
            exporter,
            sink,
        }
    }

    pub fn from_config(config: &DeploymentConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.analyzer()?, config.exporter()?, config.sink()))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Submit a source folder and wait for the analysis.
    pub async fn submit(&mut self, source_path: &str) -> Result<&SessionState, SubmitRejected> {
        let ticket = self.session.submit(source_path)?;
        let result = self.analyzer.analyze(ticket.source_path()).await;
        self.session.complete_submit(ticket, result);
        Ok(self.session.state())
    }

    /// Show a previously saved analysis without contacting the analyzer.
    ///
    /// `source_label` follows the same rules as a submitted path.
    pub fn open(
        &mut self,
        source_label: &str,
        result: AnalysisResult,
    ) -> Result<&SessionState, SubmitRejected> {
        let ticket = self.session.submit(source_label)?;
        self.session.complete_submit(ticket, Ok(result));
        Ok(self.session.state())
    }

    /// Run the configured export and deliver the artifact.
    ///
    /// Returns `None` when there is nothing to export or a job is running.
    pub async fn export(&mut self) -> Option<Result<Delivery, String>> {
        let ticket = self.session.trigger_export()?;
        let result = match self
            .exporter
            .export(ticket.document(), ticket.rendered())
            .await
        {
            Ok(artifact) => deliver(self.sink.clone(), artifact).await,
            Err(err) => Err(err),
        };
        let summary = result.as_ref().map_err(ExportError::user_message).cloned();
        let outcome = self
            .session
            .complete_export(ticket, result.map(|delivery| delivery.path));
        if outcome == Outcome::Stale {
            return None;
        }
        Some(summary)
    }

    /// Return to Idle.
    pub fn back(&mut self) -> bool {
        self.session.back()
    }
}

async fn deliver(sink: ArtifactSink, artifact: Artifact) -> Result<Delivery, ExportError> {
    tokio::task::spawn_blocking(move || -> Result<Delivery, ExportError> {
        let path = sink.deliver(&artifact)?;
        info!(path = %path.display(), "document saved");
        Ok(Delivery {
            path,
            bytes: artifact.len(),
            page_count: artifact.page_count(),
        })
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))?
}
