//! Export strategy selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use archdoc_model::DocumentModel;
use archdoc_render::RenderedDocument;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::Artifact;
use crate::capture::CaptureExporter;
use crate::error::{ExportError, Result};
use crate::server::ServerExporter;

/// How a document becomes an artifact. Chosen once per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStrategy {
    /// Capture the rendered document in-process.
    #[default]
    Client,
    /// Ask the export server to generate the document.
    Server,
}

impl ExportStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for ExportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportStrategy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            other => Err(format!("unknown export strategy {other:?} (expected client or server)")),
        }
    }
}

/// The configured exporter.
#[derive(Debug, Clone)]
pub enum Exporter {
    Client(CaptureExporter),
    Server(ServerExporter),
}

impl Exporter {
    pub fn strategy(&self) -> ExportStrategy {
        match self {
            Self::Client(_) => ExportStrategy::Client,
            Self::Server(_) => ExportStrategy::Server,
        }
    }

    /// Produce an artifact for the document.
    ///
    /// The capture path runs on tokio's blocking pool.
    pub async fn export(
        &self,
        document: Arc<DocumentModel>,
        rendered: Arc<RenderedDocument>,
    ) -> Result<Artifact> {
        info!(strategy = %self.strategy(), "starting export");
        match self {
            Self::Client(capture) => {
                let capture = capture.clone();
                tokio::task::spawn_blocking(move || capture.export(&rendered))
                    .await
                    .map_err(|e| ExportError::Task(e.to_string()))?
                    .map_err(ExportError::from)
            }
            Self::Server(server) => server.export(&document).await.map_err(ExportError::from),
        }
    }
}
