//! Server-generated export: post the analysis payload, receive a PDF.

use std::time::Duration;

use archdoc_model::DocumentModel;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::artifact::{Artifact, PDF_CONTENT_TYPE};
use crate::error::ServerExportError;

/// Request body of the export endpoint.
#[derive(Debug, Serialize)]
struct ExportRequest<'a> {
    data: &'a Value,
}

/// HTTP client for a remote PDF generator.
#[derive(Debug, Clone)]
pub struct ServerExporter {
    client: reqwest::Client,
    endpoint: Url,
}

impl ServerExporter {
    /// Build an exporter posting to `base_url` joined with `path`.
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, ServerExportError> {
        let endpoint = endpoint_url(base_url, path)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerExportError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Build an exporter around an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request a PDF for the document.
    ///
    /// The body echoes the analyzer payload the document was built from.
    pub async fn export(&self, document: &DocumentModel) -> Result<Artifact, ServerExportError> {
        debug!(endpoint = %self.endpoint, "requesting server export");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static(PDF_CONTENT_TYPE))
            .json(&ExportRequest {
                data: document.source_payload(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "export server rejected request");
            return Err(ServerExportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let is_pdf = content_type
            .as_deref()
            .is_some_and(|value| value.starts_with(PDF_CONTENT_TYPE));
        if !is_pdf {
            warn!(content_type = ?content_type, "export response is not labelled as PDF");
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ServerExportError::EmptyArtifact);
        }
        info!(bytes = bytes.len(), "received server artifact");
        Ok(Artifact::new(bytes.to_vec(), None))
    }
}

/// Join a base address and an endpoint path.
///
/// The path replaces any path on the base, so `http://host:8000/` and
/// `http://host:8000` behave the same.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ServerExportError> {
    let invalid = |message: String| ServerExportError::InvalidEndpoint {
        url: format!("{base_url}{path}"),
        message,
    };
    let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    base.join(path).map_err(|e| invalid(e.to_string()))
}
