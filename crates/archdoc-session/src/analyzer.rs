//! Client for the external folder analyzer.

use std::time::Duration;

use archdoc_model::AnalysisResult;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::AnalyzerError;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    source_path: &'a str,
}

/// Replace every backslash with a forward slash.
pub fn normalize_source_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// HTTP client for the analyzer endpoint.
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl AnalyzerClient {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, AnalyzerError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| AnalyzerError::Transport(format!("invalid analyzer address: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a source folder for analysis.
    pub async fn analyze(&self, source_path: &str) -> Result<AnalysisResult, AnalyzerError> {
        let source_path = normalize_source_path(source_path);
        debug!(endpoint = %self.endpoint, source_path = %source_path, "requesting analysis");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest {
                source_path: &source_path,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(status = status.as_u16(), detail = ?detail, "analyzer rejected request");
            return Err(AnalyzerError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let result = AnalysisResult::from_slice(&body)
            .map_err(|e| AnalyzerError::InvalidPayload(e.to_string()))?;
        info!(
            file_types = result.file_types_found.len(),
            sections = result.architecture_analysis.len(),
            "analysis received"
        );
        Ok(result)
    }
}

/// The `detail` field of an error body, if there is a usable one.
///
/// Structured details (such as validation error lists) are kept as JSON text.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_source_path() {
        assert_eq!(
            normalize_source_path(r"D:\Personal Projects\Brown\project"),
            "D:/Personal Projects/Brown/project"
        );
        assert_eq!(normalize_source_path("/already/fine"), "/already/fine");
    }

    #[test]
    fn test_error_detail_variants() {
        assert_eq!(
            error_detail(br#"{"detail":"folder not found"}"#).as_deref(),
            Some("folder not found")
        );
        assert_eq!(
            error_detail(br#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#).as_deref(),
            Some(r#"[{"loc":["body"],"msg":"field required"}]"#)
        );
        assert_eq!(error_detail(br#"{"detail":""}"#), None);
        assert_eq!(error_detail(br#"{"message":"x"}"#), None);
        assert_eq!(error_detail(b"Internal Server Error"), None);
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        assert!(AnalyzerClient::new("nope", "/analyze-folder", Duration::from_secs(1)).is_err());
        let client =
            AnalyzerClient::new("http://localhost:8000", "/analyze-folder", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8000/analyze-folder");
    }
}
