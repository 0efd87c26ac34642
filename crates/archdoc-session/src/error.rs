//! Error types for configuration and analysis requests.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the deployment configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Errors from the external analyzer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyzerError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// The analyzer answered with a non-success status.
    #[error("analyzer returned status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// The analyzer answered successfully with a body that is not JSON.
    #[error("analyzer returned an unreadable payload: {0}")]
    InvalidPayload(String),
}

impl AnalyzerError {
    /// Banner text: the server-provided detail when present.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Rejected {
                status,
                detail: None,
            } => format!("Request failed with status code {status}"),
            Self::Transport(message) => message.clone(),
            Self::InvalidPayload(_) => self.to_string(),
        }
    }

    /// Whether resubmitting may succeed.
    ///
    /// Analysis is never retried automatically.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::InvalidPayload(_) => false,
        }
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_preferred() {
        let err = AnalyzerError::Rejected {
            status: 404,
            detail: Some("Source folder not found: /tmp/x".to_string()),
        };
        assert_eq!(err.user_message(), "Source folder not found: /tmp/x");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_detail_falls_back_to_status() {
        let err = AnalyzerError::Rejected {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
        assert!(err.is_retryable());
    }
}
