use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The analyzer response body is not JSON.
    #[error("analyzer payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
