use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Serializing the document as SVG failed.
    #[error("failed to write SVG: {0}")]
    Svg(String),
}

impl RenderError {
    pub(crate) fn svg(err: impl std::fmt::Display) -> Self {
        Self::Svg(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
