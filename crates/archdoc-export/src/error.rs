//! Error types for document export.

use std::path::PathBuf;

use thiserror::Error;

/// Banner text for every client-capture failure.
pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to generate PDF. Please try again.";

/// Failures of the in-process capture pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    /// The rendered document could not be serialized as SVG.
    #[error("failed to serialize document: {0}")]
    Svg(#[from] archdoc_render::RenderError),

    /// The SVG could not be parsed into a render tree.
    #[error("failed to parse document tree: {0}")]
    Parse(String),

    /// The raster surface could not be allocated.
    #[error("cannot allocate a {width}x{height} raster")]
    Raster { width: u32, height: u32 },

    /// A page band could not be encoded as an image.
    #[error("failed to encode page {page}: {message}")]
    Encode { page: usize, message: String },

    /// Writing the portable document failed.
    #[error("failed to assemble document: {0}")]
    Assemble(String),

    /// Margins leave no printable area on the page.
    #[error("margin of {margin_mm} mm leaves no printable area")]
    InvalidMargin { margin_mm: f32 },

    /// A font file configured for capture could not be loaded.
    #[error("failed to load font {}: {message}", path.display())]
    Font { path: PathBuf, message: String },

    /// None of the document's font families resolves to a loaded face.
    #[error("no font face matches {families:?}")]
    NoFont { families: String },
}

/// Failures of the server-generated export path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerExportError {
    /// The request could not be sent or the response could not be read.
    #[error("export request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("export server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered successfully but sent no bytes.
    #[error("export server returned an empty document")]
    EmptyArtifact,

    /// The configured endpoint is not a valid URL.
    #[error("invalid export endpoint {url:?}: {message}")]
    InvalidEndpoint { url: String, message: String },
}

/// Failures writing the artifact to local storage.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of an export action.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Server(#[from] ServerExportError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// The blocking capture task was cancelled or panicked.
    #[error("export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// Returns a user-friendly error message suitable for the error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Capture(_) | Self::Task(_) => CAPTURE_FAILED_MESSAGE.to_string(),
            Self::Server(ServerExportError::Status { status, .. }) => {
                format!("Failed to download PDF (status {status})")
            }
            Self::Server(ServerExportError::EmptyArtifact) => {
                "Failed to download PDF: the server returned an empty document.".to_string()
            }
            Self::Server(err) => format!("Failed to download PDF: {err}"),
            Self::Delivery(err) => format!("Failed to save PDF: {err}"),
        }
    }

    /// Whether retriggering the export may succeed.
    ///
    /// Exports are never retried automatically; this only informs the banner.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Capture(
                CaptureError::InvalidMargin { .. }
                | CaptureError::Font { .. }
                | CaptureError::NoFont { .. },
            ) => false,
            Self::Server(ServerExportError::InvalidEndpoint { .. }) => false,
            Self::Server(ServerExportError::Status { status, .. }) => *status >= 500,
            _ => true,
        }
    }
}

impl From<reqwest::Error> for ServerExportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
