//! Export of rendered project documentation as a portable document.
//!
//! Two mutually exclusive strategies produce an [`Artifact`]:
//!
//! - [`CaptureExporter`] rasterizes the rendered document and paginates it
//!   into a PDF without any network I/O.
//! - [`ServerExporter`] posts the analysis payload to a remote generator and
//!   receives the finished PDF.
//!
//! [`ArtifactSink`] writes either result to local storage under
//! [`DEFAULT_FILENAME`].

pub mod artifact;
pub mod capture;
pub mod error;
pub mod page;
pub mod server;
pub mod strategy;

pub use artifact::{Artifact, ArtifactSink, DEFAULT_FILENAME, PDF_CONTENT_TYPE};
pub use capture::{CaptureExporter, CaptureOptions, MIN_SCALE};
pub use error::{
    CAPTURE_FAILED_MESSAGE, CaptureError, DeliveryError, ExportError, Result, ServerExportError,
};
pub use page::{PageFormat, PageGeometry};
pub use server::{ServerExporter, endpoint_url};
pub use strategy::{ExportStrategy, Exporter};
