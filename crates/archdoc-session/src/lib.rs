//! Session state, analyzer access and export coordination.
//!
//! [`Session`] is the pure state machine; it performs no I/O and can be
//! driven directly in tests. [`ExportCoordinator`] wraps a session together
//! with the [`AnalyzerClient`], the configured exporter and the artifact
//! sink, and turns every I/O result into a transition.

pub mod analyzer;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod state;

pub use analyzer::{AnalyzerClient, normalize_source_path};
pub use config::{ANALYZER_URL_ENV, DeploymentConfig, EXPORT_URL_ENV};
pub use coordinator::{Delivery, ExportCoordinator};
pub use error::{AnalyzerError, ConfigError};
pub use state::{
    ExportJob, ExportTicket, JobStatus, Outcome, Session, SessionState, SubmitRejected,
    SubmitTicket, View,
};
