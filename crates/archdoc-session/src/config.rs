//! Deployment configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working local setup against an analyzer on `localhost:8000`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use archdoc_export::{
    ArtifactSink, CaptureExporter, CaptureOptions, ExportStrategy, Exporter, ServerExporter,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::AnalyzerClient;
use crate::error::ConfigError;

/// Overrides the analyzer base address.
pub const ANALYZER_URL_ENV: &str = "ARCHDOC_ANALYZER_URL";
/// Overrides the export server base address.
pub const EXPORT_URL_ENV: &str = "ARCHDOC_EXPORT_URL";

pub const DEFAULT_ANALYZER_URL: &str = "http://localhost:8000";
pub const DEFAULT_ANALYZE_PATH: &str = "/analyze-folder";
pub const DEFAULT_EXPORT_PATH: &str = "/download-pdf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub analyzer_base_url: String,
    pub analyze_path: String,
    /// Export server base address; the analyzer address when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_base_url: Option<String>,
    pub export_path: String,
    pub strategy: ExportStrategy,
    /// Applies to both analyzer and export requests.
    pub request_timeout_secs: u64,
    /// Directory receiving delivered documents; current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub capture: CaptureOptions,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            analyzer_base_url: DEFAULT_ANALYZER_URL.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            export_base_url: None,
            export_path: DEFAULT_EXPORT_PATH.to_string(),
            strategy: ExportStrategy::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: None,
            capture: CaptureOptions::default(),
        }
    }
}

impl DeploymentConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        debug!(path = %path.display(), "loaded deployment config");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Apply endpoint overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply endpoint overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_empty(ANALYZER_URL_ENV) {
            self.analyzer_base_url = url;
        }
        if let Some(url) = non_empty(EXPORT_URL_ENV) {
            self.export_base_url = Some(url);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn export_base_url(&self) -> &str {
        self.export_base_url
            .as_deref()
            .unwrap_or(&self.analyzer_base_url)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Client for the analyzer endpoint.
    pub fn analyzer(&self) -> Result<AnalyzerClient, ConfigError> {
        AnalyzerClient::new(
            &self.analyzer_base_url,
            &self.analyze_path,
            self.request_timeout(),
        )
        .map_err(|err| ConfigError::Invalid {
            field: "analyzer_base_url",
            message: err.to_string(),
        })
    }

    /// The exporter for the configured strategy.
    pub fn exporter(&self) -> Result<Exporter, ConfigError> {
        match self.strategy {
            ExportStrategy::Client => Ok(Exporter::Client(CaptureExporter::new(
                self.capture.clone(),
            ))),
            ExportStrategy::Server => ServerExporter::new(
                self.export_base_url(),
                &self.export_path,
                self.request_timeout(),
            )
            .map(Exporter::Server)
            .map_err(|err| ConfigError::Invalid {
                field: "export_base_url",
                message: err.to_string(),
            }),
        }
    }

    pub fn sink(&self) -> ArtifactSink {
        ArtifactSink::new(self.output_dir())
    }
}
