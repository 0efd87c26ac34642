//! Analysis payload and document model for project documentation.
//!
//! - [`AnalysisResult`]: shape-tolerant decoding of the analyzer response
//! - [`DocumentModel`]: the ordered stats block and prose sections that every
//!   renderer and exporter works from

pub mod analysis;
pub mod document;
pub mod error;
pub mod icons;
pub mod stats;

pub use analysis::{ARCHITECTURE_FIELD, AnalysisResult, FILE_TYPES_FIELD};
pub use document::{DocumentModel, Section, StatEntry, build};
pub use error::{ModelError, Result};
pub use icons::{DEFAULT_ICON, STATS_ICON, section_icon};
pub use stats::allocate_percentages;
