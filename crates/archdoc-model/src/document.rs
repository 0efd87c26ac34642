//! Document model derived from an analysis result.
//!
//! A [`DocumentModel`] is built once per successful analysis and never mutated
//! afterwards. A new analysis produces a new model.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::analysis::AnalysisResult;
use crate::icons::section_icon;
use crate::stats::allocate_percentages;

/// One entry of the file composition block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    /// File-extension or category label as reported by the analyzer.
    pub label: String,
    /// Number of files with this label.
    pub count: u64,
    /// Share of all files as a percentage with one decimal place.
    ///
    /// This is a largest-remainder allocation, not a plain rounding of each
    /// share: the entries of one block always sum to exactly 100.0, so a
    /// three-way tie yields 33.4, 33.3 and 33.3.
    pub percentage: f64,
}

impl fmt::Display for StatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({:.1}%)", self.label, self.count, self.percentage)
    }
}

/// One prose section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text.
    pub title: String,
    /// Heading symbol resolved from the title.
    pub icon: &'static str,
    /// Prose body; may contain newlines.
    pub body: String,
}

/// Ordered, renderable content of the exported document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    stats: Vec<StatEntry>,
    sections: Vec<Section>,
    total_files: u64,
    #[serde(skip)]
    source_payload: Value,
}

impl DocumentModel {
    /// Build the document model. Pure and infallible.
    ///
    /// Stats and sections mirror the key order of the source mappings.
    pub fn build(result: &AnalysisResult) -> Self {
        let counts: Vec<u64> = result.file_types_found.values().copied().collect();
        let percentages = allocate_percentages(&counts);
        let stats = result
            .file_types_found
            .iter()
            .zip(percentages)
            .map(|((label, count), percentage)| StatEntry {
                label: label.clone(),
                count: *count,
                percentage,
            })
            .collect();

        let sections = result
            .architecture_analysis
            .iter()
            .map(|(title, body)| Section {
                title: title.clone(),
                icon: section_icon(title),
                body: body.clone(),
            })
            .collect();

        Self {
            stats,
            sections,
            total_files: result.total_files(),
            source_payload: result.raw().clone(),
        }
    }

    /// File composition entries in received order.
    pub fn stats(&self) -> &[StatEntry] {
        &self.stats
    }

    /// Prose sections in received order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sum of all stat counts.
    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    /// The analyzer payload this model was built from.
    pub fn source_payload(&self) -> &Value {
        &self.source_payload
    }

    /// True when there are neither stats nor sections.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.sections.is_empty()
    }
}

/// Convenience wrapper for [`DocumentModel::build`].
pub fn build(result: &AnalysisResult) -> DocumentModel {
    DocumentModel::build(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_entry_display() {
        let entry = StatEntry {
            label: ".py".to_string(),
            count: 3,
            percentage: 75.0,
        };
        insta::assert_snapshot!(entry.to_string(), @".py: 3 (75.0%)");
    }

    #[test]
    fn test_build_keeps_source_payload() {
        let payload = json!({
            "file_types_found": {"rust": 1},
            "architecture_analysis": {"Tech Stack": "Rust"},
            "total_files": 1
        });
        let document = build(&AnalysisResult::from_value(payload.clone()));
        assert_eq!(document.source_payload(), &payload);
        assert_eq!(document.total_files(), 1);
    }

    #[test]
    fn test_empty_result_builds_empty_document() {
        let document = build(&AnalysisResult::default());
        assert!(document.is_empty());
        assert!(document.stats().is_empty());
        assert!(document.sections().is_empty());
        assert_eq!(document.total_files(), 0);
    }
}
