//! Tolerant decoding of the analyzer success payload.
//!
//! The analyzer is an LLM-backed service, so its output shape is only loosely
//! guaranteed. Every field is optional: a missing or mistyped mapping becomes an
//! empty mapping, and individual malformed entries are dropped with a warning.
//! Key order is preserved exactly as received.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{ModelError, Result};

/// Payload field holding the file-type histogram.
pub const FILE_TYPES_FIELD: &str = "file_types_found";

/// Payload field holding the prose sections.
pub const ARCHITECTURE_FIELD: &str = "architecture_analysis";

/// Largest float that still converts to an integer count without precision loss.
const MAX_EXACT_FLOAT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Decoded analyzer response.
///
/// Keeps the raw payload alongside the decoded mappings so that the exact
/// response (including fields this crate does not understand) can be echoed
/// back to the export server.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// File-extension label to file count, in received order.
    pub file_types_found: IndexMap<String, u64>,
    /// Section title to prose body, in received order.
    pub architecture_analysis: IndexMap<String, String>,
    raw: Value,
}

impl AnalysisResult {
    /// Build a result from already-decoded mappings.
    ///
    /// The raw payload is synthesized from the two mappings.
    pub fn from_parts(
        file_types_found: IndexMap<String, u64>,
        architecture_analysis: IndexMap<String, String>,
    ) -> Self {
        let mut raw = Map::new();
        raw.insert(
            FILE_TYPES_FIELD.to_string(),
            Value::Object(
                file_types_found
                    .iter()
                    .map(|(label, count)| (label.clone(), Value::from(*count)))
                    .collect(),
            ),
        );
        raw.insert(
            ARCHITECTURE_FIELD.to_string(),
            Value::Object(
                architecture_analysis
                    .iter()
                    .map(|(title, body)| (title.clone(), Value::String(body.clone())))
                    .collect(),
            ),
        );
        Self {
            file_types_found,
            architecture_analysis,
            raw: Value::Object(raw),
        }
    }

    /// Decode a payload value. Never fails.
    pub fn from_value(raw: Value) -> Self {
        let Some(object) = raw.as_object() else {
            warn!("analyzer payload is not a JSON object; treating it as empty");
            return Self {
                file_types_found: IndexMap::new(),
                architecture_analysis: IndexMap::new(),
                raw,
            };
        };
        let file_types_found = decode_counts(object.get(FILE_TYPES_FIELD));
        let architecture_analysis = decode_sections(object.get(ARCHITECTURE_FIELD));
        Self {
            file_types_found,
            architecture_analysis,
            raw,
        }
    }

    /// Decode a payload from response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidJson`] when the bytes are not JSON at all.
    /// Any JSON document is accepted.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(bytes).map_err(ModelError::InvalidJson)?;
        Ok(Self::from_value(raw))
    }

    /// The payload exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Sum of all file counts.
    pub fn total_files(&self) -> u64 {
        self.file_types_found
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::from_parts(IndexMap::new(), IndexMap::new())
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

fn field_object<'a>(value: Option<&'a Value>, field: &str) -> Option<&'a Map<String, Value>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            warn!(field, kind = value_kind(other), "expected an object; ignoring field");
            None
        }
    }
}

fn decode_counts(value: Option<&Value>) -> IndexMap<String, u64> {
    let Some(map) = field_object(value, FILE_TYPES_FIELD) else {
        return IndexMap::new();
    };
    map.iter()
        .filter_map(|(label, count)| match count_value(count) {
            Some(count) => Some((label.clone(), count)),
            None => {
                warn!(label = %label, value = %count, "dropping malformed file count");
                None
            }
        })
        .collect()
}

fn decode_sections(value: Option<&Value>) -> IndexMap<String, String> {
    let Some(map) = field_object(value, ARCHITECTURE_FIELD) else {
        return IndexMap::new();
    };
    map.iter()
        .filter_map(|(title, body)| match body {
            Value::String(text) => Some((title.clone(), text.clone())),
            other => {
                warn!(title = %title, kind = value_kind(other), "dropping non-text section body");
                None
            }
        })
        .collect()
}

/// Accept non-negative integers, including whole floats such as `3.0`.
fn count_value(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let float = value.as_f64()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= MAX_EXACT_FLOAT_COUNT
    {
        Some(float as u64)
    } else {
        None
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_preserves_received_order() {
        let result = AnalysisResult::from_value(json!({
            "file_types_found": {"web": 4, "python": 9, "config": 1},
            "architecture_analysis": {"Tech Stack": "b", "Project Overview": "a"}
        }));
        let labels: Vec<&str> = result.file_types_found.keys().map(String::as_str).collect();
        assert_eq!(labels, ["web", "python", "config"]);
        let titles: Vec<&str> = result
            .architecture_analysis
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(titles, ["Tech Stack", "Project Overview"]);
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let result = AnalysisResult::from_value(json!({"total_files": 3}));
        assert!(result.file_types_found.is_empty());
        assert!(result.architecture_analysis.is_empty());
        assert_eq!(result.raw()["total_files"], 3);
    }

    #[test]
    fn test_non_object_payload_is_empty() {
        let result = AnalysisResult::from_value(json!(["not", "an", "object"]));
        assert!(result.file_types_found.is_empty());
        assert!(result.architecture_analysis.is_empty());
    }

    #[test]
    fn test_mistyped_mapping_is_ignored() {
        let result = AnalysisResult::from_value(json!({
            "file_types_found": "python",
            "architecture_analysis": null
        }));
        assert!(result.file_types_found.is_empty());
        assert!(result.architecture_analysis.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_dropped_individually() {
        let result = AnalysisResult::from_value(json!({
            "file_types_found": {"a": 1, "b": -2, "c": 2.0, "d": 1.5, "e": "3"},
            "architecture_analysis": {"One": "text", "Two": 7, "Three": ["x"]}
        }));
        let counts: Vec<(&str, u64)> = result
            .file_types_found
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(counts, [("a", 1), ("c", 2)]);
        assert_eq!(result.architecture_analysis.len(), 1);
        assert_eq!(result.architecture_analysis["One"], "text");
    }

    #[test]
    fn test_from_slice_rejects_non_json() {
        assert!(AnalysisResult::from_slice(b"<html>oops</html>").is_err());
        assert!(AnalysisResult::from_slice(b"{}").is_ok());
    }

    #[test]
    fn test_serialize_echoes_raw_payload() {
        let payload = json!({
            "file_types_found": {"python": 2},
            "architecture_analysis": {},
            "total_files": 2
        });
        let result: AnalysisResult = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }

    #[test]
    fn test_total_files_saturates() {
        let result = AnalysisResult::from_value(json!({
            "file_types_found": {"a": u64::MAX, "b": 5}
        }));
        assert_eq!(result.total_files(), u64::MAX);
    }
}
