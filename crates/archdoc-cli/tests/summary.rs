//! Terminal summary and config loading.

use archdoc_cli::settings::load_config;
use archdoc_cli::summary::{section_outline, stats_table};
use archdoc_export::ExportStrategy;
use archdoc_model::{AnalysisResult, DocumentModel};
use serde_json::json;

fn document() -> DocumentModel {
    DocumentModel::build(&AnalysisResult::from_value(json!({
        "file_types_found": {".py": 3, ".js": 1},
        "architecture_analysis": {
            "Project Overview": "First line.\nSecond line.",
            "Release Notes": "Only one."
        }
    })))
}

#[test]
fn test_stats_table_keeps_received_order() {
    let rendered = stats_table(&document()).to_string();
    let py = rendered.find(".py").unwrap();
    let js = rendered.find(".js").unwrap();
    let total = rendered.find("TOTAL").unwrap();
    assert!(py < js && js < total);
    assert!(rendered.contains("75.0%"));
    assert!(rendered.contains("25.0%"));
}

#[test]
fn test_stats_table_for_empty_document() {
    let empty = DocumentModel::build(&AnalysisResult::default());
    let rendered = stats_table(&empty).to_string();
    assert!(rendered.contains("(none)"));
    assert!(!rendered.contains("100.0%"));
}

#[test]
fn test_section_outline_lists_icons() {
    assert_eq!(
        section_outline(&document()),
        " 1. 📋 Project Overview (2 lines)\n 2. 📝 Release Notes (1 line)\n"
    );
}

#[test]
fn test_explicit_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archdoc.toml");
    std::fs::write(&path, "strategy = \"server\"\nexport_path = \"/pdf\"\n").unwrap();

    let config = load_config(Some(&path)).unwrap();

    assert_eq!(config.strategy, ExportStrategy::Server);
    assert_eq!(config.export_path, "/pdf");
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
}
