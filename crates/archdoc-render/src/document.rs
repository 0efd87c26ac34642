//! Stacks rendered units into a full document.

use archdoc_model::DocumentModel;
use tracing::debug;

use crate::section::SectionRenderer;
use crate::theme::Layout;
use crate::unit::RenderedUnit;

/// A unit placed at its vertical offset in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit {
    pub offset_y: f32,
    pub unit: RenderedUnit,
}

/// The rendered document: title, stats block and sections, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    width: f32,
    height: f32,
    units: Vec<PlacedUnit>,
}

impl RenderedDocument {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn units(&self) -> &[PlacedUnit] {
        &self.units
    }
}

/// Render a document model with the default layout.
pub fn render_document(document: &DocumentModel) -> RenderedDocument {
    render_document_with(document, &SectionRenderer::default())
}

/// Render a document model with a specific renderer.
pub fn render_document_with(
    document: &DocumentModel,
    renderer: &SectionRenderer,
) -> RenderedDocument {
    let layout: &Layout = renderer.layout();
    let mut units = Vec::with_capacity(document.sections().len() + 2);
    units.push(renderer.render_title());
    units.push(renderer.render_stats(document.stats()));
    units.extend(
        document
            .sections()
            .iter()
            .map(|section| renderer.render_section(section)),
    );

    let mut placed = Vec::with_capacity(units.len());
    let mut y = layout.padding;
    let count = units.len();
    for (index, unit) in units.into_iter().enumerate() {
        let advance = if index + 1 == count {
            unit.height
        } else {
            unit.height + unit.margin_bottom
        };
        placed.push(PlacedUnit { offset_y: y, unit });
        y += advance;
    }
    let height = (y + layout.padding).ceil();
    debug!(
        units = placed.len(),
        width = layout.width,
        height,
        "rendered document"
    );

    RenderedDocument {
        width: layout.width,
        height,
        units: placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitKind;
    use archdoc_model::AnalysisResult;
    use serde_json::json;

    #[test]
    fn test_empty_document_has_title_and_stats() {
        let rendered = render_document(&DocumentModel::build(&AnalysisResult::default()));
        let kinds: Vec<UnitKind> = rendered.units().iter().map(|p| p.unit.kind).collect();
        assert_eq!(kinds, [UnitKind::Title, UnitKind::Stats]);
        // padding 40 + title 48 + gap 32 + stats 84 + padding 40
        assert_eq!(rendered.height(), 244.0);
        assert_eq!(rendered.width(), 800.0);
    }

    #[test]
    fn test_units_follow_section_order_without_overlap() {
        let result = AnalysisResult::from_value(json!({
            "file_types_found": {"python": 2},
            "architecture_analysis": {
                "Project Overview": "overview",
                "Tech Stack": "stack",
                "Future Improvements": "later"
            }
        }));
        let rendered = render_document(&DocumentModel::build(&result));
        let kinds: Vec<UnitKind> = rendered.units().iter().map(|p| p.unit.kind).collect();
        assert_eq!(
            kinds,
            [
                UnitKind::Title,
                UnitKind::Stats,
                UnitKind::Section,
                UnitKind::Section,
                UnitKind::Section
            ]
        );
        let headings: Vec<&str> = rendered.units()[2..]
            .iter()
            .filter_map(|p| p.unit.text_lines().next())
            .collect();
        assert_eq!(
            headings,
            ["📋 Project Overview", "💻 Tech Stack", "🚀 Future Improvements"]
        );
        for pair in rendered.units().windows(2) {
            let end = pair[0].offset_y + pair[0].unit.height;
            assert!(pair[1].offset_y >= end);
        }
    }
}
