//! Renders document parts into measured display-list units.
//!
//! Every unit has the same structural shape: a heading (with its symbol) and a
//! shaded body panel. Output depends only on the input and the [`Layout`], so
//! repeated renders are identical.

use archdoc_model::{STATS_ICON, Section, StatEntry};

use crate::text::{truncate, wrap_text};
use crate::theme::{DOCUMENT_TITLE, Layout, STATS_TITLE, palette};
use crate::unit::{FontWeight, Primitive, RenderedUnit, TextAnchor, UnitKind};

/// Section renderer bound to a layout.
#[derive(Debug, Clone, Default)]
pub struct SectionRenderer {
    layout: Layout,
}

impl SectionRenderer {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Centered document title.
    pub fn render_title(&self) -> RenderedUnit {
        let layout = &self.layout;
        let line_height = layout.line_height(layout.title_size);
        let max_chars = layout.chars_per_line(layout.content_width(), layout.title_size);
        let mut primitives = Vec::new();
        let mut y = 0.0;
        for line in wrap_text(DOCUMENT_TITLE, max_chars) {
            primitives.push(Primitive::Text {
                x: layout.width / 2.0,
                y: y + baseline(layout.title_size, line_height),
                size: layout.title_size,
                weight: FontWeight::Bold,
                anchor: TextAnchor::Middle,
                fill: palette::HEADING,
                content: line,
            });
            y += line_height;
        }
        RenderedUnit {
            kind: UnitKind::Title,
            height: y,
            margin_bottom: layout.title_gap,
            primitives,
        }
    }

    /// File composition block: heading plus one chip per entry.
    pub fn render_stats(&self, stats: &[StatEntry]) -> RenderedUnit {
        let layout = &self.layout;
        let heading = format!("{STATS_ICON} {STATS_TITLE}");
        let (mut primitives, heading_height) = self.heading(&heading);

        let panel_top = heading_height + layout.heading_gap;
        let inner_left = layout.padding + layout.panel_padding;
        let inner_width = (layout.content_width() - 2.0 * layout.panel_padding).max(0.0);
        let chip_line = layout.line_height(layout.chip_size);
        let chip_height = chip_line + 2.0 * layout.chip_padding_y;
        let max_chip_chars = layout.chars_per_line(
            (inner_width - 2.0 * layout.chip_padding_x).max(0.0),
            layout.chip_size,
        );

        let mut chips = Vec::with_capacity(stats.len() * 2);
        let mut x = 0.0f32;
        let mut row = 0usize;
        for entry in stats {
            let label = truncate(&entry.to_string(), max_chip_chars);
            let text_width = label.chars().count() as f32 * layout.char_width(layout.chip_size);
            let chip_width = (text_width + 2.0 * layout.chip_padding_x).min(inner_width);
            if x > 0.0 && x + chip_width > inner_width {
                x = 0.0;
                row += 1;
            }
            let chip_x = inner_left + x;
            let chip_y = panel_top
                + layout.panel_padding
                + row as f32 * (chip_height + layout.chip_gap);
            chips.push(Primitive::Rect {
                x: chip_x,
                y: chip_y,
                width: chip_width,
                height: chip_height,
                radius: layout.chip_radius,
                fill: palette::CHIP,
            });
            chips.push(Primitive::Text {
                x: chip_x + layout.chip_padding_x,
                y: chip_y + layout.chip_padding_y + baseline(layout.chip_size, chip_line),
                size: layout.chip_size,
                weight: FontWeight::Normal,
                anchor: TextAnchor::Start,
                fill: palette::CHIP_TEXT,
                content: label,
            });
            x += chip_width + layout.chip_gap;
        }

        let rows = if stats.is_empty() { 0 } else { row + 1 };
        let chips_height = if rows == 0 {
            0.0
        } else {
            rows as f32 * chip_height + (rows - 1) as f32 * layout.chip_gap
        };
        let panel_height = chips_height + 2.0 * layout.panel_padding;
        primitives.push(self.panel(panel_top, panel_height));
        primitives.extend(chips);

        RenderedUnit {
            kind: UnitKind::Stats,
            height: panel_top + panel_height,
            margin_bottom: layout.section_gap,
            primitives,
        }
    }

    /// Prose section: icon heading plus pre-wrapped body with an accent bar.
    pub fn render_section(&self, section: &Section) -> RenderedUnit {
        let layout = &self.layout;
        let heading = format!("{} {}", section.icon, section.title);
        let (mut primitives, heading_height) = self.heading(&heading);

        let panel_top = heading_height + layout.heading_gap;
        let text_left = layout.padding + layout.accent_width + layout.panel_padding;
        let text_width =
            (layout.content_width() - layout.accent_width - 2.0 * layout.panel_padding).max(0.0);
        let line_height = layout.line_height(layout.body_size);
        let lines = wrap_text(
            &section.body,
            layout.chars_per_line(text_width, layout.body_size),
        );
        let panel_height = lines.len() as f32 * line_height + 2.0 * layout.panel_padding;

        primitives.push(self.panel(panel_top, panel_height));
        primitives.push(Primitive::Rect {
            x: layout.padding,
            y: panel_top,
            width: layout.accent_width,
            height: panel_height,
            radius: 0.0,
            fill: palette::ACCENT,
        });
        let mut y = panel_top + layout.panel_padding;
        for line in lines {
            if !line.is_empty() {
                primitives.push(Primitive::Text {
                    x: text_left,
                    y: y + baseline(layout.body_size, line_height),
                    size: layout.body_size,
                    weight: FontWeight::Normal,
                    anchor: TextAnchor::Start,
                    fill: palette::BODY,
                    content: line,
                });
            }
            y += line_height;
        }

        RenderedUnit {
            kind: UnitKind::Section,
            height: panel_top + panel_height,
            margin_bottom: layout.section_gap,
            primitives,
        }
    }

    fn heading(&self, text: &str) -> (Vec<Primitive>, f32) {
        let layout = &self.layout;
        let line_height = layout.line_height(layout.heading_size);
        let max_chars = layout.chars_per_line(layout.content_width(), layout.heading_size);
        let mut primitives = Vec::new();
        let mut y = 0.0;
        for line in wrap_text(text, max_chars) {
            primitives.push(Primitive::Text {
                x: layout.padding,
                y: y + baseline(layout.heading_size, line_height),
                size: layout.heading_size,
                weight: FontWeight::Bold,
                anchor: TextAnchor::Start,
                fill: palette::HEADING,
                content: line,
            });
            y += line_height;
        }
        (primitives, y)
    }

    fn panel(&self, top: f32, height: f32) -> Primitive {
        Primitive::Rect {
            x: self.layout.padding,
            y: top,
            width: self.layout.content_width(),
            height,
            radius: self.layout.panel_radius,
            fill: palette::PANEL,
        }
    }
}

/// Baseline offset that vertically centers a glyph run inside its line box.
fn baseline(size: f32, line_height: f32) -> f32 {
    ((line_height - size) / 2.0 + size * 0.8).round()
}
