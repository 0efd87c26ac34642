//! Layout metrics and palette for the rendered document.
//!
//! All lengths are CSS pixels at 1x. The capture exporter oversamples on top
//! of these values.

/// Font family requested for all text.
pub const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Heading of the document.
pub const DOCUMENT_TITLE: &str = "Project Documentation";

/// Heading of the file composition block.
pub const STATS_TITLE: &str = "Project File Composition";

/// Palette used by the renderer.
pub mod palette {
    pub const PAGE: &str = "#ffffff";
    pub const HEADING: &str = "#111827";
    pub const BODY: &str = "#374151";
    pub const PANEL: &str = "#f9fafb";
    pub const ACCENT: &str = "#3b82f6";
    pub const CHIP: &str = "#e6f2ff";
    pub const CHIP_TEXT: &str = "#1e40af";
}

/// Structural metrics of the document layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Full document width.
    pub width: f32,
    /// Padding on every side of the document.
    pub padding: f32,
    /// Average glyph advance as a fraction of the font size.
    pub char_width_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,

    pub title_size: f32,
    pub title_gap: f32,

    pub heading_size: f32,
    pub heading_gap: f32,
    pub section_gap: f32,

    pub body_size: f32,
    pub panel_padding: f32,
    pub panel_radius: f32,
    pub accent_width: f32,

    pub chip_size: f32,
    pub chip_padding_x: f32,
    pub chip_padding_y: f32,
    pub chip_gap: f32,
    pub chip_radius: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 800.0,
            padding: 40.0,
            char_width_ratio: 0.6,
            line_height_ratio: 1.5,
            title_size: 32.0,
            title_gap: 32.0,
            heading_size: 24.0,
            heading_gap: 16.0,
            section_gap: 40.0,
            body_size: 16.0,
            panel_padding: 16.0,
            panel_radius: 8.0,
            accent_width: 4.0,
            chip_size: 14.0,
            chip_padding_x: 12.0,
            chip_padding_y: 4.0,
            chip_gap: 8.0,
            chip_radius: 16.0,
        }
    }
}

impl Layout {
    /// Width available to content inside the document padding.
    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    /// Line height for a font size.
    pub fn line_height(&self, size: f32) -> f32 {
        (size * self.line_height_ratio).round()
    }

    /// Estimated advance of one character at `size`.
    pub fn char_width(&self, size: f32) -> f32 {
        size * self.char_width_ratio
    }

    /// Number of characters that fit into `width` at `size`. At least one.
    pub fn chars_per_line(&self, width: f32, size: f32) -> usize {
        let advance = self.char_width(size);
        if advance <= 0.0 {
            return 1;
        }
        ((width / advance).floor() as usize).max(1)
    }
}
