//! Display-list units produced by the section renderer.

/// Font weight of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::Normal => "400",
            Self::Bold => "700",
        }
    }
}

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// A drawing operation, positioned relative to the top-left of its unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: &'static str,
    },
    /// A single line of text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        anchor: TextAnchor,
        fill: &'static str,
        content: String,
    },
}

/// Which part of the document a unit renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Title,
    Stats,
    Section,
}

/// A self-contained, measured visual block.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedUnit {
    pub kind: UnitKind,
    /// Visual height of the unit, excluding the space that follows it.
    pub height: f32,
    /// Space reserved below the unit when it is not the last one.
    pub margin_bottom: f32,
    pub primitives: Vec<Primitive>,
}

impl RenderedUnit {
    /// Text content of the unit, one entry per drawn line.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text { content, .. } => Some(content.as_str()),
            Primitive::Rect { .. } => None,
        })
    }
}
