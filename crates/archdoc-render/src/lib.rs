//! Section rendering for project documentation.
//!
//! The renderer turns a [`DocumentModel`](archdoc_model::DocumentModel) into a
//! display list of measured units ([`RenderedUnit`]). The same display list
//! feeds on-screen display ([`to_svg`]) and raster capture for PDF export.
//!
//! Layout is computed from character counts instead of font metrics so a given
//! document always produces the same geometry.

pub mod document;
pub mod error;
pub mod section;
pub mod svg;
pub mod text;
pub mod theme;
pub mod unit;

pub use document::{PlacedUnit, RenderedDocument, render_document, render_document_with};
pub use error::{RenderError, Result};
pub use section::SectionRenderer;
pub use svg::to_svg;
pub use theme::Layout;
pub use unit::{FontWeight, Primitive, RenderedUnit, TextAnchor, UnitKind};
