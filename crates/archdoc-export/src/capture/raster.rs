//! SVG to raster conversion.

use std::path::Path;

use image::{ImageBuffer, RgbaImage};
use resvg::tiny_skia::{self, Color, Pixmap};
use resvg::usvg::fontdb::{Database, Family, Query};
use resvg::usvg::{Options, Tree};
use tracing::{debug, warn};

use crate::error::CaptureError;

/// Family name of the bundled faces; generic `sans-serif` resolves to it.
const BUNDLED_SANS_FAMILY: &str = "DejaVu Sans";

const BUNDLED_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BUNDLED_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Font database setup for one capture.
///
/// The bundled faces are always present. `font_file` is loaded next and
/// system fonts last. Fails when no entry of `families` resolves.
pub(crate) fn options(
    font_file: Option<&Path>,
    families: &str,
) -> Result<Options<'static>, CaptureError> {
    let mut options = Options::default();
    let fontdb = options.fontdb_mut();
    fontdb.load_font_data(BUNDLED_SANS.to_vec());
    fontdb.load_font_data(BUNDLED_SANS_BOLD.to_vec());
    if let Some(path) = font_file {
        fontdb
            .load_font_file(path)
            .map_err(|err| CaptureError::Font {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
    }
    fontdb.load_system_fonts();
    fontdb.set_sans_serif_family(BUNDLED_SANS_FAMILY);
    debug!(faces = fontdb.len(), "font database ready");

    if !resolves(fontdb, families) {
        warn!(families, "no loaded font face matches");
        return Err(CaptureError::NoFont {
            families: families.to_string(),
        });
    }
    Ok(options)
}

/// Whether any family of a CSS `font-family` list maps to a loaded face.
fn resolves(db: &Database, families: &str) -> bool {
    families
        .split(',')
        .map(|name| name.trim().trim_matches(['"', '\'']))
        .filter(|name| !name.is_empty())
        .any(|name| {
            let family = match name {
                "serif" => Family::Serif,
                "sans-serif" => Family::SansSerif,
                "monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                other => Family::Name(other),
            };
            db.query(&Query {
                families: &[family],
                ..Query::default()
            })
            .is_some()
        })
}

/// A parsed document that renders one horizontal band at a time.
pub(crate) struct Raster {
    tree: Tree,
    scale: f32,
    width: u32,
    height: u32,
}

impl Raster {
    /// Parse an SVG document to be rasterized at `scale` times its natural size.
    pub(crate) fn parse(
        svg: &str,
        scale: f32,
        options: &Options<'_>,
    ) -> Result<Self, CaptureError> {
        let tree =
            Tree::from_str(svg, options).map_err(|err| CaptureError::Parse(err.to_string()))?;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        Ok(Self {
            tree,
            scale,
            width,
            height,
        })
    }

    /// Full raster size in pixels.
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render rows `top..top + height` of the full raster on white.
    pub(crate) fn band(&self, top: u32, height: u32) -> Result<RgbaImage, CaptureError> {
        let width = self.width;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CaptureError::Raster { width, height })?;
        pixmap.fill(Color::WHITE);
        let transform = tiny_skia::Transform::from_scale(self.scale, self.scale)
            .post_translate(0.0, -(top as f32));
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        debug!(width, height, top, scale = self.scale, "rasterized band");

        ImageBuffer::from_raw(width, height, pixmap.take())
            .ok_or(CaptureError::Raster { width, height })
    }
}
