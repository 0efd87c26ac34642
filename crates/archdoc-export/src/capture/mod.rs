//! Client-side capture: rasterize the rendered document and paginate it into a PDF.
//!
//! The pipeline runs entirely in-process:
//!
//! 1. serialize the rendered document as SVG and parse it against the bundled
//!    fonts, an optional configured font and the system fonts;
//! 2. split the full raster height, at an oversampling factor of at least 2x,
//!    into bands that fill the printable area of one page;
//! 3. rasterize each band on white, encode it as a JPEG page image and
//!    assemble the pages into one PDF.
//!
//! Only one page band is held in memory at a time.
//!
//! Any failure aborts the whole capture; no partial document is returned.

mod pdf;
mod raster;

use std::path::PathBuf;

use archdoc_render::theme::FONT_FAMILY;
use archdoc_render::{RenderedDocument, to_svg};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::artifact::Artifact;
use crate::error::CaptureError;
use crate::page::{PageFormat, PageGeometry};
use pdf::PageBand;

/// Smallest accepted oversampling factor.
pub const MIN_SCALE: f32 = 2.0;

/// Capture settings. Fixed per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Oversampling factor; values below 2.0 are raised to 2.0.
    pub scale: f32,
    pub page_format: PageFormat,
    /// Margin on every side of the page.
    pub margin_mm: f32,
    /// JPEG quality of page images, 1 to 100.
    pub jpeg_quality: u8,
    /// Extra font loaded after the bundled faces and before system fonts.
    pub font_file: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            page_format: PageFormat::A4,
            margin_mm: 10.0,
            jpeg_quality: 98,
            font_file: None,
        }
    }
}

impl CaptureOptions {
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() {
            self.scale.max(MIN_SCALE)
        } else {
            MIN_SCALE
        }
    }

    fn effective_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

/// Stateless capture exporter; each call owns all of its intermediate buffers.
#[derive(Debug, Clone, Default)]
pub struct CaptureExporter {
    options: CaptureOptions,
}

impl CaptureExporter {
    pub fn new(options: CaptureOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Capture the rendered document as a paginated PDF artifact.
    ///
    /// This is CPU-bound; async callers should run it on a blocking thread.
    pub fn export(&self, document: &RenderedDocument) -> Result<Artifact, CaptureError> {
        let geometry = PageGeometry::new(self.options.page_format, self.options.margin_mm)?;
        let svg = to_svg(document)?;
        let options = raster::options(self.options.font_file.as_deref(), FONT_FAMILY)?;
        let raster = raster::Raster::parse(&svg, self.options.effective_scale(), &options)?;
        let (width, height) = raster.dimensions();

        let quality = self.options.effective_quality();
        let bands = geometry
            .bands(width, height)
            .into_iter()
            .enumerate()
            .map(|(page, (top, band_height))| {
                let band = raster.band(top, band_height)?;
                let rgb = DynamicImage::ImageRgba8(band).to_rgb8();
                let mut jpeg = Vec::new();
                JpegEncoder::new_with_quality(&mut jpeg, quality)
                    .encode_image(&rgb)
                    .map_err(|err| CaptureError::Encode {
                        page: page + 1,
                        message: err.to_string(),
                    })?;
                debug!(page = page + 1, top, band_height, bytes = jpeg.len(), "encoded page");
                Ok(PageBand {
                    jpeg,
                    width_px: width,
                    height_px: band_height,
                })
            })
            .collect::<Result<Vec<_>, CaptureError>>()?;

        let page_count = bands.len();
        let bytes = pdf::assemble(bands, &geometry, archdoc_render::theme::DOCUMENT_TITLE)?;
        info!(pages = page_count, bytes = bytes.len(), "captured document");
        Ok(Artifact::new(bytes, Some(page_count)))
    }
}
