//! Physical page geometry for paginated capture.

use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Portrait page formats supported for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Width and height in millimetres, portrait.
    pub const fn size_mm(self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }

    /// Width and height in PDF points, portrait.
    pub fn size_pt(self) -> (f32, f32) {
        let (width, height) = self.size_mm();
        (mm_to_pt(width), mm_to_pt(height))
    }
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// A page format with a uniform margin on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    format: PageFormat,
    margin_mm: f32,
}

impl PageGeometry {
    pub fn new(format: PageFormat, margin_mm: f32) -> Result<Self, CaptureError> {
        let (width, height) = format.size_mm();
        if !margin_mm.is_finite() || margin_mm < 0.0 || 2.0 * margin_mm >= width.min(height) {
            return Err(CaptureError::InvalidMargin { margin_mm });
        }
        Ok(Self { format, margin_mm })
    }

    pub fn format(&self) -> PageFormat {
        self.format
    }

    pub fn margin_mm(&self) -> f32 {
        self.margin_mm
    }

    /// Printable area in millimetres.
    pub fn printable_mm(&self) -> (f32, f32) {
        let (width, height) = self.format.size_mm();
        (width - 2.0 * self.margin_mm, height - 2.0 * self.margin_mm)
    }

    /// Height in raster pixels of one page band, for a raster `raster_width` wide.
    ///
    /// The raster is scaled to fill the printable width, so a band is the
    /// printable height expressed in the same pixel scale.
    pub fn band_height_px(&self, raster_width: u32) -> u32 {
        let (printable_w, printable_h) = self.printable_mm();
        let band = (printable_h * raster_width as f32 / printable_w).floor();
        (band as u32).max(1)
    }

    /// Split a raster of `raster_height` rows into page bands `(top, height)`.
    ///
    /// Always yields at least one band.
    pub fn bands(&self, raster_width: u32, raster_height: u32) -> Vec<(u32, u32)> {
        let band = self.band_height_px(raster_width);
        let mut bands = Vec::new();
        let mut top = 0;
        while top < raster_height {
            let height = band.min(raster_height - top);
            bands.push((top, height));
            top += height;
        }
        if bands.is_empty() {
            bands.push((0, raster_height.max(1)));
        }
        bands
    }
}
