//! Rasterization of TrueType and OpenType fonts.

use anyhow::{Result, anyhow};
use atlas::canvas::{Canvas, Point};
use fontdue::{Font, FontSettings};

use crate::raster::plot;

/// Coverage at or above which a pixel is considered foreground.
pub const COVERAGE_THRESHOLD: u8 = 128;

/// The resolution at which point sizes are converted to pixels.
pub const DPI: f32 = 96.0;

/// An outline font rendered without anti-aliasing.
pub struct OutlineFont {
    /// The parsed font.
    font: Font,
}

impl OutlineFont {
    /// Parses the TrueType or OpenType font contained in `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error when `bytes` is not a supported font.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|error| anyhow!("invalid outline font: {error}"))?;

        Ok(Self { font })
    }

    /// Draws `text` at `size` points with the upper left corner of its line at `origin`.
    pub fn render(&self, text: &str, size: f32, origin: Point, canvas: &mut dyn Canvas) {
        let px = points_to_pixels(size);
        let ascent = self
            .font
            .horizontal_line_metrics(px)
            .map_or(px, |metrics| metrics.ascent);
        let baseline = origin.y as f32 + ascent.ceil();

        let mut pen = origin.x as f32;
        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, px);

            let left = pen.round() as i64 + i64::from(metrics.xmin);
            let top = baseline as i64 - (metrics.height as i64 + i64::from(metrics.ymin));
            for (index, &value) in coverage.iter().enumerate() {
                if value >= COVERAGE_THRESHOLD {
                    let x = left + (index % metrics.width) as i64;
                    let y = top + (index / metrics.width) as i64;
                    plot(canvas, x, y);
                }
            }

            pen += metrics.advance_width;
        }
    }
}

/// Converts a size in points to pixels at [`DPI`].
pub fn points_to_pixels(size: f32) -> f32 {
    size * DPI / 72.0
}
