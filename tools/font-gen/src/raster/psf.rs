//! Rasterization of PC Screen Fonts.
//!
//! A PSF font has a single size, so the requested size is ignored and every glyph is stamped
//! exactly as stored. Rows are packed most significant bit first.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use atlas::canvas::{Canvas, Point};
use simple_psf::Psf;

use crate::raster::plot;

/// A bitmap font with an owned copy of its glyph data.
pub struct BitmapFont {
    /// The width of every glyph in pixels.
    width: usize,
    /// The height of every glyph in pixels.
    height: usize,
    /// The packed bitmaps of every glyph, one after the other.
    glyphs: Vec<u8>,
    /// Maps characters to glyph indices.
    map: HashMap<char, usize>,
}

impl BitmapFont {
    /// Parses the PSF font contained in `bytes`.
    ///
    /// Only unicode table entries consisting of a single character are used. A font without a
    /// unicode table maps each glyph index to the character with the same code point.
    ///
    /// # Errors
    ///
    /// Returns an error when `bytes` is not a valid PSF font.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let font = Psf::parse(bytes).map_err(|_| anyhow!("invalid PSF font"))?;

        let width = font.glyph_width as usize;
        let height = font.glyph_height as usize;
        let glyph_size = width.div_ceil(8) * height;
        if glyph_size == 0 {
            return Err(anyhow!("PSF font has empty glyphs"));
        }

        let glyphs = font.glyphs.to_vec();
        let glyph_count = glyphs.len() / glyph_size;

        let mut map = HashMap::new();
        for (glyph_index, string) in font.iter_unicode_entries().into_iter().flatten() {
            let Ok(string) = string else {
                continue;
            };

            let glyph_index = glyph_index as usize;
            let mut chars = string.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if glyph_index < glyph_count {
                    map.entry(c).or_insert(glyph_index);
                }
            }
        }

        if map.is_empty() {
            map.extend(
                (0..glyph_count)
                    .filter_map(|index| Some((char::from_u32(u32::try_from(index).ok()?)?, index))),
            );
        }

        Ok(Self {
            width,
            height,
            glyphs,
            map,
        })
    }

    /// Returns the packed bitmap of the glyph for `c`.
    fn glyph(&self, c: char) -> Option<&[u8]> {
        let glyph_size = self.width.div_ceil(8) * self.height;
        let index = *self.map.get(&c)?;

        self.glyphs.get(index * glyph_size..(index + 1) * glyph_size)
    }

    /// Draws `text` with the upper left corner of its line at `origin`.
    ///
    /// Characters without a glyph leave a blank cell.
    pub fn render(&self, text: &str, origin: Point, canvas: &mut dyn Canvas) {
        let row_size = self.width.div_ceil(8);

        let mut left = origin.x as i64;
        for c in text.chars() {
            if let Some(glyph) = self.glyph(c) {
                for (row, bytes) in glyph.chunks(row_size).enumerate() {
                    for column in 0..self.width {
                        if bytes[column / 8] & (0x80 >> (column % 8)) != 0 {
                            plot(canvas, left + column as i64, (origin.y + row) as i64);
                        }
                    }
                }
            }

            left += self.width as i64;
        }
    }
}
