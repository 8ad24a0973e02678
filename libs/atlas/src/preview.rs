//! Composition of extracted glyphs into sample text.
//!
//! Previews exist for visual sanity checks only. Characters are placed left to right, each
//! advancing the cursor by its rightmost x offset plus a fixed gap.

use alloc::vec::Vec;

use crate::{
    canvas::{Canvas, Point, point_in_bounds},
    glyph::FontGlyphs,
};

/// The text rendered when no other sample is configured.
pub const DEFAULT_SAMPLE: &str = "Ore outpost #4";

/// Settings controlling how a preview is composed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Pixels left blank between two characters.
    pub gap: i32,
    /// The advance of a space, overriding the one inferred from
    /// [`PreviewOptions::space_reference`].
    pub space_width: Option<i32>,
    /// The character whose rightmost x offset stands in for the width of a space.
    pub space_reference: char,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            gap: 2,
            space_width: None,
            space_reference: '.',
        }
    }
}

/// The outcome of composing a preview.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Preview {
    /// The x position of the cursor after the last character.
    pub advance: i32,
    /// Characters of the sample that have no glyph, in order of appearance.
    pub missing: Vec<char>,
}

/// Returns the advance used for a space in `glyphs`.
///
/// [`PreviewOptions::space_width`] wins when set. Otherwise the rightmost x offset of
/// [`PreviewOptions::space_reference`] is used, or zero when that glyph is absent or empty.
pub fn space_width(glyphs: &FontGlyphs, options: &PreviewOptions) -> i32 {
    options
        .space_width
        .or_else(|| {
            glyphs
                .get(options.space_reference)
                .and_then(|glyph| glyph.max_x())
        })
        .unwrap_or(0)
}

/// Clears `canvas` and stamps `text` onto it using `glyphs`, starting at the left edge.
///
/// Pixels falling outside of `canvas` are dropped. Characters without a glyph advance like a
/// space and are reported in [`Preview::missing`].
pub fn compose<C: Canvas + ?Sized>(
    glyphs: &FontGlyphs,
    text: &str,
    options: &PreviewOptions,
    canvas: &mut C,
) -> Preview {
    canvas.clear();

    let space = space_width(glyphs, options);
    let mut cursor = 0i32;
    let mut missing = Vec::new();
    for c in text.chars() {
        let width = if c == ' ' {
            space
        } else if let Some(glyph) = glyphs.get(c) {
            let mut width = 0;
            for offset in glyph.offsets() {
                stamp(canvas, cursor.saturating_add(offset.x), offset.y);
                width = width.max(offset.x);
            }
            width
        } else {
            if !missing.contains(&c) {
                log::warn!("no glyph for {c:?}, advancing by a space");
                missing.push(c);
            }
            space
        };

        cursor = cursor.saturating_add(width).saturating_add(options.gap);
    }

    Preview {
        advance: cursor,
        missing,
    }
}

/// Marks the pixel at (`x`, `y`) if it lies on `canvas`.
fn stamp<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32) {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return;
    };

    let point = Point { x, y };
    if point_in_bounds(point, canvas.width(), canvas.height()) {
        canvas.set_pixel(point, true);
    }
}
