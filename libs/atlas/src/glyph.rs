//! Extracted glyph pixels and the atlases collecting them.

use alloc::{string::String, vec::Vec};

/// A pixel position relative to a glyph cell origin.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Offset {
    /// Columns to the right of the glyph's left edge of ink.
    pub x: i32,
    /// Rows below the font-wide top of ink.
    pub y: i32,
}

/// The foreground pixels of a single glyph, in the order they were scanned.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct GlyphPixelSet {
    /// The [`Offset`] of every foreground pixel.
    offsets: Vec<Offset>,
}

impl GlyphPixelSet {
    /// Creates a new [`GlyphPixelSet`] from the given `offsets`.
    pub const fn new(offsets: Vec<Offset>) -> Self {
        Self { offsets }
    }

    /// Returns the [`Offset`]s of this [`GlyphPixelSet`].
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Returns the number of foreground pixels in this [`GlyphPixelSet`].
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if the glyph has no ink.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the largest x offset, or [`None`] if the glyph has no ink.
    pub fn max_x(&self) -> Option<i32> {
        self.offsets.iter().map(|offset| offset.x).max()
    }

    /// Returns the smallest x offset, or [`None`] if the glyph has no ink.
    pub fn min_x(&self) -> Option<i32> {
        self.offsets.iter().map(|offset| offset.x).min()
    }

    /// Returns the smallest y offset, or [`None`] if the glyph has no ink.
    pub fn min_y(&self) -> Option<i32> {
        self.offsets.iter().map(|offset| offset.y).min()
    }
}

/// The [`GlyphPixelSet`]s of a single font, keyed by character in extraction order.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct FontGlyphs {
    /// Glyphs in insertion order.
    glyphs: Vec<(char, GlyphPixelSet)>,
}

impl FontGlyphs {
    /// Returns the [`GlyphPixelSet`] of `c`, if it was extracted.
    pub fn get(&self, c: char) -> Option<&GlyphPixelSet> {
        self.glyphs
            .iter()
            .find(|(glyph_char, _)| *glyph_char == c)
            .map(|(_, glyph)| glyph)
    }

    /// Returns an iterator over the characters and their [`GlyphPixelSet`]s in order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphPixelSet)> {
        self.glyphs.iter().map(|(c, glyph)| (*c, glyph))
    }

    /// Returns the number of characters in this [`FontGlyphs`].
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if no characters were extracted.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(char, GlyphPixelSet)> for FontGlyphs {
    fn from_iter<T: IntoIterator<Item = (char, GlyphPixelSet)>>(iter: T) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

/// Mapping from font label to the [`FontGlyphs`] extracted for it, in configuration order.
///
/// Labels are expected to be unique. [`FontAtlas::get()`] returns the first match.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct FontAtlas {
    /// Fonts in insertion order.
    fonts: Vec<(String, FontGlyphs)>,
}

impl FontAtlas {
    /// Returns the [`FontGlyphs`] labeled `label`, if present.
    pub fn get(&self, label: &str) -> Option<&FontGlyphs> {
        self.fonts
            .iter()
            .find(|(font_label, _)| font_label == label)
            .map(|(_, glyphs)| glyphs)
    }

    /// Returns an iterator over the labels and their [`FontGlyphs`] in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontGlyphs)> {
        self.fonts
            .iter()
            .map(|(label, glyphs)| (label.as_str(), glyphs))
    }

    /// Returns the number of fonts in this [`FontAtlas`].
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if this [`FontAtlas`] holds no fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl FromIterator<(String, FontGlyphs)> for FontAtlas {
    fn from_iter<T: IntoIterator<Item = (String, FontGlyphs)>>(iter: T) -> Self {
        Self {
            fonts: iter.into_iter().collect(),
        }
    }
}
