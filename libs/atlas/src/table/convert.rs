//! Conversions between [`FontAtlas`] and [`Value`].

use alloc::{string::String, vec::Vec};
use core::{error, fmt};

use crate::{
    glyph::{FontAtlas, FontGlyphs, GlyphPixelSet, Offset},
    table::{Key, Value},
};

impl From<&GlyphPixelSet> for Value {
    fn from(glyph: &GlyphPixelSet) -> Self {
        let points = glyph
            .offsets()
            .iter()
            .map(|offset| Value::Array(Vec::from([offset.x.into(), offset.y.into()])))
            .collect();

        Value::Array(points)
    }
}

impl From<&FontGlyphs> for Value {
    fn from(glyphs: &FontGlyphs) -> Self {
        let entries = glyphs
            .iter()
            .map(|(c, glyph)| (Key::Str(String::from(c)), Value::from(glyph)))
            .collect();

        Value::Table(entries)
    }
}

impl From<&FontAtlas> for Value {
    fn from(atlas: &FontAtlas) -> Self {
        let entries = atlas
            .iter()
            .map(|(label, glyphs)| (Key::from(label), Value::from(glyphs)))
            .collect();

        Value::Table(entries)
    }
}

impl TryFrom<&Value> for FontAtlas {
    type Error = AtlasShapeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Some(entries) = table_entries(value) else {
            return Err(AtlasShapeError::NotATable { label: None });
        };

        entries
            .iter()
            .map(|(key, value)| {
                let Key::Str(label) = key else {
                    return Err(AtlasShapeError::InvalidLabel);
                };

                Ok((label.clone(), font_glyphs(label, value)?))
            })
            .collect()
    }
}

/// Converts the character table of the font labeled `label`.
fn font_glyphs(label: &str, value: &Value) -> Result<FontGlyphs, AtlasShapeError> {
    let Some(entries) = table_entries(value) else {
        return Err(AtlasShapeError::NotATable {
            label: Some(String::from(label)),
        });
    };

    entries
        .iter()
        .map(|(key, value)| {
            let c = match key {
                Key::Str(key) => {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => {
                            return Err(AtlasShapeError::InvalidCharacter {
                                label: String::from(label),
                            });
                        }
                    }
                }
                Key::Int(_) => {
                    return Err(AtlasShapeError::InvalidCharacter {
                        label: String::from(label),
                    });
                }
            };

            let glyph = glyph_pixels(value).ok_or_else(|| AtlasShapeError::InvalidGlyph {
                label: String::from(label),
                c,
            })?;
            Ok((c, glyph))
        })
        .collect()
}

/// Converts an array of `{ x, y }` pairs.
fn glyph_pixels(value: &Value) -> Option<GlyphPixelSet> {
    let Value::Array(points) = value else {
        return None;
    };

    let offsets = points
        .iter()
        .map(|point| match point {
            Value::Array(pair) => match pair.as_slice() {
                [Value::Int(x), Value::Int(y)] => Some(Offset {
                    x: i32::try_from(*x).ok()?,
                    y: i32::try_from(*y).ok()?,
                }),
                _ => None,
            },
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(GlyphPixelSet::new(offsets))
}

/// Returns the entries of a table.
///
/// An empty table and an empty array render identically, so an empty [`Value::Array`] is
/// accepted as a table without entries.
fn table_entries(value: &Value) -> Option<&[(Key, Value)]> {
    match value {
        Value::Table(entries) => Some(entries.as_slice()),
        Value::Array(values) if values.is_empty() => Some(&[][..]),
        _ => None,
    }
}

/// Various errors that can occur when a [`Value`] does not have the shape of a [`FontAtlas`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum AtlasShapeError {
    /// A value that must be a table is not one.
    NotATable {
        /// The label of the font whose character table is malformed, or [`None`] if the atlas
        /// itself is not a table.
        label: Option<String>,
    },
    /// A font label is not a string.
    InvalidLabel,
    /// A character key is not a single character string.
    InvalidCharacter {
        /// The label of the font containing the key.
        label: String,
    },
    /// A glyph is not an array of `{ x, y }` integer pairs.
    InvalidGlyph {
        /// The label of the font containing the glyph.
        label: String,
        /// The character of the glyph.
        c: char,
    },
}

impl fmt::Display for AtlasShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATable { label: None } => f.write_str("atlas is not a table"),
            Self::NotATable { label: Some(label) } => {
                write!(f, "characters of {label:?} are not a table")
            }
            Self::InvalidLabel => f.write_str("font label is not a string"),
            Self::InvalidCharacter { label } => {
                write!(f, "{label:?} has a key that is not a single character")
            }
            Self::InvalidGlyph { label, c } => {
                write!(f, "glyph {c:?} of {label:?} is not a list of points")
            }
        }
    }
}

impl error::Error for AtlasShapeError {}
