//! Descriptions of the fonts and characters to extract.

use alloc::{string::String, vec::Vec};
use core::fmt;

/// The characters extracted when no other alphabet is configured.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890!@#$%^&*(),./<>?[]\\{}|~`";

/// Identifies a renderable font.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// The name of the font family.
    pub family: String,
    /// The nominal size of the font in points.
    pub size: f32,
    /// The [`Style`] of the font.
    pub style: Style,
}

impl FontDescriptor {
    /// Creates a new [`FontDescriptor`] for the regular style of `family` at `size` points.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            style: Style::REGULAR,
        }
    }

    /// Returns this [`FontDescriptor`] with its [`Style`] replaced by `style`.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.family, self.size)?;
        if self.style != Style::REGULAR {
            write!(f, " {}", self.style.as_str())?;
        }

        Ok(())
    }
}

/// Style flags of a [`FontDescriptor`].
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Style {
    /// Whether the bold face is requested.
    pub bold: bool,
    /// Whether the italic face is requested.
    pub italic: bool,
}

impl Style {
    /// The regular style.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
    };

    /// Returns the conventional face name of the [`Style`].
    pub const fn as_str(&self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "Regular",
            (true, false) => "Bold",
            (false, true) => "Italic",
            (true, true) => "BoldItalic",
        }
    }
}

/// An ordered sequence of distinct characters.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Alphabet {
    /// The characters in extraction order.
    chars: Vec<char>,
}

impl Alphabet {
    /// Creates a new [`Alphabet`] from the characters of `text`.
    ///
    /// Repeated characters are dropped, keeping their first occurrence.
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        for c in text.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        Self { chars }
    }

    /// Returns the characters of this [`Alphabet`] in order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the number of characters in this [`Alphabet`].
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if this [`Alphabet`] has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns every character of this [`Alphabet`] concatenated into a single line.
    pub fn to_line(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn alphabet_drops_duplicates_in_order() {
        let alphabet = Alphabet::new("abcab.");

        assert_eq!(alphabet.chars(), &['a', 'b', 'c', '.']);
        assert_eq!(alphabet.to_line(), "abc.");
    }

    #[test]
    fn default_alphabet_is_distinct() {
        let alphabet = Alphabet::default();

        assert_eq!(alphabet.len(), DEFAULT_ALPHABET.chars().count());
    }

    #[test]
    fn descriptor_display() {
        let regular = FontDescriptor::new("Terminal", 12.0);
        assert_eq!(regular.to_string(), "Terminal 12pt");

        let bold = FontDescriptor::new("Terminal", 7.5).with_style(Style {
            bold: true,
            italic: true,
        });
        assert_eq!(bold.to_string(), "Terminal 7.5pt BoldItalic");
    }
}
