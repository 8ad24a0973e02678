//! Ordered nested-table serialization.
//!
//! A [`Value`] renders into the following grammar:
//!
//! - Strings are double quoted, and each of `\`, `"`, `'`, `[`, and `]` is preceded by a
//!   backslash. No other character is escaped, control characters included.
//! - Integers are plain base-10 text.
//! - Tables render as `{ [key] = value, [key] = value }` in insertion order.
//! - Arrays render as `{ value, value }` in insertion order.
//!
//! [`parse_value()`] and [`parse_assignment()`] read the same grammar back, rejecting nesting
//! deeper than [`MAX_DEPTH`].

mod convert;
mod parse;

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

pub use convert::AtlasShapeError;
pub use parse::{MAX_DEPTH, ParseError, ParseErrorKind, parse_assignment, parse_value};

/// The name the [`FontAtlas`][fa] table is assigned to in the output artifact.
///
/// [fa]: crate::glyph::FontAtlas
pub const ATLAS_NAME: &str = "fonts";

/// The characters that are preceded by a backslash inside string literals.
pub const ESCAPED_CHARS: [char; 5] = ['\\', '"', '\'', '[', ']'];

/// A key of a [`Value::Table`] entry.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Key {
    /// A string key.
    Str(String),
    /// An integer key.
    Int(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => write_string(f, value),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// A value of the nested-table grammar.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Value {
    /// A string literal.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// An ordered sequence of explicitly keyed entries.
    Table(Vec<(Key, Value)>),
    /// An ordered sequence of positional values.
    Array(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => write_string(f, value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Table(entries) => {
                f.write_str("{ ")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "[{key}] = {value}")?;
                }
                f.write_str(" }")
            }
            Self::Array(values) => {
                f.write_str("{ ")?;
                for (index, value) in values.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// A [`Value`] bound to a global name, rendered as `name = value`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// The name the [`Value`] is assigned to.
    pub name: &'a str,
    /// The assigned [`Value`].
    pub value: &'a Value,
}

impl Assignment<'_> {
    /// Dumps the rendered [`Assignment`] into the `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the `writer`.
    #[cfg(feature = "std")]
    pub fn dump<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for Assignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Writes `value` as a quoted string literal.
fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        if ESCAPED_CHARS.contains(&c) {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}
