//! Parsing of the nested-table grammar.

use alloc::{string::String, vec::Vec};
use core::{error, fmt};

use crate::table::{Key, Value};

/// The deepest nesting of tables and arrays accepted by the parser.
pub const MAX_DEPTH: usize = 64;

/// Parses a single [`Value`] spanning all of `input`, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns a [`ParseError`] if `input` is not exactly one well-formed [`Value`].
pub fn parse_value(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input);

    parser.skip_whitespace();
    let value = parser.value()?;
    parser.finish()?;

    Ok(value)
}

/// Parses a `name = value` assignment spanning all of `input`, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns a [`ParseError`] if `input` is not exactly one well-formed assignment.
pub fn parse_assignment(input: &str) -> Result<(String, Value), ParseError> {
    let mut parser = Parser::new(input);

    parser.skip_whitespace();
    let name = parser.identifier()?;
    parser.skip_whitespace();
    parser.expect('=')?;
    parser.skip_whitespace();
    let value = parser.value()?;
    parser.finish()?;

    Ok((String::from(name), value))
}

/// A recursive descent parser over a string slice.
struct Parser<'input> {
    /// The text being parsed.
    input: &'input str,
    /// The byte offset of the next unparsed character.
    offset: usize,
    /// The number of currently open braces.
    depth: usize,
}

impl<'input> Parser<'input> {
    const fn new(input: &'input str) -> Self {
        Self {
            input,
            offset: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character, failing if there is none.
    fn next_char(&mut self) -> Result<char, ParseError> {
        self.bump()
            .ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes `expected`, failing on any other character.
    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        let offset = self.offset;
        match self.next_char()? {
            c if c == expected => Ok(()),
            c => Err(ParseError {
                offset,
                kind: ParseErrorKind::Unexpected(c),
            }),
        }
    }

    /// Fails unless only whitespace remains.
    fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.offset != self.input.len() {
            return Err(self.error(ParseErrorKind::TrailingInput));
        }

        Ok(())
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            offset: self.offset,
            kind,
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some('"') => self.string().map(Value::Str),
            Some('-' | '0'..='9') => self.integer().map(Value::Int),
            Some('{') => self.braced(),
            Some(c) => Err(self.error(ParseErrorKind::Unexpected(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn key(&mut self) -> Result<Key, ParseError> {
        match self.peek() {
            Some('"') => self.string().map(Key::Str),
            Some('-' | '0'..='9') => self.integer().map(Key::Int),
            Some(c) => Err(self.error(ParseErrorKind::Unexpected(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    /// Parses a quoted string, dropping the backslash of every escape.
    fn string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;

        let mut value = String::new();
        loop {
            match self.next_char()? {
                '"' => return Ok(value),
                '\\' => value.push(self.next_char()?),
                c => value.push(c),
            }
        }
    }

    fn integer(&mut self) -> Result<i64, ParseError> {
        let start = self.offset;
        if self.peek() == Some('-') {
            self.bump();
        }

        let digits_start = self.offset;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        if self.offset == digits_start {
            return Err(match self.peek() {
                Some(c) => self.error(ParseErrorKind::Unexpected(c)),
                None => self.error(ParseErrorKind::UnexpectedEnd),
            });
        }

        self.input[start..self.offset]
            .parse()
            .map_err(|_| ParseError {
                offset: start,
                kind: ParseErrorKind::IntegerOverflow,
            })
    }

    fn identifier(&mut self) -> Result<&'input str, ParseError> {
        let start = self.offset;
        match self.peek() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => return Err(self.error(ParseErrorKind::Unexpected(c))),
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }

        while self
            .peek()
            .is_some_and(|c| c == '_' || c.is_ascii_alphanumeric())
        {
            self.bump();
        }

        Ok(&self.input[start..self.offset])
    }

    /// Parses a table or an array. `{ }` is parsed as an empty array.
    fn braced(&mut self) -> Result<Value, ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(ParseErrorKind::TooDeep));
        }

        self.expect('{')?;
        self.depth += 1;
        let value = self.braced_contents();
        self.depth -= 1;

        value
    }

    fn braced_contents(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.bump();
                Ok(Value::Array(Vec::new()))
            }
            Some('[') => self.table_entries().map(Value::Table),
            _ => self.array_values().map(Value::Array),
        }
    }

    fn table_entries(&mut self) -> Result<Vec<(Key, Value)>, ParseError> {
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(entries);
            }

            self.expect('[')?;
            self.skip_whitespace();
            let key = self.key()?;
            self.skip_whitespace();
            self.expect(']')?;
            self.skip_whitespace();
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.value()?;
            entries.push((key, value));

            if self.separator()? {
                return Ok(entries);
            }
        }
    }

    fn array_values(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(values);
            }

            values.push(self.value()?);

            if self.separator()? {
                return Ok(values);
            }
        }
    }

    /// Consumes the `,` or `}` following an element. Returns `true` if the collection ended.
    fn separator(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();

        let offset = self.offset;
        match self.next_char()? {
            ',' => Ok(false),
            '}' => Ok(true),
            c => Err(ParseError {
                offset,
                kind: ParseErrorKind::Unexpected(c),
            }),
        }
    }
}

/// An error encountered while parsing the nested-table grammar.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ParseError {
    /// The byte offset in the input at which the error was detected.
    pub offset: usize,
    /// The [`ParseErrorKind`] describing what went wrong.
    pub kind: ParseErrorKind,
}

/// Various errors that can occur while parsing the nested-table grammar.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input ended in the middle of a value.
    UnexpectedEnd,
    /// A character that cannot appear at this position was found.
    Unexpected(char),
    /// An integer literal does not fit in an `i64`.
    IntegerOverflow,
    /// Non-whitespace input follows a complete value.
    TrailingInput,
    /// Tables and arrays are nested deeper than [`MAX_DEPTH`].
    TooDeep,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of input at byte {}", self.offset)
            }
            ParseErrorKind::Unexpected(c) => {
                write!(f, "unexpected character {c:?} at byte {}", self.offset)
            }
            ParseErrorKind::IntegerOverflow => {
                write!(f, "integer out of range at byte {}", self.offset)
            }
            ParseErrorKind::TrailingInput => {
                write!(f, "trailing input at byte {}", self.offset)
            }
            ParseErrorKind::TooDeep => {
                write!(
                    f,
                    "nesting deeper than {MAX_DEPTH} levels at byte {}",
                    self.offset
                )
            }
        }
    }
}

impl error::Error for ParseError {}
