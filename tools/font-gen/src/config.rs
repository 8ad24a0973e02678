//! Loading and validation of `font-gen`'s configuration file.

use std::{
    collections::HashSet,
    error, fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use atlas::{
    font::{Alphabet, DEFAULT_ALPHABET, FontDescriptor, Style},
    preview::{DEFAULT_SAMPLE, PreviewOptions},
};
use serde::Deserialize;

/// The complete configuration of a run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The characters to extract, in order.
    pub alphabet: String,
    /// Directories searched for font files, in order.
    pub font_dirs: Vec<PathBuf>,
    /// Dimensions of the canvas used for rendering.
    pub canvas: CanvasConfig,
    /// Settings of the preview images.
    pub preview: PreviewConfig,
    /// The fonts to extract, in output order.
    pub fonts: Vec<FontConfig>,
}

impl Config {
    /// Loads the [`Config`] at `path`, or returns the built-in [`Config`] if `path` is [`None`].
    ///
    /// # Errors
    ///
    /// Returns errors when the file cannot be read or is not a valid [`Config`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid configuration {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Parses a [`Config`] from TOML `text`. Missing settings take their built-in values.
    ///
    /// # Errors
    ///
    /// Returns errors when `text` is not valid TOML or contains unknown settings.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Checks the settings that extraction relies upon.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::EmptyCanvas);
        }

        if let Some(space_width) = self.preview.space_width.filter(|width| *width < 0) {
            return Err(ConfigError::NegativeSpaceWidth(space_width));
        }

        if self.fonts.is_empty() {
            return Err(ConfigError::NoFonts);
        }

        let mut labels = HashSet::new();
        for font in &self.fonts {
            if !labels.insert(font.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(font.label.clone()));
            }

            if !font.size.is_finite() || font.size <= 0.0 {
                return Err(ConfigError::InvalidSize {
                    label: font.label.clone(),
                    size: font.size,
                });
            }
        }

        Ok(())
    }

    /// Returns the [`Alphabet`] to extract.
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::new(&self.alphabet)
    }

    /// Returns the label and [`FontDescriptor`] of every configured font, in order.
    pub fn fonts(&self) -> Vec<(String, FontDescriptor)> {
        self.fonts
            .iter()
            .map(|font| (font.label.clone(), font.descriptor()))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        let fonts = [("Small", 7u8), ("Medium", 12), ("Large", 18), ("Huge", 24)]
            .into_iter()
            .map(|(name, size)| FontConfig {
                label: format!("{name} ({size} tall)"),
                family: String::from("Terminal"),
                size: f32::from(size),
                bold: false,
                italic: false,
            })
            .collect();

        Self {
            alphabet: String::from(DEFAULT_ALPHABET),
            font_dirs: vec![PathBuf::from("fonts")],
            canvas: CanvasConfig::default(),
            preview: PreviewConfig::default(),
            fonts,
        }
    }
}

/// Dimensions of the rendering canvas.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// The width of the canvas in pixels.
    pub width: usize,
    /// The height of the canvas in pixels.
    pub height: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 64,
        }
    }
}

/// Settings of the preview images.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// The sample text rendered for every font.
    pub text: String,
    /// Pixels left blank between two characters.
    pub gap: i32,
    /// The character whose rightmost offset stands in for the width of a space.
    pub space_reference: char,
    /// The advance of a space, overriding [`PreviewConfig::space_reference`].
    pub space_width: Option<i32>,
}

impl PreviewConfig {
    /// Returns the [`PreviewOptions`] described by this [`PreviewConfig`].
    pub fn options(&self) -> PreviewOptions {
        PreviewOptions {
            gap: self.gap,
            space_width: self.space_width,
            space_reference: self.space_reference,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let options = PreviewOptions::default();

        Self {
            text: String::from(DEFAULT_SAMPLE),
            gap: options.gap,
            space_reference: options.space_reference,
            space_width: options.space_width,
        }
    }
}

/// A single font to extract.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontConfig {
    /// The unique label of the font in the artifact.
    pub label: String,
    /// The font family.
    pub family: String,
    /// The nominal size in points.
    pub size: f32,
    /// Whether the bold face is requested.
    #[serde(default)]
    pub bold: bool,
    /// Whether the italic face is requested.
    #[serde(default)]
    pub italic: bool,
}

impl FontConfig {
    /// Returns the [`FontDescriptor`] of this font.
    pub fn descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(self.family.clone(), self.size).with_style(Style {
            bold: self.bold,
            italic: self.italic,
        })
    }
}

/// Various errors that make a [`Config`] unusable.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The alphabet contains no characters.
    EmptyAlphabet,
    /// The canvas has no pixels.
    EmptyCanvas,
    /// The preview space width is negative.
    NegativeSpaceWidth(i32),
    /// No fonts are configured.
    NoFonts,
    /// Two fonts share a label.
    DuplicateLabel(String),
    /// A font size is zero, negative, or not finite.
    InvalidSize {
        /// The label of the font.
        label: String,
        /// The rejected size.
        size: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAlphabet => f.write_str("alphabet is empty"),
            Self::EmptyCanvas => f.write_str("canvas width and height must be positive"),
            Self::NegativeSpaceWidth(width) => {
                write!(f, "preview space width {width} is negative")
            }
            Self::NoFonts => f.write_str("no fonts are configured"),
            Self::DuplicateLabel(label) => write!(f, "font label {label:?} is used twice"),
            Self::InvalidSize { label, size } => {
                write!(f, "font {label:?} has invalid size {size}")
            }
        }
    }
}

impl error::Error for ConfigError {}
