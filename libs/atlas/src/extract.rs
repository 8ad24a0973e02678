//! Glyph extraction.
//!
//! Extraction of a font happens in two passes over an explicitly owned [`Canvas`]:
//!
//! 1. The whole [`Alphabet`] is rendered as a single line and scanned to find the font-wide
//!    [`InkBounds`]. Its top row becomes the vertical origin of every glyph of the font and its
//!    columns bound every later scan.
//! 2. Every character is rendered on its own, its own [`InkBounds`] are found within the font-wide
//!    columns, and its foreground pixels are emitted relative to its own left edge of ink and the
//!    font-wide top of ink.
//!
//! The canvas is cleared before every render so that no pixel survives from one render into the
//! next.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{error, fmt};

use crate::{
    bounds::InkBounds,
    canvas::{Canvas, OutOfBoundsError, Point, Region},
    font::{Alphabet, FontDescriptor},
    glyph::{FontAtlas, FontGlyphs, GlyphPixelSet, Offset},
};

/// The point at which every line of text is rendered.
pub const ORIGIN: Point = Point { x: 0, y: 0 };

/// A capability that draws text onto a [`Canvas`] without anti-aliasing.
pub trait Rasterizer {
    /// Draws `text` as a single line in the font described by `font`, with the upper left corner
    /// of the line's cell at `origin`.
    ///
    /// Pixels that would fall outside of `canvas` are discarded. Pixels that are not drawn are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// [`RasterizationUnavailable`]: Returned when no surface can be produced for `font`.
    fn render(
        &mut self,
        text: &str,
        font: &FontDescriptor,
        origin: Point,
        canvas: &mut dyn Canvas,
    ) -> Result<(), RasterizationUnavailable>;
}

/// The requested [`FontDescriptor`] cannot be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizationUnavailable {
    /// The font that could not be rendered.
    pub font: FontDescriptor,
    /// A description of why the font could not be rendered.
    pub reason: String,
}

impl RasterizationUnavailable {
    /// Creates a new [`RasterizationUnavailable`] for `font`.
    pub fn new(font: &FontDescriptor, reason: impl fmt::Display) -> Self {
        Self {
            font: font.clone(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for RasterizationUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot rasterize {}: {}", self.font, self.reason)
    }
}

impl error::Error for RasterizationUnavailable {}

/// Various errors that can occur while extracting the glyphs of a font.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractError {
    /// The font could not be rendered.
    Unavailable(RasterizationUnavailable),
    /// A scan fell outside of the canvas.
    Canvas(OutOfBoundsError),
    /// A character rendered alone has ink above or below the font-wide bounds, so part of the
    /// whole-alphabet render fell outside of the canvas.
    Clipped {
        /// The offending character.
        c: char,
        /// The bounds of the character rendered alone.
        bounds: InkBounds,
    },
}

impl From<RasterizationUnavailable> for ExtractError {
    fn from(value: RasterizationUnavailable) -> Self {
        Self::Unavailable(value)
    }
}

impl From<OutOfBoundsError> for ExtractError {
    fn from(value: OutOfBoundsError) -> Self {
        Self::Canvas(value)
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(error) => error.fmt(f),
            Self::Canvas(error) => write!(f, "canvas scan failed: {error}"),
            Self::Clipped { c, bounds } => write!(
                f,
                "{c:?} spans rows {}..={} outside of the font-wide bounds; the alphabet does \
                 not fit on the canvas",
                bounds.top, bounds.bottom
            ),
        }
    }
}

impl error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Unavailable(error) => Some(error),
            Self::Canvas(error) => Some(error),
            Self::Clipped { .. } => None,
        }
    }
}

/// Extracts the [`GlyphPixelSet`] of every character of `alphabet` in the font described by
/// `font`.
///
/// # Errors
///
/// - [`ExtractError::Unavailable`]: Returned when `rasterizer` cannot render `font`.
/// - [`ExtractError::Canvas`]: Returned when a scan window does not fit in `canvas`.
/// - [`ExtractError::Clipped`]: Returned when a character reaches above or below the font-wide
///   bounds, which happens when the whole alphabet does not fit on `canvas`.
pub fn extract_font<R: Rasterizer + ?Sized, C: Canvas>(
    rasterizer: &mut R,
    canvas: &mut C,
    font: &FontDescriptor,
    alphabet: &Alphabet,
) -> Result<FontGlyphs, ExtractError> {
    render_fresh(rasterizer, canvas, &alphabet.to_line(), font)?;
    let Some(font_bounds) = InkBounds::scan(&*canvas, Region::of(&*canvas))? else {
        log::warn!("{font} produced no ink for the whole alphabet");
        return Ok(alphabet
            .chars()
            .iter()
            .map(|&c| (c, GlyphPixelSet::default()))
            .collect());
    };
    log::debug!("{font}: font-wide bounds {font_bounds:?}");
    if font_bounds.right + 1 == canvas.width() || font_bounds.bottom + 1 == canvas.height() {
        log::warn!("{font}: ink reaches the edge of the canvas and may be clipped");
    }

    let window = font_bounds.column_window(canvas.height());
    let mut glyphs = Vec::with_capacity(alphabet.len());
    for &c in alphabet.chars() {
        let mut buffer = [0; 4];
        render_fresh(rasterizer, canvas, c.encode_utf8(&mut buffer), font)?;

        let glyph = match InkBounds::scan(&*canvas, window)? {
            Some(char_bounds)
                if char_bounds.top < font_bounds.top || char_bounds.bottom > font_bounds.bottom =>
            {
                return Err(ExtractError::Clipped {
                    c,
                    bounds: char_bounds,
                });
            }
            Some(char_bounds) => collect_pixels(&*canvas, &font_bounds, &char_bounds),
            None => GlyphPixelSet::default(),
        };
        log::trace!("{font}: {c:?} has {} pixels", glyph.len());

        glyphs.push((c, glyph));
    }

    Ok(glyphs.into_iter().collect())
}

/// The result of extracting every configured font.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// The glyphs of every font that was extracted successfully.
    pub atlas: FontAtlas,
    /// The label of every font that failed, with the reason it failed.
    pub failures: Vec<(String, ExtractError)>,
}

/// Extracts every font of `fonts` in order, reusing `canvas` for every render.
///
/// A font that fails is recorded in [`Extraction::failures`] and does not stop the remaining fonts
/// from being extracted.
pub fn extract_all<'font, R, C, I>(
    rasterizer: &mut R,
    canvas: &mut C,
    fonts: I,
    alphabet: &Alphabet,
) -> Extraction
where
    R: Rasterizer + ?Sized,
    C: Canvas,
    I: IntoIterator<Item = (&'font str, &'font FontDescriptor)>,
{
    let mut extracted = Vec::new();
    let mut failures = Vec::new();

    for (label, font) in fonts {
        log::info!("extracting {label:?} ({font})");

        match extract_font(rasterizer, canvas, font, alphabet) {
            Ok(glyphs) => extracted.push((String::from(label), glyphs)),
            Err(error) => {
                log::error!("skipping {label:?}: {error}");
                failures.push((String::from(label), error));
            }
        }
    }

    Extraction {
        atlas: extracted.into_iter().collect(),
        failures,
    }
}

/// Clears `canvas` and renders `text` at [`ORIGIN`].
fn render_fresh<R: Rasterizer + ?Sized, C: Canvas>(
    rasterizer: &mut R,
    canvas: &mut C,
    text: &str,
    font: &FontDescriptor,
) -> Result<(), RasterizationUnavailable> {
    canvas.clear();
    rasterizer.render(text, font, ORIGIN, canvas)
}

/// Emits every foreground pixel in the rows of `char_bounds` and the columns of `font_bounds`,
/// relative to the character's left edge of ink and the font's top of ink.
fn collect_pixels<C: Canvas + ?Sized>(
    canvas: &C,
    font_bounds: &InkBounds,
    char_bounds: &InkBounds,
) -> GlyphPixelSet {
    let mut offsets = Vec::new();
    for y in char_bounds.top..=char_bounds.bottom {
        for x in font_bounds.left..=font_bounds.right {
            if canvas.pixel(Point { x, y }) {
                offsets.push(Offset {
                    x: relative(x, char_bounds.left),
                    y: relative(y, font_bounds.top),
                });
            }
        }
    }

    GlyphPixelSet::new(offsets)
}

/// Returns `value - origin` as a signed pixel offset.
fn relative(value: usize, origin: usize) -> i32 {
    let offset = value as i64 - origin as i64;
    offset.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Bitmap;
    use alloc::{vec, vec::Vec};

    /// A [`Rasterizer`] that stamps fixed pixel patterns, one cell per character.
    struct StampRasterizer {
        /// The only family this rasterizer can render.
        family: &'static str,
        /// The width of every character cell.
        advance: usize,
        /// The pixels of every known character, relative to its cell.
        stamps: Vec<(char, Vec<(usize, usize)>)>,
        /// The number of times [`Rasterizer::render()`] was called.
        renders: usize,
    }

    impl StampRasterizer {
        fn new() -> Self {
            Self {
                family: "Stamp",
                advance: 6,
                stamps: vec![
                    // A 5 wide "A" with its left edge of ink at column 1 of its cell.
                    (
                        'A',
                        vec![
                            (3, 1),
                            (2, 2),
                            (4, 2),
                            (1, 3),
                            (5, 3),
                            (1, 4),
                            (2, 4),
                            (3, 4),
                            (4, 4),
                            (5, 4),
                            (1, 5),
                            (5, 5),
                        ],
                    ),
                    // A 2x2 "." sitting on the baseline.
                    ('.', vec![(2, 4), (3, 4), (2, 5), (3, 5)]),
                    // A single pixel "'" near the top.
                    ('\'', vec![(2, 0)]),
                ],
                renders: 0,
            }
        }
    }

    impl Rasterizer for StampRasterizer {
        fn render(
            &mut self,
            text: &str,
            font: &FontDescriptor,
            origin: Point,
            canvas: &mut dyn Canvas,
        ) -> Result<(), RasterizationUnavailable> {
            if font.family != self.family {
                return Err(RasterizationUnavailable::new(font, "unknown family"));
            }

            self.renders += 1;
            for (index, c) in text.chars().enumerate() {
                let Some((_, stamp)) = self.stamps.iter().find(|(stamp_c, _)| *stamp_c == c)
                else {
                    continue;
                };

                for &(x, y) in stamp {
                    let point = Point {
                        x: origin.x + index * self.advance + x,
                        y: origin.y + y,
                    };
                    let _ = canvas.write_pixel(point, true);
                }
            }

            Ok(())
        }
    }

    fn stamp_font() -> FontDescriptor {
        FontDescriptor::new("Stamp", 8.0)
    }

    #[test]
    fn glyphs_are_left_packed_and_share_font_top() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("A.'");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        let a = glyphs.get('A').unwrap();
        assert_eq!(a.len(), 12);
        assert_eq!(a.min_x(), Some(0));
        assert_eq!(a.max_x(), Some(4));
        // The font-wide top of ink comes from "'" at row 0.
        assert_eq!(a.min_y(), Some(1));
        assert_eq!(a.offsets()[0], Offset { x: 2, y: 1 });

        let period = glyphs.get('.').unwrap();
        assert_eq!(
            period.offsets(),
            &[
                Offset { x: 0, y: 4 },
                Offset { x: 1, y: 4 },
                Offset { x: 0, y: 5 },
                Offset { x: 1, y: 5 },
            ]
        );
        assert_eq!(period.max_x(), Some(1));

        let apostrophe = glyphs.get('\'').unwrap();
        assert_eq!(apostrophe.offsets(), &[Offset { x: 0, y: 0 }]);
    }

    #[test]
    fn offsets_are_never_negative() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("A.");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        for (_, glyph) in glyphs.iter() {
            assert_eq!(glyph.min_x(), Some(0));
            assert!(glyph.offsets().iter().all(|offset| offset.y >= 0));
        }

        // Without "'" the font-wide top of ink is row 1, which is where "A" starts.
        assert_eq!(glyphs.get('A').unwrap().min_y(), Some(0));
        assert_eq!(glyphs.get('.').unwrap().min_y(), Some(3));
    }

    #[test]
    fn period_width_stands_in_for_space() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("A.");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        let options = crate::preview::PreviewOptions::default();
        assert_eq!(crate::preview::space_width(&glyphs, &options), 1);
        assert_eq!(glyphs.get('A').unwrap().min_x(), Some(0));
    }

    #[test]
    fn blank_character_yields_empty_glyph() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("A .");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        assert_eq!(glyphs.len(), 3);
        assert!(glyphs.get(' ').unwrap().is_empty());
        assert!(!glyphs.get('.').unwrap().is_empty());
        assert_eq!(
            glyphs.iter().map(|(c, _)| c).collect::<Vec<_>>(),
            vec!['A', ' ', '.']
        );
    }

    #[test]
    fn font_without_ink_yields_only_empty_glyphs() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("xyz");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        assert_eq!(glyphs.len(), 3);
        assert!(glyphs.iter().all(|(_, glyph)| glyph.is_empty()));
        assert_eq!(rasterizer.renders, 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let alphabet = Alphabet::new("A.'");
        let mut canvas = Bitmap::new(64, 8);

        let first = extract_font(
            &mut StampRasterizer::new(),
            &mut canvas,
            &stamp_font(),
            &alphabet,
        )
        .unwrap();
        let second = extract_font(
            &mut StampRasterizer::new(),
            &mut canvas,
            &stamp_font(),
            &alphabet,
        )
        .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn stale_pixels_do_not_leak_between_renders() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        canvas.fill(Region::of(&canvas), true).unwrap();
        let alphabet = Alphabet::new("A.");

        let glyphs = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet).unwrap();

        assert_eq!(glyphs.get('A').unwrap().len(), 12);
        assert_eq!(glyphs.get('.').unwrap().len(), 4);
        assert_eq!(rasterizer.renders, 3);
    }

    #[test]
    fn alphabet_wider_than_canvas_fails_the_font() {
        let mut rasterizer = StampRasterizer::new();
        // The cell of "'" starts at column 12, past the right edge, so the whole-alphabet render
        // misses its ink at row 0 while the render of "'" alone does not.
        let mut canvas = Bitmap::new(12, 8);
        let alphabet = Alphabet::new("A.'");

        let result = extract_font(&mut rasterizer, &mut canvas, &stamp_font(), &alphabet);

        assert_eq!(
            result,
            Err(ExtractError::Clipped {
                c: '\'',
                bounds: InkBounds {
                    left: 2,
                    right: 2,
                    top: 0,
                    bottom: 0,
                },
            })
        );

        let good = stamp_font();
        let extraction = extract_all(&mut rasterizer, &mut canvas, [("tight", &good)], &alphabet);
        assert!(extraction.atlas.is_empty());
        assert_eq!(extraction.failures.len(), 1);
        assert!(matches!(
            extraction.failures[0].1,
            ExtractError::Clipped { c: '\'', .. }
        ));
    }

    #[test]
    fn unavailable_font_only_skips_that_font() {
        let mut rasterizer = StampRasterizer::new();
        let mut canvas = Bitmap::new(64, 8);
        let alphabet = Alphabet::new("A.");

        let good = stamp_font();
        let bad = FontDescriptor::new("Missing", 8.0);
        let fonts = [("first", &good), ("broken", &bad), ("last", &good)];

        let extraction = extract_all(&mut rasterizer, &mut canvas, fonts, &alphabet);

        assert_eq!(
            extraction.atlas.iter().map(|(label, _)| label).collect::<Vec<_>>(),
            vec!["first", "last"]
        );
        assert_eq!(extraction.failures.len(), 1);
        let (label, error) = &extraction.failures[0];
        assert_eq!(label, "broken");
        assert!(matches!(
            error,
            ExtractError::Unavailable(RasterizationUnavailable { font, .. }) if font == &bad
        ));
    }
}
