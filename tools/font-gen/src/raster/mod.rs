//! Font file resolution and the [`Rasterizer`] backed by files on disk.

mod outline;
mod psf;

use std::{
    collections::{HashMap, hash_map::Entry},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use atlas::{
    canvas::{Canvas, Point, point_in_bounds},
    extract::{RasterizationUnavailable, Rasterizer},
    font::{FontDescriptor, Style},
};

pub use outline::OutlineFont;
pub use psf::BitmapFont;

/// File extensions searched for, in order of preference.
pub const EXTENSIONS: [&str; 4] = ["ttf", "otf", "psf", "psfu"];

/// A [`Rasterizer`] that renders fonts found in a list of directories.
///
/// Fonts are loaded on first use and kept for the remainder of the run.
pub struct FontLibrary {
    /// Directories searched for font files, in order.
    font_dirs: Vec<PathBuf>,
    /// Fonts loaded so far, keyed by family and style.
    loaded: HashMap<(String, Style), LoadedFont>,
}

impl FontLibrary {
    /// Creates a new [`FontLibrary`] searching `font_dirs`.
    pub fn new(font_dirs: Vec<PathBuf>) -> Self {
        Self {
            font_dirs,
            loaded: HashMap::new(),
        }
    }

    /// Returns the loaded font for `font`, loading it if necessary.
    fn load(&mut self, font: &FontDescriptor) -> Result<&LoadedFont, RasterizationUnavailable> {
        match self.loaded.entry((font.family.clone(), font.style)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let Some(path) = resolve(&self.font_dirs, font) else {
                    return Err(RasterizationUnavailable::new(
                        font,
                        format_args!(
                            "no file matching {:?} in {}",
                            candidate_names(font),
                            display_dirs(&self.font_dirs)
                        ),
                    ));
                };

                let loaded = LoadedFont::open(&path)
                    .map_err(|error| RasterizationUnavailable::new(font, format_args!("{error:#}")))?;
                log::debug!("{font}: using {}", path.display());

                Ok(entry.insert(loaded))
            }
        }
    }
}

impl Rasterizer for FontLibrary {
    fn render(
        &mut self,
        text: &str,
        font: &FontDescriptor,
        origin: Point,
        canvas: &mut dyn Canvas,
    ) -> Result<(), RasterizationUnavailable> {
        match self.load(font)? {
            LoadedFont::Outline(outline) => outline.render(text, font.size, origin, canvas),
            LoadedFont::Bitmap(bitmap) => bitmap.render(text, origin, canvas),
        }

        Ok(())
    }
}

/// A parsed font file.
enum LoadedFont {
    /// A TrueType or OpenType font.
    Outline(OutlineFont),
    /// A PC Screen Font.
    Bitmap(BitmapFont),
}

impl LoadedFont {
    /// Reads and parses the font file at `path`, choosing the format from its extension.
    fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

        let is_psf = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension == "psf" || extension == "psfu");
        let font = if is_psf {
            Self::Bitmap(BitmapFont::parse(&bytes)?)
        } else {
            Self::Outline(OutlineFont::parse(bytes)?)
        };

        Ok(font)
    }
}

/// Returns the file names that may hold `font`, in order of preference.
pub fn candidate_names(font: &FontDescriptor) -> Vec<String> {
    let mut names = EXTENSIONS
        .iter()
        .map(|extension| format!("{}-{}.{extension}", font.family, font.style.as_str()))
        .collect::<Vec<_>>();

    if font.style == Style::REGULAR {
        names.extend(
            EXTENSIONS
                .iter()
                .map(|extension| format!("{}.{extension}", font.family)),
        );
    }

    names
}

/// Returns the first existing file that may hold `font`, searching `font_dirs` in order.
pub fn resolve(font_dirs: &[PathBuf], font: &FontDescriptor) -> Option<PathBuf> {
    let names = candidate_names(font);

    font_dirs
        .iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Formats `dirs` for error messages.
fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return String::from("no font directories");
    }

    dirs.iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Marks the pixel at (`x`, `y`) if it lies on `canvas`.
fn plot(canvas: &mut dyn Canvas, x: i64, y: i64) {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return;
    };

    let point = Point { x, y };
    if point_in_bounds(point, canvas.width(), canvas.height()) {
        canvas.set_pixel(point, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas::canvas::Bitmap;

    /// Creates an empty directory unique to `name` under the system temporary directory.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("font-gen-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn candidates_prefer_styled_names() {
        let regular = FontDescriptor::new("Terminal", 12.0);
        assert_eq!(
            candidate_names(&regular),
            [
                "Terminal-Regular.ttf",
                "Terminal-Regular.otf",
                "Terminal-Regular.psf",
                "Terminal-Regular.psfu",
                "Terminal.ttf",
                "Terminal.otf",
                "Terminal.psf",
                "Terminal.psfu",
            ]
        );

        let bold = regular.with_style(Style {
            bold: true,
            italic: false,
        });
        assert_eq!(
            candidate_names(&bold),
            [
                "Terminal-Bold.ttf",
                "Terminal-Bold.otf",
                "Terminal-Bold.psf",
                "Terminal-Bold.psfu",
            ]
        );
    }

    #[test]
    fn resolve_searches_directories_in_order() {
        let first = scratch_dir("resolve-first");
        let second = scratch_dir("resolve-second");
        fs::write(first.join("Terminal.psf"), b"").unwrap();
        fs::write(second.join("Terminal-Regular.ttf"), b"").unwrap();

        let font = FontDescriptor::new("Terminal", 7.0);
        let dirs = [first.clone(), second.clone()];
        assert_eq!(resolve(&dirs, &font), Some(first.join("Terminal.psf")));

        let dirs = [second.clone(), first.clone()];
        assert_eq!(resolve(&dirs, &font), Some(second.join("Terminal-Regular.ttf")));

        let italic = font.with_style(Style {
            bold: false,
            italic: true,
        });
        assert_eq!(resolve(&dirs, &italic), None);

        fs::remove_dir_all(first).unwrap();
        fs::remove_dir_all(second).unwrap();
    }

    #[test]
    fn missing_family_is_unavailable() {
        let dir = scratch_dir("missing-family");
        let mut library = FontLibrary::new(vec![dir.clone()]);
        let mut canvas = Bitmap::new(8, 8);

        let font = FontDescriptor::new("Nonexistent", 12.0);
        let error = library
            .render("A", &font, Point { x: 0, y: 0 }, &mut canvas)
            .unwrap_err();
        assert_eq!(error.font, font);
        assert!(error.reason.contains("Nonexistent-Regular.ttf"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unparsable_file_is_unavailable() {
        let dir = scratch_dir("unparsable");
        fs::write(dir.join("Broken.ttf"), b"not a font").unwrap();
        fs::write(dir.join("Broken.psf"), b"not a font").unwrap();
        let mut library = FontLibrary::new(vec![dir.clone()]);
        let mut canvas = Bitmap::new(8, 8);

        let font = FontDescriptor::new("Broken", 12.0);
        assert!(
            library
                .render("A", &font, Point { x: 0, y: 0 }, &mut canvas)
                .is_err()
        );
        assert_eq!(canvas.foreground_count(), 0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn plot_clips() {
        let mut canvas = Bitmap::new(2, 2);

        plot(&mut canvas, -1, 0);
        plot(&mut canvas, 0, 2);
        plot(&mut canvas, 1, 1);

        assert_eq!(canvas.foreground_count(), 1);
        assert!(canvas.pixel(Point { x: 1, y: 1 }));
    }
}
