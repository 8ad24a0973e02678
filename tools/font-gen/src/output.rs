//! Writing of the artifact and of preview images.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use atlas::{
    canvas::{Bitmap, Canvas, Point},
    glyph::FontAtlas,
    table::{ATLAS_NAME, Assignment, Value},
};
use image::{GrayImage, Luma};

/// Writes `atlas` to `path` as `fonts = { ... }`, creating parent directories as needed.
///
/// # Errors
///
/// Returns errors when the file or its parent directories cannot be created or written.
pub fn write_artifact(path: &Path, atlas: &FontAtlas) -> Result<()> {
    if let Some(folder) = path.parent() {
        fs::create_dir_all(folder)
            .with_context(|| format!("failed to create {}", folder.display()))?;
    }

    let value = Value::from(atlas);
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    Assignment {
        name: ATLAS_NAME,
        value: &value,
    }
    .dump(&mut writer)
    .and_then(|()| writer.flush())
    .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Returns the name of the preview image of the font labeled `label`.
///
/// Characters other than ASCII letters, digits, spaces, `(`, `)`, `.`, `_`, and `-` are replaced
/// by `_`.
pub fn preview_file_name(label: &str) -> String {
    let mut name = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '(' | ')' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    name.push_str(".png");
    name
}

/// Saves `bitmap` to `path` as a PNG image, with foreground pixels black on a white background.
///
/// # Errors
///
/// Returns errors when `bitmap` is too large for an image or the image cannot be written.
pub fn write_png(path: &Path, bitmap: &Bitmap) -> Result<()> {
    let width = u32::try_from(bitmap.width()).context("preview is too wide")?;
    let height = u32::try_from(bitmap.height()).context("preview is too tall")?;

    let image = GrayImage::from_fn(width, height, |x, y| {
        let point = Point {
            x: x as usize,
            y: y as usize,
        };
        if bitmap.pixel(point) {
            Luma([0])
        } else {
            Luma([255])
        }
    });

    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas::{
        glyph::{FontGlyphs, GlyphPixelSet, Offset},
        table::parse_assignment,
    };

    /// Creates an empty directory unique to `name` under the system temporary directory.
    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("font-gen-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(preview_file_name("Small (7 tall)"), "Small (7 tall).png");
        assert_eq!(preview_file_name("a/b\\c:d"), "a_b_c_d.png");
        assert_eq!(preview_file_name("x_y-z.1"), "x_y-z.1.png");
        assert_eq!(preview_file_name("é"), "_.png");
    }

    #[test]
    fn artifact_is_readable() {
        let dir = scratch_dir("artifact");
        let path = dir.join("nested").join("font.lua");

        let glyphs: FontGlyphs = [
            ('A', GlyphPixelSet::new(vec![Offset { x: 0, y: 1 }])),
            (' ', GlyphPixelSet::default()),
        ]
        .into_iter()
        .collect();
        let atlas: FontAtlas = [(String::from("Small (7 tall)"), glyphs)]
            .into_iter()
            .collect();

        write_artifact(&path, &atlas).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            r#"fonts = { ["Small (7 tall)"] = { ["A"] = { { 0, 1 } }, [" "] = {  } } }"#
        );

        let (name, value) = parse_assignment(&text).unwrap();
        assert_eq!(name, ATLAS_NAME);
        assert_eq!(FontAtlas::try_from(&value).unwrap(), atlas);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn png_matches_bitmap() {
        let dir = scratch_dir("png");
        let path = dir.join("preview.png");

        let mut bitmap = Bitmap::new(3, 2);
        bitmap.set_pixel(Point { x: 2, y: 1 }, true);
        write_png(&path, &bitmap).unwrap();

        let image = image::open(&path).unwrap().into_luma8();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Luma([0]));
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));

        fs::remove_dir_all(dir).unwrap();
    }
}
