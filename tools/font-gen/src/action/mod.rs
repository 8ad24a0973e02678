//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

pub mod generate;
pub mod preview;

use std::{fs, path::Path};

use atlas::{
    canvas::Bitmap,
    glyph::FontAtlas,
    preview::{PreviewOptions, compose},
};

use crate::{config::CanvasConfig, output};

/// Renders `text` in every font of `atlas` and saves one image per font into `dir`.
///
/// Failures are logged and do not stop the remaining previews. Returns the number of images
/// written.
pub fn write_previews(
    dir: &Path,
    atlas: &FontAtlas,
    text: &str,
    options: &PreviewOptions,
    canvas: CanvasConfig,
) -> usize {
    if let Err(error) = fs::create_dir_all(dir) {
        log::error!("failed to create preview directory {}: {error}", dir.display());
        return 0;
    }

    let mut bitmap = Bitmap::new(canvas.width, canvas.height);
    let mut written = 0;
    for (label, glyphs) in atlas.iter() {
        let preview = compose(glyphs, text, options, &mut bitmap);
        if !preview.missing.is_empty() {
            log::warn!("{label:?} is missing {:?} in its preview", preview.missing);
        }

        let path = dir.join(output::preview_file_name(label));
        match output::write_png(&path, &bitmap) {
            Ok(()) => {
                log::debug!("wrote preview of {label:?} to {}", path.display());
                written += 1;
            }
            Err(error) => log::error!("skipping preview of {label:?}: {error:#}"),
        }
    }

    written
}
