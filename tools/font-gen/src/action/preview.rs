//! Rendering previews from a previously written artifact.

use std::fs;

use anyhow::{Context, Result};
use atlas::{
    glyph::FontAtlas,
    table::{ATLAS_NAME, parse_assignment},
};

use crate::{action::write_previews, cli::PreviewConfiguration, config::Config};

/// Reads the artifact at [`PreviewConfiguration::atlas_path`] and renders a preview of every
/// font it contains.
///
/// # Errors
///
/// Returns errors when the configuration or the artifact cannot be read or parsed.
pub fn preview(config: PreviewConfiguration) -> Result<()> {
    let settings = Config::load(config.config_path.as_deref())?;
    let mut options = settings.preview.options();
    if let Some(gap) = config.gap {
        options.gap = gap;
    }
    if config.space_width.is_some() {
        options.space_width = config.space_width;
    }
    let text = config.text.as_deref().unwrap_or(&settings.preview.text);

    let atlas = read_atlas(&config.atlas_path)?;
    log::info!(
        "read {} fonts from {}",
        atlas.len(),
        config.atlas_path.display()
    );

    let written = write_previews(
        &config.preview_dir,
        &atlas,
        text,
        &options,
        settings.canvas,
    );
    log::info!(
        "wrote {written} previews to {}",
        config.preview_dir.display()
    );

    Ok(())
}

/// Reads and parses the artifact at `path`.
fn read_atlas(path: &std::path::Path) -> Result<FontAtlas> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (name, value) =
        parse_assignment(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    if name != ATLAS_NAME {
        log::warn!("{} assigns {name:?} instead of {ATLAS_NAME:?}", path.display());
    }

    FontAtlas::try_from(&value).with_context(|| format!("malformed atlas in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Creates an empty directory unique to `name` under the system temporary directory.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("font-gen-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn renders_previews_from_artifact() {
        let dir = scratch_dir("preview-artifact");
        let atlas_path = dir.join("font.lua");
        fs::write(
            &atlas_path,
            r#"fonts = { ["Tiny"] = { ["O"] = { { 0, 0 }, { 1, 0 } }, ["."] = { { 0, 1 } } } }"#,
        )
        .unwrap();

        preview(PreviewConfiguration {
            atlas_path,
            config_path: None,
            preview_dir: dir.join("previews"),
            text: Some(String::from("O.O")),
            gap: Some(1),
            space_width: None,
        })
        .unwrap();

        assert!(dir.join("previews").join("Tiny.png").is_file());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn malformed_artifact_is_an_error() {
        let dir = scratch_dir("preview-malformed");
        let atlas_path = dir.join("font.lua");
        fs::write(&atlas_path, "fonts = { 1, 2 }").unwrap();

        let result = preview(PreviewConfiguration {
            atlas_path: atlas_path.clone(),
            config_path: None,
            preview_dir: dir.clone(),
            text: None,
            gap: None,
            space_width: None,
        });
        assert!(result.is_err());

        fs::write(&atlas_path, format!("fonts = {}", "{".repeat(100_000))).unwrap();
        let result = preview(PreviewConfiguration {
            atlas_path,
            config_path: None,
            preview_dir: dir.clone(),
            text: None,
            gap: None,
            space_width: None,
        });
        assert!(result.is_err());

        fs::remove_dir_all(dir).unwrap();
    }
}
