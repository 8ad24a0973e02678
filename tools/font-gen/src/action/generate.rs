//! Extraction of every configured font into the artifact.

use anyhow::{Result, bail};
use atlas::{canvas::Bitmap, extract::extract_all};

use crate::{
    action::write_previews, cli::GenerateConfiguration, config::Config, output, raster::FontLibrary,
};

/// Extracts every configured font, writes the artifact, and renders previews when requested.
///
/// The artifact is written even when some fonts fail, and contains every font that succeeded.
///
/// # Errors
///
/// Returns errors when the configuration is unusable, the artifact cannot be written, or any
/// font failed to extract.
pub fn generate(config: GenerateConfiguration) -> Result<()> {
    let mut settings = Config::load(config.config_path.as_deref())?;
    if !config.font_dirs.is_empty() {
        settings.font_dirs = config.font_dirs;
    }
    settings.validate()?;

    let alphabet = settings.alphabet();
    let fonts = settings.fonts();
    log::info!(
        "extracting {} characters from {} fonts",
        alphabet.len(),
        fonts.len()
    );

    let mut library = FontLibrary::new(settings.font_dirs.clone());
    let mut canvas = Bitmap::new(settings.canvas.width, settings.canvas.height);
    let extraction = extract_all(
        &mut library,
        &mut canvas,
        fonts.iter().map(|(label, font)| (label.as_str(), font)),
        &alphabet,
    );

    output::write_artifact(&config.output_path, &extraction.atlas)?;
    log::info!(
        "wrote {} fonts to {}",
        extraction.atlas.len(),
        config.output_path.display()
    );

    if let Some(preview_dir) = &config.preview_dir {
        let written = write_previews(
            preview_dir,
            &extraction.atlas,
            &settings.preview.text,
            &settings.preview.options(),
            settings.canvas,
        );
        log::info!("wrote {written} previews to {}", preview_dir.display());
    }

    if !extraction.failures.is_empty() {
        let labels = extraction
            .failures
            .iter()
            .map(|(label, _)| format!("{label:?}"))
            .collect::<Vec<_>>();
        bail!(
            "{} of {} fonts failed: {}",
            labels.len(),
            fonts.len(),
            labels.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    /// Creates an empty directory unique to `name` under the system temporary directory.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("font-gen-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_fonts_still_write_artifact() {
        let dir = scratch_dir("generate-missing");
        let output_path = dir.join("font.lua");

        let result = generate(GenerateConfiguration {
            config_path: None,
            font_dirs: vec![dir.join("no-fonts-here")],
            output_path: output_path.clone(),
            preview_dir: None,
        });

        let error = result.unwrap_err().to_string();
        assert!(error.starts_with("4 of 4 fonts failed"), "{error}");
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "fonts = {  }");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn invalid_configuration_aborts_before_writing() {
        let dir = scratch_dir("generate-invalid");
        let config_path = dir.join("config.toml");
        let output_path = dir.join("font.lua");
        fs::write(&config_path, "alphabet = \"\"").unwrap();

        let result = generate(GenerateConfiguration {
            config_path: Some(config_path),
            font_dirs: Vec::new(),
            output_path: output_path.clone(),
            preview_dir: None,
        });

        assert!(result.is_err());
        assert!(!output_path.exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
