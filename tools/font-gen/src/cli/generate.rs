//! Command line parsing and [`Action::Generate`][ag] construction.
//!
//! [ag]: crate::cli::Action::Generate

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Description of which fonts to extract and where to place the results.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GenerateConfiguration {
    /// The configuration file to load, or [`None`] to use the built-in configuration.
    pub config_path: Option<PathBuf>,
    /// Directories searched for font files, replacing the configured ones when not empty.
    pub font_dirs: Vec<PathBuf>,
    /// The path at which to place the artifact.
    pub output_path: PathBuf,
    /// The directory in which to place preview images, or [`None`] if previews are disabled.
    pub preview_dir: Option<PathBuf>,
}

/// Parses the arguments of the `generate` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "arguments with default values are always present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> GenerateConfiguration {
    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let font_dirs = matches
        .get_many::<PathBuf>("font-dir")
        .map(|dirs| dirs.cloned().collect())
        .unwrap_or_default();
    let output_path = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .expect("output has a default value");
    let preview_dir = if matches.get_flag("no-preview") {
        None
    } else {
        matches.get_one::<PathBuf>("preview-dir").cloned()
    };

    GenerateConfiguration {
        config_path,
        font_dirs,
        output_path,
        preview_dir,
    }
}

/// Returns the command parser for an [`Action::Generate`][ag].
///
/// [ag]: crate::cli::Action::Generate
pub fn subcommand_parser() -> Command {
    let config = Arg::new("config")
        .long("config")
        .value_parser(clap::value_parser!(PathBuf))
        .help("TOML file describing the alphabet, canvas, previews, and fonts");

    let font_dir = Arg::new("font-dir")
        .long("font-dir")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Append)
        .help("Directory searched for font files; may be repeated");

    let output = Arg::new("output")
        .long("output")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value("font.lua");

    let preview_dir = Arg::new("preview-dir")
        .long("preview-dir")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value(".");

    let no_preview = Arg::new("no-preview")
        .long("no-preview")
        .action(ArgAction::SetTrue)
        .conflicts_with("preview-dir");

    Command::new("generate")
        .about("Extract every configured font and write the artifact and previews")
        .arg(config)
        .arg(font_dir)
        .arg(output)
        .arg(preview_dir)
        .arg(no_preview)
}
