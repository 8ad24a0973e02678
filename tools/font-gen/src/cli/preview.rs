//! Command line parsing and [`Action::Preview`][ap] construction.
//!
//! [ap]: crate::cli::Action::Preview

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};

/// Description of which artifact to preview and how.
///
/// Every optional field overrides the matching setting of the configuration file.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PreviewConfiguration {
    /// The artifact to read glyphs from.
    pub atlas_path: PathBuf,
    /// The configuration file supplying preview settings.
    pub config_path: Option<PathBuf>,
    /// The directory in which to place preview images.
    pub preview_dir: PathBuf,
    /// The sample text to render.
    pub text: Option<String>,
    /// Pixels left blank between two characters.
    pub gap: Option<i32>,
    /// The advance of a space.
    pub space_width: Option<i32>,
}

/// Parses the arguments of the `preview` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "clap guarantees that required arguments are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> PreviewConfiguration {
    PreviewConfiguration {
        atlas_path: matches
            .get_one::<PathBuf>("atlas")
            .cloned()
            .expect("atlas is required"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        preview_dir: matches
            .get_one::<PathBuf>("preview-dir")
            .cloned()
            .expect("preview-dir has a default value"),
        text: matches.get_one::<String>("text").cloned(),
        gap: matches.get_one::<i32>("gap").copied(),
        space_width: matches.get_one::<i32>("space-width").copied(),
    }
}

/// Returns the command parser for an [`Action::Preview`][ap].
///
/// [ap]: crate::cli::Action::Preview
pub fn subcommand_parser() -> Command {
    let atlas = Arg::new("atlas")
        .long("atlas")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    let config = Arg::new("config")
        .long("config")
        .value_parser(clap::value_parser!(PathBuf));

    let preview_dir = Arg::new("preview-dir")
        .long("preview-dir")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value(".");

    let text = Arg::new("text").long("text");

    let gap = Arg::new("gap")
        .long("gap")
        .value_parser(clap::value_parser!(i32))
        .allow_negative_numbers(true);

    let space_width = Arg::new("space-width")
        .long("space-width")
        .value_parser(clap::value_parser!(i32).range(0..));

    Command::new("preview")
        .about("Render sample text from a previously written artifact")
        .arg(atlas)
        .arg(config)
        .arg(preview_dir)
        .arg(text)
        .arg(gap)
        .arg(space_width)
}
