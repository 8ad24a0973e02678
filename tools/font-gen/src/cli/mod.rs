//! Command line parsing and [`Action`] construction.

pub mod generate;
pub mod preview;

use clap::{Arg, Command, builder::EnumValueParser};

pub use generate::GenerateConfiguration;
pub use preview::PreviewConfiguration;

use crate::logging::LogLevel;

/// Parses `font-gen`'s arguments to construct an [`Action`] and the requested [`LogLevel`].
#[expect(
    clippy::missing_panics_doc,
    reason = "clap guarantees that a subcommand is present"
)]
pub fn get_action() -> (Action, LogLevel) {
    let matches = command_parser().get_matches();

    let (subcommand_name, subcommand_matches) =
        matches.subcommand().expect("subcommand is required");
    let log_level = subcommand_matches
        .get_one::<LogLevel>("log-level")
        .copied()
        .unwrap_or_default();

    let action = match subcommand_name {
        "generate" => Action::Generate(generate::parse_arguments(subcommand_matches)),
        "preview" => Action::Preview(preview::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    (action, log_level)
}

/// Returns the command parser for all [`Action`]s.
fn command_parser() -> Command {
    let log_level = Arg::new("log-level")
        .long("log-level")
        .value_parser(EnumValueParser::<LogLevel>::new())
        .default_value("info")
        .global(true);

    Command::new("font-gen")
        .about("Extracts per-glyph pixel offsets from fonts into a nested-table artifact")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(log_level)
        .subcommand(generate::subcommand_parser())
        .subcommand(preview::subcommand_parser())
}

/// The action to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Extract the configured fonts and write the artifact.
    Generate(GenerateConfiguration),
    /// Render previews from a previously written artifact.
    Preview(PreviewConfiguration),
}
