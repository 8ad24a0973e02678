//! Tool for extracting the pixels of every glyph of a set of fonts into a nested-table artifact,
//! and for rendering previews of the extracted glyphs.

use anyhow::Result;
use cli::Action;

pub mod action;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod raster;

fn main() -> Result<()> {
    let (action, log_level) = cli::get_action();
    logging::init(log_level);

    match action {
        Action::Generate(config) => action::generate::generate(config),
        Action::Preview(config) => action::preview::preview(config),
    }
}
