//! Logging implementation for `font-gen`.
//!
//! Messages are written to standard error as `[LEVEL][target]: message`.

use std::io::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};

/// The global [`Log`] implementation.
static LOGGER: Logger = Logger;

/// Installs the standard error logger and sets the active filter to `level`.
///
/// Calling this more than once only updates the filter.
pub fn init(level: LogLevel) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.to_level_filter());
}

/// Implementation of [`Log`] using standard error.
struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = writeln!(
            io::stderr().lock(),
            "[{}][{}]: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// The verbosity levels selectable from the command line.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum LogLevel {
    /// Nothing is logged.
    Off,
    /// Only errors are logged.
    Error,
    /// Errors and warnings are logged.
    Warn,
    /// Progress information is logged.
    #[default]
    Info,
    /// Bounds and resolved font files are logged.
    Debug,
    /// Every extracted glyph is logged.
    Trace,
}

impl LogLevel {
    /// Returns the textual representation of the [`LogLevel`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Returns the [`LevelFilter`] letting through this [`LogLevel`] and everything more severe.
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl clap::ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        static LEVELS: &[LogLevel] = &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];

        LEVELS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(LogLevel::default().to_level_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Off.to_level_filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn levels_parse_from_their_names() {
        use clap::ValueEnum;

        for level in LogLevel::value_variants() {
            assert_eq!(LogLevel::from_str(level.as_str(), false), Ok(*level));
        }
    }
}
