use anyhow::{Context, Result};
use flexi_logger::{DeferredNow, Logger, LoggerHandle};
use log::Record;
use std::io::Write;

/// Start the stderr logger; `warn` by default, `debug` when verbose
///
/// The returned handle must be kept alive for the duration of the run.
pub fn init_logging(verbose: bool, color_enabled: bool) -> Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };

    let logger = Logger::try_with_str(level).context("Invalid log specification")?;
    let logger = if color_enabled {
        logger.format(color_format)
    } else {
        logger.format(plain_format)
    };

    logger.start().context("Failed to start logger")
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// Format: "HH:MM:SS.mmm WRN message"
fn plain_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    let level = level_abbr(record.level());
    let level = match record.level() {
        log::Level::Error => level.red().bold(),
        log::Level::Warn => level.yellow(),
        log::Level::Info => level.green(),
        log::Level::Debug => level.blue(),
        log::Level::Trace => level.dimmed(),
    };

    write!(
        w,
        "{} {} {}",
        now.format("%H:%M:%S%.3f").to_string().dimmed(),
        level,
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_abbr() {
        assert_eq!(level_abbr(log::Level::Warn), "WRN");
        assert_eq!(level_abbr(log::Level::Debug), "DBG");
    }
}
