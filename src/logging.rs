//! Logging setup for applications embedding the library.
//!
//! The library itself only emits records through the `log` facade. This
//! module wires a `fern` dispatcher to stderr with colored level names,
//! optional timestamps and per-component level overrides.

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};
use std::str::FromStr;
use time::macros::format_description;
use time::OffsetDateTime;

/// Base level for a `-v` count: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Parse a `component[=level]` override.
///
/// Bare component names are taken relative to this crate, so `parser=trace`
/// targets `fyconf::parser`. A missing level means debug.
pub fn parse_component(spec: &str) -> Result<(String, LevelFilter), String> {
    let (component, level) = match spec.split_once('=') {
        Some((component, level)) => {
            let level = LevelFilter::from_str(level.trim()).map_err(|_| {
                format!(
                    "Invalid log level '{}' for '{}': expected off, error, warn, info, debug or trace",
                    level.trim(),
                    component.trim()
                )
            })?;
            (component.trim(), level)
        }
        None => (spec.trim(), LevelFilter::Debug),
    };
    if component.is_empty() {
        return Err(format!("Invalid log component specification '{}'", spec));
    }
    let crate_name = env!("CARGO_CRATE_NAME");
    let target = if component == crate_name || component.contains("::") {
        component.to_string()
    } else {
        format!("{}::{}", crate_name, component)
    };
    Ok((target, level))
}

fn colored_level(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".bright_red().bold(),
        Level::Warn => "WARN".yellow().bold(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".dimmed(),
    }
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ))
    .unwrap_or_default()
}

/// Install the global logger.
///
/// Fails when a component specification is invalid or a logger is already
/// installed.
pub fn setup(verbose: u8, components: &[&str], log_time: bool) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = colored_level(record.level());
            if log_time {
                out.finish(format_args!(
                    "{} {} [{}] {}",
                    timestamp().dimmed(),
                    level,
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!("{} [{}] {}", level, record.target(), message))
            }
        })
        .level(level_for_verbosity(verbose));

    for spec in components {
        let (target, level) = parse_component(spec)?;
        dispatch = dispatch.level_for(target, level);
    }

    dispatch
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Failed to set up logging: {}", e))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn test_parse_component_relative_name() {
        assert_eq!(
            parse_component("parser=trace").unwrap(),
            ("fyconf::parser".to_string(), LevelFilter::Trace)
        );
        assert_eq!(
            parse_component(" anchor ").unwrap(),
            ("fyconf::anchor".to_string(), LevelFilter::Debug)
        );
    }

    #[test]
    fn test_parse_component_absolute_name() {
        assert_eq!(
            parse_component("fyconf=info").unwrap(),
            ("fyconf".to_string(), LevelFilter::Info)
        );
        assert_eq!(
            parse_component("other::module=off").unwrap(),
            ("other::module".to_string(), LevelFilter::Off)
        );
    }

    #[test]
    fn test_parse_component_errors() {
        assert!(parse_component("parser=loud").unwrap_err().contains("loud"));
        assert!(parse_component("=debug").is_err());
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 12, "{}", ts);
        assert_eq!(&ts[2..3], ":");
    }
}
