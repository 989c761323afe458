//! Logger setup for the command line.
//!
//! `-v` raises the global level (warn, info, debug, trace); `--log` entries
//! set the level of one component, `reader` standing for
//! `rtyaml::yaml::reader`.

use colored::*;
use log::LevelFilter;
use std::str::FromStr;

const COMPONENT_PREFIX: &str = "rtyaml::yaml::";

fn global_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Parse a `component[=level]` entry; a bare component logs at debug.
fn component_level(spec: &str) -> Result<(String, LevelFilter), String> {
    let (name, level) = match spec.split_once('=') {
        Some((name, level)) => (
            name.trim(),
            LevelFilter::from_str(level.trim())
                .map_err(|_| format!("Invalid log level '{}' for '{}'", level.trim(), name))?,
        ),
        None => (spec, LevelFilter::Debug),
    };
    if name.is_empty() {
        return Err(format!("Missing component name in log spec '{}'", spec));
    }
    let target = if name.contains("::") || name == "rtyaml" {
        name.to_string()
    } else {
        format!("{}{}", COMPONENT_PREFIX, name)
    };
    Ok((target, level))
}

fn colored_level(level: log::Level) -> ColoredString {
    match level {
        log::Level::Error => "ERROR".bright_red(),
        log::Level::Warn => "WARN ".yellow(),
        log::Level::Info => "INFO ".green(),
        log::Level::Debug => "DEBUG".blue(),
        log::Level::Trace => "TRACE".dimmed(),
    }
}

fn timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(time::macros::format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ))
    .unwrap_or_default()
}

pub fn setup(verbose: u8, logs: Vec<&str>, log_time: bool) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            let target = record
                .target()
                .strip_prefix(COMPONENT_PREFIX)
                .unwrap_or(record.target());
            if log_time {
                out.finish(format_args!(
                    "{} {} [{}] {}",
                    timestamp().dimmed(),
                    colored_level(record.level()),
                    target,
                    message
                ))
            } else {
                out.finish(format_args!(
                    "{} [{}] {}",
                    colored_level(record.level()),
                    target,
                    message
                ))
            }
        })
        .level(global_level(verbose));

    for spec in logs {
        let (target, level) = component_level(spec)?;
        dispatch = dispatch.level_for(target, level);
    }

    dispatch
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Failed to set up logging: {}", e))
}
