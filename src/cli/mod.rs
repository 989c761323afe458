mod def;
include!(concat!(env!("OUT_DIR"), "/rustc_version.rs"));
use clap::Parser;
use std::io::Write;

use rtyaml::yaml::{self, Mode, Node};

pub mod log;
pub mod output;

use output::{render_items, render_kv_items, OutputPolicy, YamlOutput};

/// Outcome of a failed query: quiet path errors end with exit status 1.
fn failure(e: yaml::Error, quiet: bool) -> Result<bool, String> {
    match e {
        yaml::Error::Path(_) if quiet => Ok(false),
        e => Err(e.into()),
    }
}

fn emit(text: &str) -> Result<(), String> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| e.to_string())
}

fn load_stdin(mode: Mode) -> Result<Node, String> {
    ::log::debug!("reading document from stdin ({:?} mode)", mode);
    Ok(yaml::load_reader(std::io::stdin().lock(), mode)?)
}

pub fn run() -> Result<bool, String> {
    let cli = def::Args::parse();

    // Split log strings upon comma, trim them and flatten all in
    // `logs`, remove empty values
    let logs = cli.log.unwrap_or_default();
    let logs = logs
        .iter()
        .flat_map(|log| log.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>();

    log::setup(cli.verbose, logs, cli.log_time)?;

    if cli.color && cli.no_color {
        return Err("Cannot use both --color and --no-color".to_string());
    }
    if cli.color {
        colored::control::set_override(true);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.version {
        println!("version: {}", env!("CARGO_PKG_VERSION"));
        println!("Rust: {}", RUSTC_VERSION);
        return Ok(true);
    }

    let action = match &cli.action {
        Some(action) => action,
        None => return Err("Missing action".to_string()),
    };
    let mode = Mode::from_guess(cli.guess_indentation);
    let root = load_stdin(mode)?;

    match action {
        def::Actions::GetValue {
            path,
            default,
            yaml: as_yaml,
        } => {
            let as_yaml = cli.yaml || *as_yaml;
            match yaml::get_value(path.as_deref(), &root) {
                Ok(value) => emit(&value.format(as_yaml)?)?,
                Err(yaml::Error::Path(_)) if default.is_some() => {
                    emit(default.as_deref().unwrap_or_default())?
                }
                Err(e) => return failure(e, cli.quiet),
            }
        }
        def::Actions::GetType { path } => match yaml::get_type(path.as_deref(), &root) {
            Ok(t) => println!("{}", t),
            Err(e) => return failure(e, cli.quiet),
        },
        def::Actions::GetLength { path } => match yaml::get_length(path.as_deref(), &root) {
            Ok(len) => println!("{}", len),
            Err(e) => return failure(e, cli.quiet),
        },
        def::Actions::Keys { path, yaml: as_yaml }
        | def::Actions::Keys0 { path, yaml: as_yaml } => {
            let policy = policy(action, cli.yaml || *as_yaml);
            match yaml::keys(path.as_deref(), &root) {
                Ok(keys) => emit(&render_items(&keys, &policy)?)?,
                Err(e) => return failure(e, cli.quiet),
            }
        }
        def::Actions::Values { path, yaml: as_yaml }
        | def::Actions::Values0 { path, yaml: as_yaml } => {
            let policy = policy(action, cli.yaml || *as_yaml);
            match yaml::values(path.as_deref(), &root) {
                Ok(values) => emit(&render_items(&values, &policy)?)?,
                Err(e) => return failure(e, cli.quiet),
            }
        }
        def::Actions::KeyValues { path, yaml: as_yaml }
        | def::Actions::KeyValues0 { path, yaml: as_yaml } => {
            let policy = policy(action, cli.yaml || *as_yaml);
            match yaml::key_values(path.as_deref(), &root) {
                Ok(entries) => emit(&render_kv_items(&entries, &policy)?)?,
                Err(e) => return failure(e, cli.quiet),
            }
        }
        def::Actions::Comment { path } => match yaml::get_comment(path.as_deref(), &root) {
            Ok(comment) if comment.is_empty() => {}
            Ok(comment) => println!("{}", comment),
            Err(e) => return failure(e, cli.quiet),
        },
        def::Actions::Print { path } => match yaml::get_value(path.as_deref(), &root) {
            Ok(node) => {
                let mut stdout = std::io::stdout().lock();
                yaml::print(&node, &mut stdout)?;
            }
            Err(e) => return failure(e, cli.quiet),
        },
    }
    Ok(true)
}

fn policy(action: &def::Actions, yaml_mode: bool) -> OutputPolicy {
    match action {
        def::Actions::Keys0 { .. }
        | def::Actions::Values0 { .. }
        | def::Actions::KeyValues0 { .. } => OutputPolicy::nul(yaml_mode),
        _ => OutputPolicy::newline(yaml_mode),
    }
}
