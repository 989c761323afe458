use clap::{Parser, Subcommand};

/// Query and pretty-print YAML-like documents read from stdin, comments
/// included
#[derive(Parser)]
#[command(author, about, long_about=None, disable_version_flag(true))]
pub struct Args {
    /// force color mode (defaults to check tty)
    #[arg(long)]
    pub color: bool,

    /// force no-color mode (defaults to check tty)
    #[arg(long)]
    pub no_color: bool,

    /// display version and quit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// prepend time to each log line
    #[arg(long)]
    pub log_time: bool,

    /// Turn general verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configure component wise logging (COMPONENT[=LEVEL])
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub log: Option<Vec<String>>,

    /// quiet path errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output YAML instead of raw values
    #[arg(short = 'y', long)]
    pub yaml: bool,

    /// Fix badly indented lines instead of failing
    #[arg(short = 'g', long)]
    pub guess_indentation: bool,

    #[command(subcommand)]
    pub action: Option<Actions>,
}

#[derive(Subcommand)]
pub enum Actions {
    /// Get node value from given path
    GetValue {
        /// The path to get value of
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Printed instead when the path does not exist
        #[clap(name = "DEFAULT")]
        default: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get node type from given path
    GetType {
        /// The path to get type of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    /// Get node length from given path
    GetLength {
        /// The path to get length of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    /// Get keys of mapping from given path
    Keys {
        /// The path to get keys from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get keys of mapping from given path, separated by NUL char
    #[clap(name = "keys-0")]
    Keys0 {
        /// The path to get keys from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get values of mapping from given path
    Values {
        /// The path to get values from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get values of mapping from given path, separated by NUL char
    #[clap(name = "values-0")]
    Values0 {
        /// The path to get values from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get key and values of mapping from given path
    KeyValues {
        /// The path to get entries from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get key and values of mapping from given path, separated by NUL char
    #[clap(name = "key-values-0")]
    KeyValues0 {
        /// The path to get entries from
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Output YAML instead of raw values
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    /// Get the comment attached to the node at given path
    Comment {
        /// The path to get comment of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    /// Pretty-print the document, or the node at given path
    Print {
        /// The path to print
        #[clap(name = "PATH")]
        path: Option<String>,
    },
}
