//! Round-trip document engine.
//!
//! Text is split into [`Line`]s once, checked against the 2-space nesting
//! rule, then shared by every node read from it. Nodes are classified
//! lazily: a mapping only looks for its keys when asked.
//!
//! # Module Organization
//!
//! - [`line`]: physical lines and the helpers classifying their text
//! - [`filter`]: line selection and the well-indentation pass
//! - [`node`]: node model and structural ordering
//! - [`reader`]: node construction from lines
//! - [`comment`]: comment association
//! - [`printer`]: pretty-printing
//! - [`builder`]: programmatic construction
//! - [`query`]: dot-path queries used by the command line

mod builder;
mod comment;
mod error;
pub mod filter;
pub mod line;
mod node;
mod path;
mod printer;
mod query;
mod reader;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub use builder::{
    new_mapping_builder, new_scalar_builder, new_sequence_builder, new_stream_builder,
    MappingBuilder, ScalarBuilder, SequenceBuilder, StreamBuilder,
};
pub use error::Error;
pub use line::Line;
pub use node::{
    compare, compare_mappings, compare_scalars, compare_sequences, compare_streams, Comment,
    Mapping, Node, NodeKind, Scalar, ScalarStyle, Sequence, Stream,
};
pub use path::split_path;
pub use printer::{escape, print, to_string};
pub use query::{
    get_at_path, get_comment, get_length, get_type, get_value, key_values, keys, type_name, values,
};

/// How nesting mistakes are handled while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Any line off the 2-space grid is an [`Error::Indentation`]
    #[default]
    Strict,
    /// Misplaced lines are moved to the indentation they most likely meant
    Lenient,
}

impl Mode {
    pub fn from_guess(guess_indentation: bool) -> Self {
        if guess_indentation {
            Mode::Lenient
        } else {
            Mode::Strict
        }
    }
}

fn prepare(text: &str, mode: Mode) -> Result<Arc<[Line]>, Error> {
    let lines = Line::split(text);
    let checked = filter::well_indented(&lines, mode)?;
    Ok(checked.into())
}

// =============================================================================
// Loading
// =============================================================================

/// Load a document from text.
///
/// Two documents or more give a [`Stream`]; a single document gives its root
/// node; no content at all gives a null scalar.
pub fn load_str(text: &str, mode: Mode) -> Result<Node, Error> {
    reader::read_root(prepare(text, mode)?)
}

/// Load a document from any reader, consumed to the end first.
pub fn load_reader<R: Read>(mut source: R, mode: Mode) -> Result<Node, Error> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;
    load_str(&text, mode)
}

pub fn load_file<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Node, Error> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
    load_str(&text, mode)
}

/// Load text as a stream whatever its number of documents.
pub fn load_stream_str(text: &str, mode: Mode) -> Result<Stream, Error> {
    Ok(reader::read_stream(prepare(text, mode)?))
}
