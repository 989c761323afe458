//! Round-trip YAML-like documents: load text into a node tree keeping its
//! comments, query it, build new trees and print them back.

pub mod yaml;

pub use yaml::{load_file, load_reader, load_stream_str, load_str, Error, Mode, Node};
