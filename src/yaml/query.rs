//! Path queries over node trees.
//!
//! Mappings are traversed by key, sequences and streams by index. Type names
//! follow the command-line conventions: `NoneType`, `bool`, `int`, `float`,
//! `str`, `sequence`, `struct` and `stream`.

use super::error::Error;
use super::node::{Comment, Mapping, Node, Scalar};
use super::path::{resolve_index, split_path};

// =============================================================================
// Type Name Helpers
// =============================================================================

fn scalar_type_name(scalar: &Scalar) -> &'static str {
    let value = match scalar.value() {
        Some(value) => value,
        None => return "NoneType",
    };
    match value {
        "true" | "false" | "True" | "False" => "bool",
        "null" | "~" | "Null" | "NULL" => "NoneType",
        _ if value.parse::<i64>().is_ok() => "int",
        _ if value.contains(['.', 'e', 'E']) && value.parse::<f64>().is_ok() => "float",
        _ => "str",
    }
}

/// Type name of `node` as shown to users.
pub fn type_name(node: &Node) -> &'static str {
    match node {
        Node::Scalar(scalar) => scalar_type_name(scalar),
        Node::Sequence(_) => "sequence",
        Node::Mapping(_) => "struct",
        Node::Stream(_) => "stream",
    }
}

fn unsupported(action: &str, node: &Node, expected: &str) -> Error {
    Error::Type(format!(
        "{} does not support '{}' type. Please provide or select a {}.",
        action,
        type_name(node),
        expected
    ))
}

// =============================================================================
// Path Navigation
// =============================================================================

fn lookup(mapping: &Mapping, part: &str, path: &str) -> Result<Node, Error> {
    if let Some(value) = mapping.get(part)? {
        return Ok(value);
    }
    if part.is_empty() {
        if let Some(value) = mapping.value(&Node::Scalar(Scalar::null()))? {
            return Ok(value);
        }
    }
    Err(Error::Path(format!(
        "invalid path '{}', missing key '{}' in struct.",
        path, part
    )))
}

fn step(current: &Node, part: &str, path: &str) -> Result<Node, Error> {
    let mut items = match current {
        Node::Mapping(mapping) => return lookup(mapping, part, path),
        Node::Sequence(sequence) => sequence.values()?,
        Node::Stream(stream) => stream.values()?,
        Node::Scalar(_) => {
            return Err(Error::Path(format!(
                "invalid path '{}', cannot traverse scalar at '{}'.",
                path, part
            )))
        }
    };
    let index = resolve_index(part, items.len(), path)?;
    Ok(items.swap_remove(index))
}

/// Node found at `path` from `node`, `node` itself when there is no path.
pub fn get_at_path(node: &Node, path: Option<&str>) -> Result<Node, Error> {
    let path = match path {
        None => return Ok(node.clone()),
        Some(path) => path,
    };
    let mut current = node.clone();
    for part in split_path(path) {
        current = step(&current, &part, path)?;
        log::trace!("path '{}': '{}' is a {}", path, part, current.kind());
    }
    Ok(current)
}

// =============================================================================
// Queries
// =============================================================================

pub fn get_value(path: Option<&str>, node: &Node) -> Result<Node, Error> {
    get_at_path(node, path)
}

pub fn get_type(path: Option<&str>, node: &Node) -> Result<&'static str, Error> {
    Ok(type_name(&get_at_path(node, path)?))
}

pub fn get_length(path: Option<&str>, node: &Node) -> Result<usize, Error> {
    let target = get_at_path(node, path)?;
    match &target {
        Node::Mapping(mapping) => mapping.len(),
        Node::Sequence(sequence) => sequence.len(),
        Node::Stream(stream) => stream.len(),
        Node::Scalar(_) => Err(unsupported("get-length", &target, "sequence or struct")),
    }
}

fn mapping_at(action: &str, path: Option<&str>, node: &Node) -> Result<Mapping, Error> {
    match get_at_path(node, path)? {
        Node::Mapping(mapping) => Ok(mapping),
        other => Err(unsupported(action, &other, "struct")),
    }
}

pub fn keys(path: Option<&str>, node: &Node) -> Result<Vec<Node>, Error> {
    mapping_at("keys", path, node)?.keys()
}

pub fn values(path: Option<&str>, node: &Node) -> Result<Vec<Node>, Error> {
    mapping_at("values", path, node)?.values()
}

pub fn key_values(path: Option<&str>, node: &Node) -> Result<Vec<(Node, Node)>, Error> {
    mapping_at("key-values", path, node)?.entries()
}

pub fn get_comment(path: Option<&str>, node: &Node) -> Result<Comment, Error> {
    Ok(get_at_path(node, path)?.comment())
}
