//! Node construction from lines.
//!
//! Read nodes do not own their children. A [`Scope`] records the shared
//! lines, the index range belonging to the node and the line that introduced
//! it; every accessor re-filters that range. Line numbers double as indices
//! into the shared collection.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::comment;
use super::error::Error;
use super::filter;
use super::line::{block_indicator, key_separator, strip_dash, unquote, BlockIndicator, Line};
use super::node::{Comment, Mapping, Node, Scalar, ScalarStyle, Sequence, Stream};

/// Region of the shared lines owned by one read node.
#[derive(Clone)]
pub(crate) struct Scope {
    lines: Arc<[Line]>,
    range: Range<usize>,
    /// Line introducing the node: a key, dash, `?` or `:` line.
    previous: Option<usize>,
    /// The first line is a `- key: value` item whose keys sit after the dash.
    offset: bool,
    /// The node shares its anchor line with its parent, which owns the
    /// comment found there.
    inherited: bool,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("range", &self.range)
            .field("previous", &self.previous)
            .field("offset", &self.offset)
            .finish()
    }
}

impl Scope {
    pub(crate) fn document(lines: Arc<[Line]>, range: Range<usize>) -> Self {
        Scope {
            lines,
            range,
            previous: None,
            offset: false,
            inherited: false,
        }
    }

    pub(crate) fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn owned(&self) -> &[Line] {
        &self.lines[self.range.clone()]
    }

    /// Input text of the node, as written.
    pub(crate) fn source(&self) -> String {
        self.owned()
            .iter()
            .map(Line::raw)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn previous_line(&self) -> Option<&Line> {
        self.previous.map(|i| &self.lines[i])
    }

    fn is_offset_line(&self, line: &Line) -> bool {
        self.offset && line.number() == self.range.start
    }

    /// Text of `line` as seen from this node.
    fn text<'a>(&self, line: &'a Line) -> &'a str {
        if self.is_offset_line(line) {
            strip_dash(line.trimmed()).unwrap_or(line.trimmed())
        } else {
            line.trimmed()
        }
    }

    /// Column of the content of `line` as seen from this node.
    fn column(&self, line: &Line) -> usize {
        if self.is_offset_line(line) {
            line.indentation() + 2
        } else {
            line.indentation()
        }
    }

    /// Line the node's comment is looked up from.
    pub(crate) fn anchor(&self) -> Option<usize> {
        self.previous
            .or_else(|| filter::significant(self.owned()).first().map(|l| l.number()))
    }

    pub(crate) fn inherits_comment(&self) -> bool {
        self.inherited
    }

    /// Direct children lines of this node.
    fn siblings(&self) -> Vec<&Line> {
        let significant = filter::significant(self.owned());
        if !self.offset {
            return filter::same_indentation_level(&significant);
        }
        match significant.split_first() {
            Some((first, rest)) => {
                let level = first.indentation() + 2;
                std::iter::once(*first)
                    .chain(rest.iter().copied().filter(|l| l.indentation() == level))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// End of the lines nested under line `from - 1`, i.e. the first
    /// significant line at or below `reference`. With `compact`, dash lines
    /// at `reference` opening the block are kept as well.
    fn block_end(&self, from: usize, reference: usize, compact: bool) -> usize {
        let mut following = filter::significant(&self.lines[from..self.range.end]).into_iter();
        let compact = compact
            && following
                .clone()
                .next()
                .map_or(false, |l| l.indentation() == reference && l.is_dash());
        following
            .find(|l| {
                l.indentation() < reference
                    || (l.indentation() == reference && !(compact && l.is_dash()))
            })
            .map_or(self.range.end, |l| l.number())
    }

    /// Scope of the block nested under `line`.
    fn nested(&self, line: &Line, compact: bool) -> Scope {
        let from = line.number() + 1;
        let end = self.block_end(from, self.column(line), compact);
        Scope {
            lines: Arc::clone(&self.lines),
            range: from..end,
            previous: Some(line.number()),
            offset: false,
            inherited: self.anchor() == Some(line.number()),
        }
    }

    /// Scope of a block scalar opened by a bare `|` or `>` document line.
    fn header(&self, line: &Line) -> Scope {
        Scope {
            lines: Arc::clone(&self.lines),
            range: line.number() + 1..self.range.end,
            previous: Some(line.number()),
            offset: false,
            inherited: self.inherited,
        }
    }

    /// Scope of a `- key: value` mapping item.
    fn item(&self, line: &Line) -> Scope {
        let end = self.block_end(line.number() + 1, line.indentation(), false);
        Scope {
            lines: Arc::clone(&self.lines),
            range: line.number()..end,
            previous: None,
            offset: true,
            inherited: self.anchor() == Some(line.number()),
        }
    }

    /// Comment of an inline value written on `line`.
    fn comment_at(&self, line: &Line) -> Comment {
        if self.anchor() == Some(line.number()) {
            Comment::empty()
        } else {
            comment::resolve(&self.lines, line.number())
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Read the root of a whole input: a single document, or a stream when it
/// holds two documents or more.
pub(crate) fn read_root(lines: Arc<[Line]>) -> Result<Node, Error> {
    let all = Scope::document(Arc::clone(&lines), 0..lines.len());
    let documents = document_ranges(&all);
    log::debug!(
        "read {} lines, {} document(s)",
        lines.len(),
        documents.len()
    );
    match documents.as_slice() {
        [] => Ok(Node::Scalar(Scalar::null())),
        [single] => read_block(Scope::document(lines, single.clone())),
        _ => Ok(Node::Stream(Stream::read(all))),
    }
}

/// Read a whole input as a stream, whatever its number of documents.
pub(crate) fn read_stream(lines: Arc<[Line]>) -> Stream {
    let len = lines.len();
    Stream::read(Scope::document(lines, 0..len))
}

/// Build the node held by `scope`.
pub(crate) fn read_block(scope: Scope) -> Result<Node, Error> {
    if let Some(previous) = scope.previous_line() {
        match previous.block_indicator() {
            Some(BlockIndicator::Literal) => return Ok(Node::Scalar(literal(&scope))),
            Some(BlockIndicator::Folded) => return Ok(Node::Scalar(folded(&scope))),
            Some(BlockIndicator::FoldedSequence) => {
                log::trace!("line {}: folded sequence", previous.number() + 1);
                return Ok(Node::Sequence(Sequence::read(scope)));
            }
            None => {}
        }
    }

    let significant = filter::significant(scope.owned());
    let first = match significant.first() {
        Some(first) => *first,
        None => {
            return Ok(Node::Scalar(
                Scalar::null().with_comment(comment::of_scope(&scope)),
            ))
        }
    };
    let text = first.trimmed();
    if scope.previous.is_none() && text.starts_with(['|', '>']) && block_indicator(text).is_some() {
        return read_block(scope.header(first));
    }
    if first.is_dash() {
        log::trace!("line {}: sequence", first.number() + 1);
        Ok(Node::Sequence(Sequence::read(scope)))
    } else if text == "?" || text.starts_with("? ") || key_separator(text).is_some() {
        log::trace!("line {}: mapping", first.number() + 1);
        Ok(Node::Mapping(Mapping::read(scope)))
    } else if significant.len() == 1 {
        let value = unquote(text).to_string();
        Ok(Node::Scalar(
            Scalar::new(value).with_comment(comment::of_scope(&scope)),
        ))
    } else {
        Err(Error::ambiguous(first.number()))
    }
}

fn leading_spaces(raw: &str) -> usize {
    raw.len() - raw.trim_start_matches(' ').len()
}

/// Lines of a block scalar body, base indentation removed, trailing blank
/// lines dropped.
fn block_body(scope: &Scope) -> Vec<String> {
    let reference = scope
        .previous_line()
        .map_or(0, Line::effective_indentation);
    let mut body = filter::greater_indentation(scope.owned(), reference);
    while body.last().map_or(false, |l| l.is_blank()) {
        body.pop();
    }
    let base = body
        .iter()
        .find(|l| !l.is_blank())
        .map_or(0, |l| leading_spaces(l.raw()));
    body.iter()
        .map(|l| {
            if l.is_blank() {
                String::new()
            } else {
                let strip = leading_spaces(l.raw()).min(base);
                l.raw()[strip..].to_string()
            }
        })
        .collect()
}

fn literal(scope: &Scope) -> Scalar {
    let value = block_body(scope).join("\n");
    Scalar::styled(value, ScalarStyle::Literal).with_comment(comment::of_scope(scope))
}

fn folded(scope: &Scope) -> Scalar {
    let lines = block_body(scope);
    let value = fold(&lines);
    Scalar::styled(value, ScalarStyle::Folded(lines)).with_comment(comment::of_scope(scope))
}

#[derive(PartialEq)]
enum Folding {
    Start,
    Text,
    Blank,
    Indented,
}

/// Join regular lines with a space; blank and more indented lines break.
pub(crate) fn fold(lines: &[String]) -> String {
    let mut folded = String::new();
    let mut last = Folding::Start;
    for line in lines {
        if line.is_empty() {
            folded.push('\n');
            last = Folding::Blank;
        } else if line.starts_with(' ') {
            if last == Folding::Text || last == Folding::Indented {
                folded.push('\n');
            }
            folded.push_str(line);
            last = Folding::Indented;
        } else {
            match last {
                Folding::Text => folded.push(' '),
                Folding::Indented => folded.push('\n'),
                _ => {}
            }
            folded.push_str(line);
            last = Folding::Text;
        }
    }
    folded
}

// =============================================================================
// Mappings
// =============================================================================

fn is_colon_line(text: &str) -> bool {
    text == ":" || text.starts_with(": ")
}

/// Key text written on a simple `key: value` line.
fn key_text<'a>(scope: &Scope, line: &'a Line) -> Option<&'a str> {
    let text = scope.text(line);
    if strip_dash(text).is_some() || text.starts_with('?') || is_colon_line(text) {
        return None;
    }
    key_separator(text).map(|sep| text[..sep].trim_end())
}

/// Key node built from the block under a bare `?`.
fn complex_key(scope: &Scope, line: &Line) -> Result<Node, Error> {
    read_block(scope.nested(line, false))
}

pub(crate) fn mapping_keys(scope: &Scope) -> Result<Vec<Node>, Error> {
    let mut keys = Vec::new();
    for line in scope.siblings() {
        let text = scope.text(line);
        if text == "?" {
            keys.push(complex_key(scope, line)?);
        } else if let Some(key) = text.strip_prefix("? ") {
            keys.push(Node::from(unquote(key.trim())));
        } else if let Some(key) = key_text(scope, line) {
            keys.push(Node::from(unquote(key)));
        } else {
            log::trace!("line {}: not a key, skipped", line.number() + 1);
        }
    }
    Ok(keys)
}

/// Value written after the key (or `:`) of `line`.
fn value_at(scope: &Scope, line: &Line, rest: &str) -> Result<Node, Error> {
    let rest = rest.trim();
    if rest.is_empty() {
        read_block(scope.nested(line, true))
    } else if block_indicator(rest).is_some() {
        read_block(scope.nested(line, false))
    } else {
        Ok(Node::Scalar(
            Scalar::new(unquote(rest)).with_comment(scope.comment_at(line)),
        ))
    }
}

/// Value on the `:` line following the `?` sibling at `position`.
fn paired_value(scope: &Scope, siblings: &[&Line], position: usize) -> Result<Node, Error> {
    let question = siblings[position];
    match siblings.get(position + 1) {
        Some(line) if is_colon_line(scope.text(line)) => {
            value_at(scope, line, &scope.text(line)[1..])
        }
        _ => Err(Error::Reading(format!(
            "no value found for the complex key at line {}",
            question.number() + 1
        ))),
    }
}

pub(crate) fn mapping_value(scope: &Scope, key: &Node) -> Result<Option<Node>, Error> {
    let siblings = scope.siblings();
    if let Node::Scalar(scalar) = key {
        let text = match scalar.value() {
            Some(text) => text,
            None => return Ok(None),
        };
        let candidates = [
            text.to_string(),
            format!("\"{}\"", text),
            format!("'{}'", text),
        ];
        for candidate in &candidates {
            if let Some(line) = siblings
                .iter()
                .rev()
                .find(|l| key_text(scope, l) == Some(candidate.as_str()))
            {
                let sep = key_separator(scope.text(line)).unwrap_or(0);
                return value_at(scope, line, &scope.text(line)[sep + 1..]).map(Some);
            }
            if let Some(position) = siblings.iter().rposition(|l| {
                scope.text(l).strip_prefix("? ").map(str::trim) == Some(candidate.as_str())
            }) {
                return paired_value(scope, &siblings, position).map(Some);
            }
        }
        return Ok(None);
    }

    for (position, line) in siblings.iter().enumerate().rev() {
        if scope.text(line) == "?" && complex_key(scope, line)? == *key {
            return paired_value(scope, &siblings, position).map(Some);
        }
    }
    Ok(None)
}

// =============================================================================
// Sequences and streams
// =============================================================================

pub(crate) fn sequence_values(scope: &Scope) -> Result<Vec<Node>, Error> {
    let folded = scope
        .previous_line()
        .map_or(false, |p| p.block_indicator() == Some(BlockIndicator::FoldedSequence));
    let mut values = Vec::new();
    for line in scope.siblings() {
        let text = line.trimmed();
        let rest = match strip_dash(text) {
            Some(rest) => rest,
            None if folded => text,
            None => continue,
        };
        let value = if rest.is_empty() {
            read_block(scope.nested(line, false))?
        } else if line.is_item_mapping() {
            Node::Mapping(Mapping::read(scope.item(line)))
        } else if block_indicator(text).is_some() {
            read_block(scope.nested(line, false))?
        } else {
            Node::Scalar(Scalar::new(unquote(rest)).with_comment(scope.comment_at(line)))
        };
        values.push(value);
    }
    Ok(values)
}

/// Index of the first document marker at or after `from`, or `len`.
fn until_marker(lines: &[Line], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(Line::is_document_marker)
        .map_or(lines.len(), |i| from + i)
}

/// Absolute ranges of the non-empty documents in `scope`. Text before the
/// first `---` counts as a document.
fn document_ranges(scope: &Scope) -> Vec<Range<usize>> {
    let owned = scope.owned();
    let mut ranges = vec![0..until_marker(owned, 0)];
    for start in filter::start_markers(owned) {
        ranges.push(start + 1..until_marker(owned, start + 1));
    }
    let offset = scope.range.start;
    ranges
        .into_iter()
        .filter(|r| !filter::significant(&owned[r.clone()]).is_empty())
        .map(|r| r.start + offset..r.end + offset)
        .collect()
}

pub(crate) fn stream_documents(scope: &Scope) -> Result<Vec<Node>, Error> {
    document_ranges(scope)
        .into_iter()
        .map(|range| read_block(Scope::document(Arc::clone(&scope.lines), range)))
        .collect()
}

/// Line of the first `---` of a stream.
pub(crate) fn first_start_marker(scope: &Scope) -> Option<usize> {
    filter::start_markers(scope.owned())
        .first()
        .map(|i| i + scope.range.start)
}
