//! Document node model.
//!
//! [`Node`] is a closed union of the four node kinds. Mappings, sequences and
//! streams come from one of two places: the reader, in which case they hold
//! the shared input lines and re-read them on every access, or the builders,
//! in which case they hold their children directly. Both look the same from
//! the outside; accessors return `Result` because reading may fail lazily.
//!
//! Equality and ordering are structural and ignore comments and scalar
//! styles. A read node failing to read compares by its input text.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

use super::comment;
use super::error::Error;
use super::reader::{self, Scope};

/// Comment attached to a node, without the `#` markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }

    pub fn empty() -> Self {
        Comment::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// One entry per comment line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let text = Some(self.text.as_str()).filter(|t| !t.is_empty());
        text.into_iter().flat_map(|t| t.split('\n'))
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Kind of a node. Kinds order as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Stream,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Sequence => write!(f, "sequence"),
            NodeKind::Mapping => write!(f, "mapping"),
            NodeKind::Stream => write!(f, "stream"),
        }
    }
}

/// How a scalar was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Plain or quoted, on one line
    Plain,
    /// `|` block
    Literal,
    /// `>` block, with the lines as written before folding
    Folded(Vec<String>),
}

/// Scalar node. A `None` value is the null scalar (`key:` with nothing
/// under it).
#[derive(Debug, Clone)]
pub struct Scalar {
    value: Option<String>,
    style: ScalarStyle,
    comment: Comment,
}

impl Scalar {
    /// Plain scalar holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Scalar {
            value: Some(value.into()),
            style: ScalarStyle::Plain,
            comment: Comment::empty(),
        }
    }

    pub fn null() -> Self {
        Scalar {
            value: None,
            style: ScalarStyle::Plain,
            comment: Comment::empty(),
        }
    }

    pub(crate) fn styled(value: impl Into<String>, style: ScalarStyle) -> Self {
        Scalar {
            value: Some(value.into()),
            style,
            comment: Comment::empty(),
        }
    }

    pub(crate) fn with_comment(self, comment: Comment) -> Self {
        Scalar { comment, ..self }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    pub fn style(&self) -> &ScalarStyle {
        &self.style
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }
}

#[derive(Debug, Clone)]
enum MappingInner {
    Read(Scope),
    Built {
        entries: Vec<(Node, Node)>,
        comment: Comment,
    },
}

/// Mapping node: ordered entries, duplicates kept.
#[derive(Debug, Clone)]
pub struct Mapping {
    inner: MappingInner,
}

impl Mapping {
    pub(crate) fn read(scope: Scope) -> Self {
        Mapping {
            inner: MappingInner::Read(scope),
        }
    }

    pub(crate) fn built(entries: Vec<(Node, Node)>, comment: Comment) -> Self {
        Mapping {
            inner: MappingInner::Built { entries, comment },
        }
    }

    /// Keys in order of first appearance.
    pub fn keys(&self) -> Result<Vec<Node>, Error> {
        match &self.inner {
            MappingInner::Read(scope) => reader::mapping_keys(scope),
            MappingInner::Built { entries, .. } => {
                Ok(entries.iter().map(|(k, _)| k.clone()).collect())
            }
        }
    }

    /// Value bound to `key`; the last definition wins.
    pub fn value(&self, key: &Node) -> Result<Option<Node>, Error> {
        match &self.inner {
            MappingInner::Read(scope) => reader::mapping_value(scope, key),
            MappingInner::Built { entries, .. } => Ok(entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())),
        }
    }

    /// Shorthand for [`Mapping::value`] with a plain scalar key.
    pub fn get(&self, key: &str) -> Result<Option<Node>, Error> {
        self.value(&Node::from(key))
    }

    pub fn entries(&self) -> Result<Vec<(Node, Node)>, Error> {
        match &self.inner {
            MappingInner::Read(_) => self
                .keys()?
                .into_iter()
                .map(|key| {
                    let value = self
                        .value(&key)?
                        .unwrap_or_else(|| Node::Scalar(Scalar::null()));
                    Ok((key, value))
                })
                .collect(),
            MappingInner::Built { entries, .. } => Ok(entries.clone()),
        }
    }

    pub fn values(&self) -> Result<Vec<Node>, Error> {
        Ok(self.entries()?.into_iter().map(|(_, v)| v).collect())
    }

    pub fn len(&self) -> Result<usize, Error> {
        match &self.inner {
            MappingInner::Read(_) => Ok(self.keys()?.len()),
            MappingInner::Built { entries, .. } => Ok(entries.len()),
        }
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Input text of a read node; empty when built.
    pub(crate) fn source(&self) -> String {
        match &self.inner {
            MappingInner::Read(scope) => scope.source(),
            MappingInner::Built { .. } => String::new(),
        }
    }

    pub fn comment(&self) -> Comment {
        match &self.inner {
            MappingInner::Read(scope) => comment::of_scope(scope),
            MappingInner::Built { comment, .. } => comment.clone(),
        }
    }

    /// Scalar-keyed entries folded into a map, later keys overwriting earlier
    /// ones in place. Null and complex keys are left out.
    pub fn to_map(&self) -> Result<IndexMap<String, Node>, Error> {
        let mut map = IndexMap::new();
        for (key, value) in self.entries()? {
            if let Node::Scalar(Scalar { value: Some(k), .. }) = key {
                map.insert(k, value);
            }
        }
        Ok(map)
    }
}

#[derive(Debug, Clone)]
enum SequenceInner {
    Read(Scope),
    Built { items: Vec<Node>, comment: Comment },
}

/// Sequence node.
#[derive(Debug, Clone)]
pub struct Sequence {
    inner: SequenceInner,
}

impl Sequence {
    pub(crate) fn read(scope: Scope) -> Self {
        Sequence {
            inner: SequenceInner::Read(scope),
        }
    }

    pub(crate) fn built(items: Vec<Node>, comment: Comment) -> Self {
        Sequence {
            inner: SequenceInner::Built { items, comment },
        }
    }

    pub fn values(&self) -> Result<Vec<Node>, Error> {
        match &self.inner {
            SequenceInner::Read(scope) => reader::sequence_values(scope),
            SequenceInner::Built { items, .. } => Ok(items.clone()),
        }
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.values()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Input text of a read node; empty when built.
    pub(crate) fn source(&self) -> String {
        match &self.inner {
            SequenceInner::Read(scope) => scope.source(),
            SequenceInner::Built { .. } => String::new(),
        }
    }

    pub fn comment(&self) -> Comment {
        match &self.inner {
            SequenceInner::Read(scope) => comment::of_scope(scope),
            SequenceInner::Built { comment, .. } => comment.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum StreamInner {
    Read(Scope),
    Built {
        documents: Vec<Node>,
        comment: Comment,
    },
}

/// Stream of documents.
#[derive(Debug, Clone)]
pub struct Stream {
    inner: StreamInner,
}

impl Stream {
    pub(crate) fn read(scope: Scope) -> Self {
        Stream {
            inner: StreamInner::Read(scope),
        }
    }

    pub(crate) fn built(documents: Vec<Node>, comment: Comment) -> Self {
        Stream {
            inner: StreamInner::Built { documents, comment },
        }
    }

    /// Documents, empty ones left out.
    pub fn values(&self) -> Result<Vec<Node>, Error> {
        match &self.inner {
            StreamInner::Read(scope) => reader::stream_documents(scope),
            StreamInner::Built { documents, .. } => Ok(documents.clone()),
        }
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.values()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Input text of a read node; empty when built.
    pub(crate) fn source(&self) -> String {
        match &self.inner {
            StreamInner::Read(scope) => scope.source(),
            StreamInner::Built { .. } => String::new(),
        }
    }

    pub fn comment(&self) -> Comment {
        match &self.inner {
            StreamInner::Read(scope) => comment::of_stream(scope),
            StreamInner::Built { comment, .. } => comment.clone(),
        }
    }
}

/// Any document node.
#[derive(Debug, Clone)]
pub enum Node {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Sequence),
    Stream(Stream),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Stream(_) => NodeKind::Stream,
        }
    }

    pub fn comment(&self) -> Comment {
        match self {
            Node::Scalar(s) => s.comment().clone(),
            Node::Mapping(m) => m.comment(),
            Node::Sequence(s) => s.comment(),
            Node::Stream(s) => s.comment(),
        }
    }

    fn mismatch(&self, expected: NodeKind) -> Error {
        Error::Reading(format!("expected a {}, found a {}", expected, self.kind()))
    }

    pub fn as_scalar(&self) -> Result<&Scalar, Error> {
        match self {
            Node::Scalar(s) => Ok(s),
            _ => Err(self.mismatch(NodeKind::Scalar)),
        }
    }

    pub fn as_mapping(&self) -> Result<&Mapping, Error> {
        match self {
            Node::Mapping(m) => Ok(m),
            _ => Err(self.mismatch(NodeKind::Mapping)),
        }
    }

    pub fn as_sequence(&self) -> Result<&Sequence, Error> {
        match self {
            Node::Sequence(s) => Ok(s),
            _ => Err(self.mismatch(NodeKind::Sequence)),
        }
    }

    pub fn as_stream(&self) -> Result<&Stream, Error> {
        match self {
            Node::Stream(s) => Ok(s),
            _ => Err(self.mismatch(NodeKind::Stream)),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::new(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(Scalar::new(value))
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Sequence> for Node {
    fn from(value: Sequence) -> Self {
        Node::Sequence(value)
    }
}

impl From<Stream> for Node {
    fn from(value: Stream) -> Self {
        Node::Stream(value)
    }
}

// =============================================================================
// Structural comparison
// =============================================================================

/// Compare the children of two nodes with `cmp`. A node that cannot be read
/// compares as if it were empty and sorts before a readable one; two
/// unreadable nodes compare by their input text.
fn compare_readable<T>(
    a: Result<Vec<T>, Error>,
    b: Result<Vec<T>, Error>,
    sources: impl FnOnce() -> (String, String),
    cmp: fn(&[T], &[T]) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Ok(a), Ok(b)) => cmp(&a, &b),
        (Err(e), Ok(b)) => {
            log::warn!("comparing unreadable node: {}", e);
            cmp(&[], &b).then(Ordering::Less)
        }
        (Ok(a), Err(e)) => {
            log::warn!("comparing unreadable node: {}", e);
            cmp(&a, &[]).then(Ordering::Greater)
        }
        (Err(e), Err(_)) => {
            log::warn!("comparing unreadable nodes: {}", e);
            let (a, b) = sources();
            a.cmp(&b)
        }
    }
}

fn compare_lists(a: &[Node], b: &[Node]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| compare(x, y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn compare_entries(a: &[(Node, Node)], b: &[(Node, Node)]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|((ka, va), (kb, vb))| compare(ka, kb).then_with(|| compare(va, vb)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

pub fn compare_scalars(a: &Scalar, b: &Scalar) -> Ordering {
    a.value().cmp(&b.value())
}

pub fn compare_sequences(a: &Sequence, b: &Sequence) -> Ordering {
    compare_readable(
        a.values(),
        b.values(),
        || (a.source(), b.source()),
        compare_lists,
    )
}

pub fn compare_streams(a: &Stream, b: &Stream) -> Ordering {
    compare_readable(
        a.values(),
        b.values(),
        || (a.source(), b.source()),
        compare_lists,
    )
}

pub fn compare_mappings(a: &Mapping, b: &Mapping) -> Ordering {
    compare_readable(
        a.entries(),
        b.entries(),
        || (a.source(), b.source()),
        compare_entries,
    )
}

/// Total structural order over nodes.
pub fn compare(a: &Node, b: &Node) -> Ordering {
    match (a, b) {
        (Node::Scalar(x), Node::Scalar(y)) => compare_scalars(x, y),
        (Node::Sequence(x), Node::Sequence(y)) => compare_sequences(x, y),
        (Node::Mapping(x), Node::Mapping(y)) => compare_mappings(x, y),
        (Node::Stream(x), Node::Stream(y)) => compare_streams(x, y),
        _ => a.kind().cmp(&b.kind()),
    }
}

macro_rules! structural_order {
    ($ty:ty, $cmp:path) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $cmp(self, other) == Ordering::Equal
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                $cmp(self, other)
            }
        }
    };
}

structural_order!(Node, compare);
structural_order!(Scalar, compare_scalars);
structural_order!(Mapping, compare_mappings);
structural_order!(Sequence, compare_sequences);
structural_order!(Stream, compare_streams);
