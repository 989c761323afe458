//! Programmatic construction of node trees.
//!
//! Builders never mutate: every `add` returns a new builder holding one more
//! element, and the builder it was called on stays usable.

use super::node::{Comment, Mapping, Node, Scalar, ScalarStyle, Sequence, Stream};
use super::reader;

pub fn new_mapping_builder() -> MappingBuilder {
    MappingBuilder::default()
}

pub fn new_sequence_builder() -> SequenceBuilder {
    SequenceBuilder::default()
}

pub fn new_scalar_builder() -> ScalarBuilder {
    ScalarBuilder::default()
}

pub fn new_stream_builder() -> StreamBuilder {
    StreamBuilder::default()
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut items = items.to_vec();
    items.push(item);
    items
}

#[derive(Debug, Clone, Default)]
pub struct MappingBuilder {
    entries: Vec<(Node, Node)>,
}

impl MappingBuilder {
    /// Entry with a plain scalar key.
    pub fn add(&self, key: &str, value: impl Into<Node>) -> Self {
        self.add_node(Node::from(key), value)
    }

    /// Entry with any key, complex keys included.
    pub fn add_node(&self, key: impl Into<Node>, value: impl Into<Node>) -> Self {
        MappingBuilder {
            entries: appended(&self.entries, (key.into(), value.into())),
        }
    }

    pub fn build(&self) -> Node {
        self.build_with_comment("")
    }

    pub fn build_with_comment(&self, comment: &str) -> Node {
        Node::Mapping(Mapping::built(self.entries.clone(), Comment::new(comment)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    items: Vec<Node>,
}

impl SequenceBuilder {
    pub fn add(&self, item: impl Into<Node>) -> Self {
        SequenceBuilder {
            items: appended(&self.items, item.into()),
        }
    }

    pub fn build(&self) -> Node {
        self.build_with_comment("")
    }

    pub fn build_with_comment(&self, comment: &str) -> Node {
        Node::Sequence(Sequence::built(self.items.clone(), Comment::new(comment)))
    }
}

/// Collects the lines of a scalar; the `build_*` method picks how they are
/// joined.
#[derive(Debug, Clone, Default)]
pub struct ScalarBuilder {
    lines: Vec<String>,
    comment: String,
}

impl ScalarBuilder {
    pub fn add_line(&self, line: &str) -> Self {
        ScalarBuilder {
            lines: appended(&self.lines, line.to_string()),
            comment: self.comment.clone(),
        }
    }

    /// Comment carried by the scalar built next.
    pub fn with_comment(&self, comment: &str) -> Self {
        ScalarBuilder {
            lines: self.lines.clone(),
            comment: comment.to_string(),
        }
    }

    fn finish(&self, scalar: Scalar) -> Node {
        Node::Scalar(scalar.with_comment(Comment::new(self.comment.as_str())))
    }

    /// Lines joined by a space.
    pub fn build_plain_scalar(&self) -> Node {
        self.finish(Scalar::new(self.lines.join(" ")))
    }

    /// Lines joined by a line break, printed as a `|` block.
    pub fn build_literal_block_scalar(&self) -> Node {
        self.finish(Scalar::styled(self.lines.join("\n"), ScalarStyle::Literal))
    }

    /// Lines folded the way a `>` block is read, printed as such.
    pub fn build_folded_block_scalar(&self) -> Node {
        let value = reader::fold(&self.lines);
        self.finish(Scalar::styled(value, ScalarStyle::Folded(self.lines.clone())))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    documents: Vec<Node>,
}

impl StreamBuilder {
    pub fn add(&self, document: impl Into<Node>) -> Self {
        StreamBuilder {
            documents: appended(&self.documents, document.into()),
        }
    }

    pub fn build(&self) -> Node {
        self.build_with_comment("")
    }

    pub fn build_with_comment(&self, comment: &str) -> Node {
        Node::Stream(Stream::built(self.documents.clone(), Comment::new(comment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_returns_a_new_snapshot() {
        let empty = new_mapping_builder();
        let one = empty.add("a", "1");
        let two = one.add("b", "2");
        assert_eq!(empty.build().as_mapping().unwrap().len().unwrap(), 0);
        assert_eq!(one.build().as_mapping().unwrap().len().unwrap(), 1);
        assert_eq!(two.build().as_mapping().unwrap().len().unwrap(), 2);
    }

    #[test]
    fn test_equal_builders_give_equal_mappings() {
        let a = new_mapping_builder().add("x", "1").add("y", "2").build();
        let b = new_mapping_builder().add("x", "1").add("y", "2").build();
        assert_eq!(a, b);
        let smaller = new_mapping_builder().add("x", "1").build();
        assert!(smaller < a);
    }

    #[test]
    fn test_build_with_comment() {
        let node = new_sequence_builder().add("a").build_with_comment("items");
        assert_eq!(node.comment().text(), "items");
        assert!(new_sequence_builder().build().comment().is_empty());
    }

    #[test]
    fn test_scalar_joins() {
        let builder = new_scalar_builder().add_line("one").add_line("two");
        assert_eq!(builder.build_plain_scalar(), Node::from("one two"));
        assert_eq!(builder.build_literal_block_scalar(), Node::from("one\ntwo"));
        let folded = builder.add_line("").add_line("three").build_folded_block_scalar();
        assert_eq!(folded, Node::from("one two\nthree"));
        let scalar = folded.as_scalar().unwrap().clone();
        assert!(matches!(scalar.style(), ScalarStyle::Folded(lines) if lines.len() == 4));
    }

    #[test]
    fn test_scalar_comment() {
        let node = new_scalar_builder()
            .add_line("v")
            .with_comment("about v")
            .build_plain_scalar();
        assert_eq!(node.comment().text(), "about v");
    }

    #[test]
    fn test_stream_builder() {
        let node = new_stream_builder()
            .add(new_mapping_builder().add("a", "1").build())
            .add("plain")
            .build();
        let stream = node.as_stream().unwrap();
        assert_eq!(stream.len().unwrap(), 2);
        assert_eq!(stream.values().unwrap()[1], Node::from("plain"));
    }
}
