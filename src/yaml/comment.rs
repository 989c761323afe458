//! Comment association.
//!
//! A node's comment is the contiguous run of `#` lines directly above its
//! anchor line (see [`Scope::anchor`]).

use super::filter;
use super::line::{comment_text, Line};
use super::node::Comment;
use super::reader::{self, Scope};

/// Comment made of the `#` lines directly above line `anchor`.
pub(crate) fn resolve(lines: &[Line], anchor: usize) -> Comment {
    let found = filter::first_comment_found(filter::backwards(lines, anchor));
    let text: Vec<&str> = found.iter().map(|l| comment_text(l.trimmed())).collect();
    Comment::new(text.join("\n"))
}

/// Comment of a read node.
pub(crate) fn of_scope(scope: &Scope) -> Comment {
    if scope.inherits_comment() {
        return Comment::empty();
    }
    scope
        .anchor()
        .map(|anchor| resolve(scope.lines(), anchor))
        .unwrap_or_default()
}

/// Comment of a read stream: the lines above its first `---`.
pub(crate) fn of_stream(scope: &Scope) -> Comment {
    reader::first_start_marker(scope)
        .map(|marker| resolve(scope.lines(), marker))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::{load_str, Mode, Node};

    fn comment_of(node: &Node) -> String {
        node.comment().text().to_string()
    }

    #[test]
    fn test_resolve_strips_markers() {
        let lines = Line::split("#one\n#  two\n# three\nkey: value");
        assert_eq!(resolve(&lines, 3).text(), "one\n two\nthree");
        assert!(resolve(&lines, 0).is_empty());
    }

    #[test]
    fn test_root_comment_is_owned_by_the_root() {
        let node = load_str("# hello\nkey: value", Mode::Strict).unwrap();
        assert_eq!(comment_of(&node), "hello");
        let value = node.as_mapping().unwrap().get("key").unwrap().unwrap();
        assert_eq!(comment_of(&value), "");
    }

    #[test]
    fn test_entry_comments() {
        let text = "# top\n\na: 1\n# about b\nb:\n  # about c\n  c: 2\n  # about d\n  d:\n    - x";
        let node = load_str(text, Mode::Strict).unwrap();
        assert_eq!(comment_of(&node), "");
        let map = node.as_mapping().unwrap();
        assert_eq!(comment_of(&map.get("a").unwrap().unwrap()), "");
        let b = map.get("b").unwrap().unwrap();
        assert_eq!(comment_of(&b), "about b");
        let b = b.as_mapping().unwrap();
        assert_eq!(comment_of(&b.get("c").unwrap().unwrap()), "about c");
        assert_eq!(comment_of(&b.get("d").unwrap().unwrap()), "about d");
    }

    #[test]
    fn test_sequence_item_comments() {
        let text = "# list\n- a\n# second\n- b\n# third\n- k: v\n  # inner\n  l: w";
        let node = load_str(text, Mode::Strict).unwrap();
        assert_eq!(comment_of(&node), "list");
        let items = node.as_sequence().unwrap().values().unwrap();
        assert_eq!(comment_of(&items[0]), "");
        assert_eq!(comment_of(&items[1]), "second");
        assert_eq!(comment_of(&items[2]), "third");
        let item = items[2].as_mapping().unwrap();
        assert_eq!(comment_of(&item.get("k").unwrap().unwrap()), "");
        assert_eq!(comment_of(&item.get("l").unwrap().unwrap()), "inner");
    }

    #[test]
    fn test_stream_comments_stop_at_markers() {
        let text = "# stream\n---\n# first\na: 1\n---\nb: 2";
        let node = load_str(text, Mode::Strict).unwrap();
        let stream = node.as_stream().unwrap();
        assert_eq!(stream.comment().text(), "stream");
        let docs = stream.values().unwrap();
        assert_eq!(comment_of(&docs[0]), "first");
        assert_eq!(comment_of(&docs[1]), "");
    }
}
