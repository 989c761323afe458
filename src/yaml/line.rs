//! Physical input lines.
//!
//! A [`Line`] is created once per input row and never changes afterwards;
//! the lenient indentation pass produces corrected copies instead of
//! mutating. The helpers at the bottom of this module work on the trimmed
//! text of a line and are shared by the filters, the reader and the printer.

use regex::Regex;
use std::sync::OnceLock;

/// One physical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: usize,
    raw: String,
    indentation: usize,
    trimmed: String,
    comment: String,
}

/// Block scalar header found at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockIndicator {
    /// `|` or `|+`
    Literal,
    /// `>` or `>+`
    Folded,
    /// `|-` or `>-`: the block is read as a sequence of its lines
    FoldedSequence,
}

impl Line {
    /// Build line `number` (0-based) from its raw text.
    pub fn new(number: usize, raw: &str) -> Self {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let indentation = raw.chars().take_while(|c| *c == ' ').count();
        let content = raw.trim();
        let (trimmed, comment) = if content.starts_with('#') {
            (content, "")
        } else {
            split_comment(content)
        };
        Line {
            number,
            raw: raw.to_string(),
            indentation,
            trimmed: trimmed.to_string(),
            comment: comment.to_string(),
        }
    }

    /// Split a whole input into lines.
    pub fn split(text: &str) -> Vec<Line> {
        text.lines()
            .enumerate()
            .map(|(number, raw)| Line::new(number, raw))
            .collect()
    }

    /// Copy of this line reporting a different indentation.
    pub fn with_indentation(&self, indentation: usize) -> Self {
        Line {
            indentation,
            ..self.clone()
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Content without surrounding whitespace nor inline comment.
    pub fn trimmed(&self) -> &str {
        &self.trimmed
    }

    /// Inline comment (`key: value # comment`), empty if none.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.trimmed.starts_with('#')
    }

    /// `---` in the first column. Indented, it is content of a block body.
    pub fn is_document_start(&self) -> bool {
        self.indentation == 0 && (self.trimmed == "---" || self.trimmed.starts_with("--- "))
    }

    pub fn is_document_end(&self) -> bool {
        self.indentation == 0 && self.trimmed == "..."
    }

    pub fn is_document_marker(&self) -> bool {
        self.is_document_start() || self.is_document_end()
    }

    pub fn is_directive(&self) -> bool {
        self.trimmed.starts_with('%')
    }

    /// Whether the line carries document content.
    pub fn is_significant(&self) -> bool {
        !(self.is_blank() || self.is_comment() || self.is_document_marker() || self.is_directive())
    }

    /// `-` or `- something`.
    pub fn is_dash(&self) -> bool {
        strip_dash(&self.trimmed).is_some()
    }

    /// `- key: value` or `- key:`, the first line of a mapping item.
    pub fn is_item_mapping(&self) -> bool {
        match strip_dash(&self.trimmed) {
            Some(rest) => key_separator(rest).is_some() && !rest.starts_with('?'),
            None => false,
        }
    }

    /// Column where the content of this line starts for nesting purposes.
    ///
    /// Keys of an inline mapping item sit two columns after the dash.
    pub fn effective_indentation(&self) -> usize {
        if self.is_item_mapping() {
            self.indentation + 2
        } else {
            self.indentation
        }
    }

    /// The next deeper line must be indented by exactly two more columns.
    pub fn requires_nested_indentation(&self) -> bool {
        let text = strip_dash(&self.trimmed).unwrap_or(&self.trimmed);
        if text.is_empty() || text == "?" || text == ":" {
            return true;
        }
        matches!(key_separator(text), Some(idx) if idx + 1 == text.len())
    }

    pub fn block_indicator(&self) -> Option<BlockIndicator> {
        block_indicator(&self.trimmed)
    }
}

fn block_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(?:-|\?|:|.*\S:)\s+)?([|>])([+-]?)$").expect("static regex is valid")
    })
}

/// Block scalar indicator closing `text`, if any.
pub fn block_indicator(text: &str) -> Option<BlockIndicator> {
    let caps = block_header().captures(text)?;
    match (&caps[1], &caps[2]) {
        (_, "-") => Some(BlockIndicator::FoldedSequence),
        ("|", _) => Some(BlockIndicator::Literal),
        _ => Some(BlockIndicator::Folded),
    }
}

/// Split `content` into its value and its inline comment.
///
/// A `#` opens a comment when it starts a word and sits outside of a quoted
/// token. A quoted key runs up to its separator and a value opening with a
/// quote runs up to the last matching quote of the line, so both may hold
/// either quote kind.
fn split_comment(content: &str) -> (&str, &str) {
    let from = quoted_end(content);
    let mut quote: Option<char> = None;
    let mut prev = content[..from].chars().last();
    for (i, c) in content[from..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => {
                let word_start = prev.map_or(true, char::is_whitespace);
                if (c == '"' || c == '\'') && word_start {
                    quote = Some(c);
                } else if c == '#' && word_start {
                    let at = from + i;
                    return (content[..at].trim_end(), content[at + 1..].trim());
                }
            }
        }
        prev = Some(c);
    }
    (content, "")
}

/// End of the quoted key and value of `content`, past their closing quote,
/// or 0 when neither is quoted.
fn quoted_end(content: &str) -> usize {
    let mut rest = content;
    while let Some(stripped) = ["- ", "? ", ": "]
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped.trim_start();
    }
    let mut end = 0;
    if let Some(sep) = key_separator(rest) {
        if rest.starts_with(['"', '\'']) {
            end = content.len() - rest.len() + sep;
        }
        rest = rest[sep + 1..].trim_start();
    }
    let start = content.len() - rest.len();
    match rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
        Some(quote) => content
            .rfind(quote)
            .filter(|last| *last > start)
            .map_or(end, |last| last + 1),
        None => end,
    }
}

/// Text after a leading `- ` (or empty for a bare `-`).
pub fn strip_dash(text: &str) -> Option<&str> {
    if text == "-" {
        Some("")
    } else {
        text.strip_prefix("- ").map(str::trim_start)
    }
}

/// Byte index of the `:` separating a key from its value.
///
/// The separator must be followed by whitespace or end the text. A quoted
/// key ends at the first matching quote directly followed by the separator.
pub fn key_separator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let is_separator =
        |i: usize| bytes[i] == b':' && bytes.get(i + 1).map_or(true, |b| b.is_ascii_whitespace());
    match bytes.first() {
        Some(&q) if q == b'"' || q == b'\'' => (2..bytes.len())
            .find(|&i| bytes[i - 1] == q && is_separator(i)),
        _ => (0..bytes.len()).find(|&i| is_separator(i)),
    }
}

/// Strip one pair of surrounding quotes.
pub fn unquote(text: &str) -> &str {
    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')));
    if quoted {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Strip the comment marker and one following space.
pub fn comment_text(text: &str) -> &str {
    let text = text.strip_prefix('#').unwrap_or(text);
    text.strip_prefix(' ').unwrap_or(text)
}
