//! Pretty-printing of node trees.
//!
//! Output uses two spaces per nesting level. Comments are written as `#`
//! lines right above the line introducing their node. Reading errors met
//! while walking a read tree are returned unchanged; write failures become
//! [`Error::Print`].

use std::io::Write;

use super::error::Error;
use super::node::{Comment, Mapping, Node, Scalar, ScalarStyle, Sequence};

/// Characters forcing a plain scalar into quotes.
const RESERVED: &[char] = &['#', ':', '-', '>', '|', '$', '%', '&'];

/// Print `node` to `out`.
pub fn print<W: Write>(node: &Node, out: &mut W) -> Result<(), Error> {
    let mut printer = Printer { out };
    printer.root(node)?;
    printer.out.flush().map_err(|e| Error::Print(e.to_string()))
}

/// Print `node` to a string.
pub fn to_string(node: &Node) -> Result<String, Error> {
    let mut buffer = Vec::new();
    print(node, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Print(e.to_string()))
}

/// Quote `value` if it cannot be written as is.
pub fn escape(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.contains(RESERVED)
        || value.starts_with(['"', '\'', '?'])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);
    if !needs_quotes {
        value.to_string()
    } else if value.contains('"') {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value)
    }
}

fn is_multiline(scalar: &Scalar) -> bool {
    scalar.value().map_or(false, |v| v.contains('\n'))
}

struct Printer<'w, W: Write> {
    out: &'w mut W,
}

impl<W: Write> Printer<'_, W> {
    fn write(&mut self, text: &str) -> Result<(), Error> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| Error::Print(e.to_string()))
    }

    fn line(&mut self, indent: usize, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return self.write("\n");
        }
        self.write(&format!("{:indent$}{}\n", "", text, indent = indent))
    }

    fn comment(&mut self, indent: usize, comment: &Comment) -> Result<(), Error> {
        for line in comment.lines() {
            if line.is_empty() {
                self.line(indent, "#")?;
            } else {
                self.line(indent, &format!("# {}", line))?;
            }
        }
        Ok(())
    }

    fn root(&mut self, node: &Node) -> Result<(), Error> {
        match node {
            Node::Stream(stream) => {
                self.comment(0, &stream.comment())?;
                for document in stream.values()? {
                    self.write("---\n")?;
                    self.document(&document)?;
                }
                Ok(())
            }
            Node::Scalar(_) => {
                self.write("---\n")?;
                self.document(node)?;
                self.write("...\n")
            }
            _ => self.document(node),
        }
    }

    /// Document body preceded by its comment.
    fn document(&mut self, node: &Node) -> Result<(), Error> {
        self.comment(0, &node.comment())?;
        match node {
            Node::Scalar(scalar) => match scalar.value() {
                Some(value) => match scalar.style() {
                    ScalarStyle::Folded(lines) if !lines.is_empty() => {
                        self.write(">\n")?;
                        for line in lines {
                            self.line(2, line)?;
                        }
                        Ok(())
                    }
                    _ if is_multiline(scalar) || *scalar.style() == ScalarStyle::Literal => {
                        self.write("|\n")?;
                        for line in value.split('\n') {
                            self.line(2, line)?;
                        }
                        Ok(())
                    }
                    _ => self.line(0, &escape(value)),
                },
                None => Ok(()),
            },
            Node::Stream(_) => Err(Error::Print(
                "a stream can only be printed as a document root".to_string(),
            )),
            _ => self.nested(node, 0),
        }
    }

    fn mapping(&mut self, mapping: &Mapping, indent: usize) -> Result<(), Error> {
        for (key, value) in mapping.entries()? {
            self.comment(indent, &value.comment())?;
            match &key {
                Node::Scalar(scalar) => {
                    let key = escape(scalar.value().unwrap_or(""));
                    self.write(&format!("{:indent$}{}:", "", key, indent = indent))?;
                }
                _ => {
                    self.line(indent, "?")?;
                    self.nested(&key, indent + 2)?;
                    self.write(&format!("{:indent$}:", "", indent = indent))?;
                }
            }
            self.value(&value, indent)?;
        }
        Ok(())
    }

    fn sequence(&mut self, sequence: &Sequence, indent: usize) -> Result<(), Error> {
        for item in sequence.values()? {
            self.comment(indent, &item.comment())?;
            self.write(&format!("{:indent$}-", "", indent = indent))?;
            self.value(&item, indent)?;
        }
        Ok(())
    }

    /// Collection body at `indent`, without its comment.
    fn nested(&mut self, node: &Node, indent: usize) -> Result<(), Error> {
        match node {
            Node::Mapping(mapping) => self.mapping(mapping, indent),
            Node::Sequence(sequence) => self.sequence(sequence, indent),
            Node::Scalar(scalar) => {
                let text = escape(scalar.value().unwrap_or(""));
                self.line(indent, &text)
            }
            Node::Stream(_) => Err(Error::Print(
                "a stream cannot be nested in another node".to_string(),
            )),
        }
    }

    /// Rest of a line opened by a key, `:` or `-`, written at `indent`.
    fn value(&mut self, node: &Node, indent: usize) -> Result<(), Error> {
        let scalar = match node {
            Node::Scalar(scalar) => scalar,
            _ => {
                self.write("\n")?;
                return self.nested(node, indent + 2);
            }
        };
        let value = match scalar.value() {
            Some(value) => value,
            None => return self.write("\n"),
        };
        match scalar.style() {
            ScalarStyle::Folded(lines) if !lines.is_empty() => {
                self.write(" >\n")?;
                for line in lines {
                    self.line(indent + 2, line)?;
                }
                Ok(())
            }
            ScalarStyle::Literal => self.block(value, indent),
            _ if value.contains('\n') => self.block(value, indent),
            _ => self.write(&format!(" {}\n", escape(value))),
        }
    }

    fn block(&mut self, value: &str, indent: usize) -> Result<(), Error> {
        self.write(" |\n")?;
        for line in value.split('\n') {
            self.line(indent + 2, line)?;
        }
        Ok(())
    }
}
