//! Read-only views over an ordered collection of lines.
//!
//! Every filter is a plain function taking lines and returning the selected
//! lines in input order. Nothing here allocates new [`Line`]s except
//! [`well_indented`], which re-emits corrected copies in lenient mode.

use super::error::Error;
use super::line::Line;
use super::Mode;

/// Predicate used by [`skip`].
pub type Predicate<'p> = &'p dyn Fn(&Line) -> bool;

pub fn comments(line: &Line) -> bool {
    line.is_comment()
}

pub fn blanks(line: &Line) -> bool {
    line.is_blank()
}

pub fn markers(line: &Line) -> bool {
    line.is_document_marker()
}

pub fn directives(line: &Line) -> bool {
    line.is_directive()
}

/// Matches lines at or before line `number`.
pub fn at_or_before(number: usize) -> impl Fn(&Line) -> bool {
    move |line| line.number() <= number
}

/// Drop every line for which any predicate holds.
pub fn skip<'a, I>(lines: I, predicates: &[Predicate<'_>]) -> Vec<&'a Line>
where
    I: IntoIterator<Item = &'a Line>,
{
    lines
        .into_iter()
        .filter(|line| !predicates.iter().any(|p| p(line)))
        .collect()
}

/// Lines carrying document content.
pub fn significant<'a, I>(lines: I) -> Vec<&'a Line>
where
    I: IntoIterator<Item = &'a Line>,
{
    skip(lines, &[&comments, &blanks, &markers, &directives])
}

/// Check the 2-space nesting rule over a whole input.
///
/// After a line requiring nested indentation, a deeper line must sit at
/// exactly its content column + 2; after any other line, no line may go
/// deeper than its content column. A line going back up must land on the
/// column of a block still open above it. Block scalar bodies are not
/// checked and document markers start over.
///
/// In [`Mode::Strict`] the first violation is an [`Error::Indentation`]. In
/// [`Mode::Lenient`] the offending line is re-emitted with the expected
/// indentation and the check goes on from the corrected line. A line written
/// at the same column as an open block is moved along with that block.
pub fn well_indented(lines: &[Line], mode: Mode) -> Result<Vec<Line>, Error> {
    let mut checked = Vec::with_capacity(lines.len());
    let mut previous: Option<Line> = None;
    let mut open = OpenLevels::default();
    let mut block_body: Option<usize> = None;

    for line in lines {
        if let Some(header) = block_body {
            if line.is_blank() || line.indentation() > header {
                checked.push(line.clone());
                continue;
            }
            block_body = None;
        }
        if !line.is_significant() {
            if line.is_document_marker() {
                previous = None;
                open.clear();
            }
            checked.push(line.clone());
            continue;
        }

        let found = line.indentation();
        let level = match &previous {
            None => found,
            Some(prev) => match open.level_of(found, mode) {
                Some(level) => level,
                None => {
                    let column = prev.effective_indentation();
                    let expected = if found > column {
                        if prev.requires_nested_indentation() {
                            column + 2
                        } else {
                            column
                        }
                    } else {
                        open.nearest(found).unwrap_or(found)
                    };
                    if expected != found {
                        if mode == Mode::Strict {
                            return Err(Error::indentation(line.number(), expected, found));
                        }
                        log::debug!(
                            "line {}: guessed indentation {} instead of {}",
                            line.number() + 1,
                            expected,
                            found
                        );
                    }
                    expected
                }
            },
        };
        let current = if level == found {
            line.clone()
        } else {
            line.with_indentation(level)
        };
        open.push(found, &current);
        if current.block_indicator().is_some() {
            block_body = Some(current.effective_indentation());
        }
        checked.push(current.clone());
        previous = Some(current);
    }
    Ok(checked)
}

/// Columns of the blocks still open at the current line, innermost last.
/// Each entry keeps the column as written next to the column in use.
#[derive(Debug, Default)]
struct OpenLevels {
    levels: Vec<(usize, usize)>,
}

impl OpenLevels {
    fn clear(&mut self) {
        self.levels.clear();
    }

    /// Column in use for a line written at `found`, if it lines up with an
    /// open block.
    fn level_of(&self, found: usize, mode: Mode) -> Option<usize> {
        self.levels
            .iter()
            .rev()
            .find(|(written, level)| match mode {
                Mode::Strict => *level == found,
                Mode::Lenient => *written == found || *level == found,
            })
            .map(|(_, level)| *level)
    }

    /// Open column closest to `found`, the outer one on a tie.
    fn nearest(&self, found: usize) -> Option<usize> {
        self.levels
            .iter()
            .map(|(_, level)| *level)
            .min_by_key(|level| level.abs_diff(found))
    }

    /// Close the blocks at or below `line` and open the ones it starts.
    fn push(&mut self, found: usize, line: &Line) {
        let level = line.indentation();
        self.levels.retain(|(_, l)| *l < level);
        self.levels.push((found, level));
        if line.is_item_mapping() {
            self.levels.push((found + 2, level + 2));
        }
    }
}

/// Lines strictly deeper than `reference`, up to the first non-blank line at
/// or below it. Blank lines inside the run are kept.
pub fn greater_indentation<'a, I>(lines: I, reference: usize) -> Vec<&'a Line>
where
    I: IntoIterator<Item = &'a Line>,
{
    lines
        .into_iter()
        .take_while(|line| line.is_blank() || line.indentation() > reference)
        .collect()
}

/// Lines sharing the indentation of the first line.
pub fn same_indentation_level<'a>(lines: &[&'a Line]) -> Vec<&'a Line> {
    match lines.first() {
        Some(first) => {
            let level = first.indentation();
            lines
                .iter()
                .copied()
                .filter(|line| line.indentation() == level)
                .collect()
        }
        None => Vec::new(),
    }
}

/// Indices of the `---` lines.
pub fn start_markers(lines: &[Line]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_document_start())
        .map(|(i, _)| i)
        .collect()
}

/// Lines before `boundary`, nearest first.
pub fn backwards(lines: &[Line], boundary: usize) -> impl Iterator<Item = &Line> {
    lines[..boundary.min(lines.len())].iter().rev()
}

/// The run of comment lines at the head of a backward walk, returned in
/// document order.
pub fn first_comment_found<'a, I>(lines: I) -> Vec<&'a Line>
where
    I: IntoIterator<Item = &'a Line>,
{
    let mut found: Vec<&Line> = lines
        .into_iter()
        .take_while(|line| line.is_comment())
        .collect();
    found.reverse();
    found
}
