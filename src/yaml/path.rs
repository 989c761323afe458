//! Dot-notation paths.
//!
//! `a.b\.c.0` addresses key `a`, then key `b.c`, then the first item. `\`
//! escapes the next character; a trailing `\` is dropped.

use super::error::Error;

/// Path components, escapes resolved. Empty components are kept.
pub fn split_path(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => current.extend(chars.next()),
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn out_of_range(path: &str, index: i64, len: usize) -> Error {
    Error::Path(format!(
        "invalid path '{}', index {} is out of range ({} elements in sequence).",
        path, index, len
    ))
}

/// Position addressed by `part` in a collection of `len` items. Negative
/// indices count from the end.
pub fn resolve_index(part: &str, len: usize, path: &str) -> Result<usize, Error> {
    let index: i64 = part.parse().map_err(|_| {
        Error::Path(format!(
            "invalid path '{}', non-integer index '{}' provided on a sequence.",
            path, part
        ))
    })?;
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs() as usize)
    } else {
        Some(index as usize).filter(|i| *i < len)
    };
    resolved.ok_or_else(|| out_of_range(path, index, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(split_path("solo"), vec!["solo"]);
        assert_eq!(split_path(r"a\.b.c"), vec!["a.b", "c"]);
        assert_eq!(split_path(r"a\\.b"), vec!["a\\", "b"]);
        assert_eq!(split_path(r"a\\\.b.c"), vec!["a\\.b", "c"]);
    }

    #[test]
    fn test_split_path_empty_parts() {
        assert_eq!(split_path(""), vec![""]);
        assert_eq!(split_path("a..b"), vec!["a", "", "b"]);
        assert_eq!(split_path(".a"), vec!["", "a"]);
        assert_eq!(split_path(".."), vec!["", "", ""]);
        assert_eq!(split_path(r"a\"), vec!["a"]);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index("0", 3, "p").unwrap(), 0);
        assert_eq!(resolve_index("2", 3, "p").unwrap(), 2);
        assert_eq!(resolve_index("-1", 3, "p").unwrap(), 2);
        assert_eq!(resolve_index("-3", 3, "p").unwrap(), 0);
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        let err = resolve_index("3", 3, "items.3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid path 'items.3', index 3 is out of range (3 elements in sequence)."
        );
        assert!(resolve_index("-4", 3, "items.-4").is_err());
        assert!(resolve_index("0", 0, "empty.0").is_err());
        assert!(resolve_index("-1", 0, "empty.-1").is_err());
    }

    #[test]
    fn test_resolve_index_non_integer() {
        match resolve_index("foo", 3, "items.foo") {
            Err(Error::Path(msg)) => assert!(msg.contains("non-integer index 'foo'")),
            other => panic!("Expected Error::Path, got {:?}", other),
        }
    }
}
