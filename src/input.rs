//! Circle input: whitespace-separated `x y r` triples until end of input.
//!
//! There is no header, count, or comment syntax. Line breaks carry no
//! meaning, so triples may span lines or share one.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::Circle;

/// Parses every `x y r` triple in `text`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for a token that is not a float, or for a final
/// triple that is missing its `y` or `r`. `position` is the zero-based index
/// of the offending token.
pub fn parse_circles(text: &str) -> Result<Vec<Circle>> {
    let mut values = Vec::with_capacity(3);
    let mut circles = Vec::new();
    let mut position = 0;

    for (index, token) in text.split_whitespace().enumerate() {
        position = index;
        let value = token.parse::<f64>().map_err(|_| Error::Parse {
            position: index,
            token: token.to_string(),
        })?;
        values.push(value);
        if let &[x, y, r] = values.as_slice() {
            circles.push(Circle::new(x, y, r));
            values.clear();
        }
    }

    if !values.is_empty() {
        return Err(Error::Parse {
            position: position + 1,
            token: String::new(),
        });
    }
    Ok(circles)
}

/// Reads and parses the circle file at `path`.
pub fn read_circles<P: AsRef<Path>>(path: P) -> Result<Vec<Circle>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let circles = parse_circles(&text)?;
    log::debug!("read {} circles from {}", circles.len(), path.display());
    Ok(circles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triples_across_lines() {
        let circles = parse_circles("0 0 1\n10 0\n1\n  -2.5 3e1 0.25  ").unwrap();
        assert_eq!(
            circles,
            vec![
                Circle::new(0.0, 0.0, 1.0),
                Circle::new(10.0, 0.0, 1.0),
                Circle::new(-2.5, 30.0, 0.25),
            ]
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_circles("").unwrap().is_empty());
        assert!(parse_circles(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bad_token() {
        match parse_circles("0 0 1 2 x 3") {
            Err(Error::Parse { position, token }) => {
                assert_eq!(position, 4);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_incomplete_triple() {
        assert!(matches!(
            parse_circles("0 0 1 5 6"),
            Err(Error::Parse { position: 5, .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_circles("/nonexistent/circles.txt"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_read_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 3").unwrap();
        writeln!(file, "4 5 6").unwrap();
        let circles = read_circles(file.path()).unwrap();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[1], Circle::new(4.0, 5.0, 6.0));
    }
}
