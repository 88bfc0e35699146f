//! Doc comment reindentation

/// Reindent a source docstring for a doc comment nested at `indent`
///
/// The text is stripped, then every line after the first is shifted so the
/// least-indented one sits at `indent`; deeper lines keep their extra
/// leading whitespace. Blank lines stay empty.
pub fn reindent(doc: &str, indent: &str) -> String {
    let doc = doc.trim();
    let mut lines = doc.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let rest: Vec<&str> = lines.collect();

    let common = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let mut out = first.trim_end().to_string();
    for line in rest {
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(indent);
        out.extend(line.trim_end().chars().skip(common));
    }
    out
}

/// Number of leading whitespace characters
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preserves_relative_indent() {
        let doc = " Return the sum.\n    Example:\n        add(1, 2) == 3\n\n    Done.\n    ";
        assert_eq!(
            reindent(doc, "    "),
            "Return the sum.\n    Example:\n        add(1, 2) == 3\n\n    Done."
        );
    }

    #[test]
    fn test_single_line_and_empty() {
        assert_eq!(reindent("  Just one line.  ", "  "), "Just one line.");
        assert_eq!(reindent("   \n  ", "  "), "");
    }

    #[test]
    fn test_unindented_source() {
        assert_eq!(reindent("a\nb\n  c", "\t"), "a\n\tb\n\t  c");
    }
}
