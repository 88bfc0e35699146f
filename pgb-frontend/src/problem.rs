//! Benchmark source file reader
//!
//! A benchmark file holds the function to complete (header plus docstring,
//! sometimes a reference body) and a `def check(candidate):` block of
//! asserts. The reader cuts the file into those logical pieces line by line
//! and hands each piece to the lexer and parser.

use crate::error::FrontendError;
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::{debug, warn};
use pgb_common::{SourceProblem, TestCase};

const CHECK_FUNCTION: &str = "check";

/// Read one benchmark source file
pub fn read_problem(source: &str, filename: &str) -> Result<SourceProblem, FrontendError> {
    let lines: Vec<&str> = source.lines().collect();

    let start = lines
        .iter()
        .position(|line| top_level_def(line).is_some_and(|name| name != CHECK_FUNCTION))
        .ok_or_else(|| FrontendError::MissingFunction {
            filename: filename.to_string(),
        })?;

    let (header, header_end) = gather_statement(&lines, start);
    let tokens = Lexer::with_origin(&header, filename, line_number(start)).tokenize()?;
    let mut signature = Parser::new(tokens).parse_function_header()?;
    signature.docstring = extract_docstring(&lines, header_end).unwrap_or_default();

    debug!(
        "{}: read '{}' with {} parameter(s)",
        filename,
        signature.name,
        signature.params.len()
    );

    let tests = read_check_block(&lines, filename);

    Ok(SourceProblem { signature, tests })
}

/// Name of the function defined on an unindented `def` line
fn top_level_def(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("def ")?;
    let end = rest.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    Some(&rest[..end])
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Join the physical lines of the statement starting at `start`
///
/// A statement continues while brackets are open or a line ends with a
/// backslash. Returns the statement text and the index of the first line
/// after it.
fn gather_statement(lines: &[&str], start: usize) -> (String, usize) {
    let mut text = String::new();
    let mut depth = 0i32;
    let mut index = start;

    while index < lines.len() {
        let line = lines[index];
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
        depth += bracket_delta(line);
        index += 1;

        if depth <= 0 && !line.trim_end().ends_with('\\') {
            break;
        }
    }

    (text, index)
}

/// Net change in bracket depth over one line, ignoring strings and comments
fn bracket_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) => {
                if ch == '\\' {
                    chars.next();
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '#' => break,
                '\'' | '"' => quote = Some(ch),
                '(' | '[' | '{' => delta += 1,
                ')' | ']' | '}' => delta -= 1,
                _ => {}
            },
        }
    }

    delta
}

/// Docstring of the function whose body starts at line `body`
fn extract_docstring(lines: &[&str], body: usize) -> Option<String> {
    let first = lines[body..].iter().position(|l| !l.trim().is_empty())? + body;
    let trimmed = lines[first].trim_start();

    let unprefixed = trimmed.trim_start_matches(['r', 'R', 'u', 'U']);
    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|d| unprefixed.starts_with(d))?;
    let opened = &unprefixed[delimiter.len()..];

    // Single-line docstring
    if let Some(end) = opened.find(delimiter) {
        return Some(opened[..end].to_string());
    }
    if delimiter.len() == 1 {
        return None;
    }

    let mut doc = opened.to_string();
    for line in &lines[first + 1..] {
        doc.push('\n');
        match line.find(delimiter) {
            Some(end) => {
                doc.push_str(&line[..end]);
                return Some(doc);
            }
            None => doc.push_str(line),
        }
    }

    // Unterminated; the header parsed, so keep what was there
    Some(doc)
}

/// Test cases from the `def check(candidate):` block, if there is one
fn read_check_block(lines: &[&str], filename: &str) -> Vec<TestCase> {
    let Some(start) = lines
        .iter()
        .position(|line| top_level_def(line) == Some(CHECK_FUNCTION))
    else {
        warn!("{}: no '{}' function, problem has no tests", filename, CHECK_FUNCTION);
        return Vec::new();
    };

    let candidate = check_parameter(lines[start]).unwrap_or("candidate");
    let (_, mut index) = gather_statement(lines, start);
    let mut tests = Vec::new();

    while index < lines.len() {
        let line = lines[index];
        if !line.trim().is_empty() && !line.starts_with([' ', '\t']) {
            break;
        }

        let statement_start = index;
        let (statement, next) = gather_statement(lines, index);
        index = next;

        let trimmed = statement.trim_start();
        if !trimmed.starts_with("assert") {
            continue;
        }

        let parsed = Lexer::with_origin(trimmed, filename, line_number(statement_start))
            .tokenize()
            .map_err(FrontendError::from)
            .and_then(|tokens| {
                Parser::new(tokens)
                    .parse_assert(candidate)
                    .map_err(FrontendError::from)
            });

        match parsed {
            Ok(case) => tests.push(case),
            Err(e) => warn!("{}: skipping test: {}", filename, e),
        }
    }

    tests
}

/// Parameter name of `def check(name):`
fn check_parameter(line: &str) -> Option<&str> {
    let open = line.find('(')?;
    let close = line[open..].find(')')? + open;
    let name = line[open + 1..close].split(':').next()?.trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgb_common::{TypeExpr, Value};
    use pretty_assertions::assert_eq;

    const BELOW_ZERO: &str = r#"from typing import List


def below_zero(operations: List[int]) -> bool:
    """ You're given a list of deposit and withdrawal operations.
    Return True if the balance ever falls below zero.
    >>> below_zero([1, 2, 3])
    False
    """
    balance = 0
    for op in operations:
        balance += op
        if balance < 0:
            return True
    return False


METADATA = {
    'author': 'jt',
    'dataset': 'test'
}


def check(candidate):
    assert candidate([]) == False
    assert candidate([1, 2, -3, 1,
                      2, -3]) == False
    assert candidate([1, -4, 5]) == True
    assert len(candidate([1])) == 1
"#;

    #[test]
    fn test_reads_signature_and_docstring() {
        let problem = read_problem(BELOW_ZERO, "below_zero.py").unwrap();
        assert_eq!(problem.signature.name, "below_zero");
        assert_eq!(
            problem.signature.params[0].annotation,
            TypeExpr::generic("List", vec![TypeExpr::named("int")])
        );
        assert_eq!(
            problem.signature.docstring,
            " You're given a list of deposit and withdrawal operations.\n    Return True if the balance ever falls below zero.\n    >>> below_zero([1, 2, 3])\n    False\n    "
        );
    }

    #[test]
    fn test_reads_asserts_and_skips_others() {
        let problem = read_problem(BELOW_ZERO, "below_zero.py").unwrap();
        assert_eq!(problem.tests.len(), 3);
        assert_eq!(problem.tests[0].args, vec![Value::List(vec![])]);
        assert_eq!(problem.tests[1].args.len(), 1);
        assert_eq!(problem.tests[2].expected, Value::bool(true));
    }

    #[test]
    fn test_multiline_header() {
        let source = "def f(a: int,\n      b: str) -> str:\n    'Join.'\n    return b * a\n";
        let problem = read_problem(source, "f.py").unwrap();
        assert_eq!(problem.signature.params.len(), 2);
        assert_eq!(problem.signature.docstring, "Join.");
        assert!(problem.tests.is_empty());
    }

    #[test]
    fn test_missing_function() {
        let err = read_problem("x = 1\n", "empty.py").unwrap_err();
        assert_eq!(
            err,
            FrontendError::MissingFunction {
                filename: "empty.py".to_string()
            }
        );
    }

    #[test]
    fn test_bracket_delta_ignores_strings() {
        assert_eq!(bracket_delta("f(a, ')', [1"), 2);
        assert_eq!(bracket_delta("x = 1  # (comment"), 0);
    }

    #[test]
    fn test_check_parameter() {
        assert_eq!(check_parameter("def check(cand):"), Some("cand"));
        assert_eq!(check_parameter("def check():"), None);
    }
}
