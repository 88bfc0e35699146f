//! Target backend contract
//!
//! A `Translator` knows how to spell values, calls, prompts and test
//! suites in one target language. Rendering of composite values and
//! coercion against declared types live in `suite`; a backend only supplies
//! the surface syntax.

use crate::error::TranslateError;
use crate::type_mapper::TypeSyntax;
use pgb_common::Literal;

/// Everything a backend needs to write a function header
#[derive(Debug, Clone, PartialEq)]
pub struct PromptHeader<'a> {
    pub name: &'a str,
    /// Parameter names paired with their translated types
    pub params: Vec<(String, String)>,
    pub return_type: Option<String>,
    /// Docstring as written in the source, indentation untouched
    pub doc: &'a str,
    /// Definitions to emit before the function
    pub preamble: &'a str,
}

pub trait Translator: TypeSyntax + Send + Sync {
    /// Language tag written into problem records
    fn name(&self) -> &'static str;

    fn literal(&self, literal: &Literal) -> String {
        scalar_literal(literal, "null")
    }

    fn variable(&self, name: &str) -> String {
        name.to_string()
    }

    fn list_literal(&self, elements: Vec<String>) -> String {
        format!("[{}]", elements.join(", "))
    }

    fn tuple_literal(&self, elements: Vec<String>) -> String {
        format!("({})", elements.join(", "))
    }

    /// Map literal; keys and values are parallel
    fn dict_literal(&self, keys: Vec<String>, values: Vec<String>) -> String;

    fn call(&self, function: &str, args: Vec<String>) -> String {
        format!("{}({})", function, args.join(", "))
    }

    /// Wrap a value that fills an optional slot
    fn wrap_present(&self, expr: String) -> String {
        expr
    }

    /// Reject names the target grammar reserves
    fn check_identifier(&self, _name: &str) -> Result<(), TranslateError> {
        Ok(())
    }

    /// Reject docstrings the target's comment syntax cannot hold
    fn check_docstring(&self, _doc: &str) -> Result<(), TranslateError> {
        Ok(())
    }

    /// Function signature and doc comment, ending where the body begins
    fn prompt_header(&self, header: &PromptHeader) -> String;

    fn test_suite_prefix(&self, entry_point: &str) -> Vec<String>;

    fn test_suite_suffix(&self) -> Vec<String>;

    /// Strings that end a completion; the first one also opens the test suite
    fn stop_markers(&self) -> Vec<String>;

    /// Assertion that `left` equals `right`, within 1e-6 for numbers
    fn deep_equality(&self, left: &str, right: &str) -> String;

    fn file_extension(&self) -> &'static str;

    /// Body that makes an uncompleted prompt parse
    fn no_completion_stub(&self) -> String;
}

/// Common spelling of scalars: lowercase booleans, escaped double-quoted
/// strings and floats that always carry a fraction or exponent
pub fn scalar_literal(literal: &Literal, none: &str) -> String {
    match literal {
        Literal::None => none.to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(x) => format!("{x:?}"),
        Literal::Str(s) => quote_string(s),
    }
}

fn quote_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
