//! Pyret backend

use crate::docstring::reindent;
use crate::error::TranslateError;
use crate::translator::{scalar_literal, PromptHeader, Translator};
use crate::type_mapper::{MapSupport, Primitive, TypeSyntax};
use pgb_common::Literal;

/// Pyret has no general key/value type, so maps become pair lists
pub const HASHMAP_DEFINITION: &str = "data Pair<T, V>: | pair(key :: T, value :: V) end\n\
                                      type HashMap<T, V> = List<Pair<T, V>>\n\n";

/// Words the Pyret grammar reserves, plus the test suite's own binding
const RESERVED: &[&str] = &[
    "and", "as", "ask", "because", "block", "by", "candidate", "cases", "check", "data", "do",
    "doc", "else", "end", "examples", "false", "for", "from", "fun", "if", "import", "include",
    "is", "lam", "lazy", "let", "letrec", "method", "module", "newtype", "of", "or", "otherwise",
    "provide", "raises", "reactor", "rec", "ref", "satisfies", "shadow", "sharing", "spy",
    "table", "then", "true", "type", "use", "var", "violates", "when", "where", "with",
];

const INDENT: &str = "    ";

pub struct Pyret;

impl TypeSyntax for Pyret {
    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::Int | Primitive::Float => "Number",
            Primitive::Bool => "Boolean",
            Primitive::Str => "String",
        }
        .to_string()
    }

    fn sequence(&self, element: String) -> String {
        format!("List<{element}>")
    }

    fn product(&self, elements: Vec<String>) -> String {
        format!("{{{}}}", elements.join("; "))
    }

    fn map(&self, key: String, value: String) -> String {
        format!("HashMap<{key}, {value}>")
    }

    fn optional(&self, inner: String) -> String {
        format!("Option<{inner}>")
    }

    fn untyped(&self) -> String {
        "Any".to_string()
    }

    fn map_support(&self) -> MapSupport {
        MapSupport::Synthesized(HASHMAP_DEFINITION)
    }
}

impl Translator for Pyret {
    fn name(&self) -> &'static str {
        "pyret"
    }

    fn literal(&self, literal: &Literal) -> String {
        scalar_literal(literal, "none")
    }

    fn list_literal(&self, elements: Vec<String>) -> String {
        format!("[list: {}]", elements.join(", "))
    }

    fn tuple_literal(&self, elements: Vec<String>) -> String {
        format!("{{{}}}", elements.join("; "))
    }

    fn dict_literal(&self, keys: Vec<String>, values: Vec<String>) -> String {
        let pairs: Vec<String> = keys
            .into_iter()
            .zip(values)
            .map(|(k, v)| self.call("pair", vec![k, v]))
            .collect();
        self.list_literal(pairs)
    }

    fn wrap_present(&self, expr: String) -> String {
        self.call("some", vec![expr])
    }

    fn check_identifier(&self, name: &str) -> Result<(), TranslateError> {
        if RESERVED.contains(&name) {
            return Err(TranslateError::unsupported(
                self.name(),
                format!("'{name}' is a reserved word"),
            ));
        }
        Ok(())
    }

    fn check_docstring(&self, doc: &str) -> Result<(), TranslateError> {
        if doc.contains("```") {
            return Err(TranslateError::unsupported(
                self.name(),
                "docstring containing ```",
            ));
        }
        Ok(())
    }

    fn prompt_header(&self, header: &PromptHeader) -> String {
        let params: Vec<String> = header
            .params
            .iter()
            .map(|(name, ty)| format!("{name} :: {ty}"))
            .collect();
        let returns = header
            .return_type
            .as_ref()
            .map(|ty| format!(" -> {ty}"))
            .unwrap_or_default();

        format!(
            "{}fun {}({}){}:\n{INDENT}doc: ```{}```\n",
            header.preamble,
            header.name,
            params.join(", "),
            returns,
            reindent(header.doc, INDENT)
        )
    }

    fn test_suite_prefix(&self, entry_point: &str) -> Vec<String> {
        // Starts with the stop marker's `end` so the suite closes the function
        vec![
            "end".to_string(),
            String::new(),
            String::new(),
            "check:".to_string(),
            format!("{INDENT}candidate = {entry_point}"),
        ]
    }

    fn test_suite_suffix(&self) -> Vec<String> {
        vec!["end\n".to_string()]
    }

    fn stop_markers(&self) -> Vec<String> {
        vec!["\nend".to_string()]
    }

    fn deep_equality(&self, left: &str, right: &str) -> String {
        format!("{INDENT}{left} is-roughly {right}")
    }

    fn file_extension(&self) -> &'static str {
        "arr"
    }

    fn no_completion_stub(&self) -> String {
        format!("{INDENT}...\nend")
    }
}
