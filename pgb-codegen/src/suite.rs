//! Value rendering and test-suite translation

use crate::translator::Translator;
use pgb_common::{FunctionSignature, Literal, TestCase, TypeExpr, Value};

/// Name the test suite binds the function under test to
pub const CANDIDATE: &str = "candidate";

/// Render `value` in target syntax, coercing against its declared type
///
/// Inside an `Optional` slot a none value stays as it is and anything else
/// is wrapped in the target's present constructor. Composite values are
/// walked alongside their declared element types.
pub fn render_value<T: Translator + ?Sized>(
    translator: &T,
    value: &Value,
    declared: Option<&TypeExpr>,
) -> String {
    if let Some(inner) = declared.and_then(TypeExpr::optional_inner) {
        return if value.is_none() {
            translator.literal(&Literal::None)
        } else {
            translator.wrap_present(render_value(translator, value, Some(inner)))
        };
    }

    match value {
        Value::Scalar(literal) => translator.literal(literal),
        Value::List(items) => {
            let element = declared.and_then(list_element);
            let items = items
                .iter()
                .map(|item| render_value(translator, item, element))
                .collect();
            translator.list_literal(items)
        }
        Value::Tuple(items) => {
            let elements = declared.and_then(tuple_elements).unwrap_or(&[]);
            let items = items
                .iter()
                .enumerate()
                .map(|(i, item)| render_value(translator, item, elements.get(i)))
                .collect();
            translator.tuple_literal(items)
        }
        Value::Dict(entries) => {
            let (key_type, value_type) = match declared.and_then(dict_params) {
                Some((k, v)) => (Some(k), Some(v)),
                None => (None, None),
            };
            let (keys, values): (Vec<String>, Vec<String>) = entries
                .iter()
                .map(|(k, v)| {
                    (
                        render_value(translator, k, key_type),
                        render_value(translator, v, value_type),
                    )
                })
                .unzip();
            translator.dict_literal(keys, values)
        }
    }
}

/// Translated test suite for `tests` against `signature`
pub fn translate_suite<T: Translator + ?Sized>(
    translator: &T,
    signature: &FunctionSignature,
    tests: &[TestCase],
) -> String {
    let mut lines = translator.test_suite_prefix(&signature.name);
    let candidate = translator.variable(CANDIDATE);

    for case in tests {
        let args = case
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let declared = signature.params.get(i).map(|p| &p.annotation);
                render_value(translator, arg, declared)
            })
            .collect();
        let call = translator.call(&candidate, args);
        let expected = render_value(translator, &case.expected, signature.returns.as_ref());
        lines.push(translator.deep_equality(&call, &expected));
    }

    lines.extend(translator.test_suite_suffix());
    lines.join("\n")
}

/// Does a dict appear anywhere inside the test values
pub fn tests_use_map(tests: &[TestCase]) -> bool {
    fn contains_dict(value: &Value) -> bool {
        match value {
            Value::Scalar(_) => false,
            Value::List(items) | Value::Tuple(items) => items.iter().any(contains_dict),
            Value::Dict(_) => true,
        }
    }

    tests
        .iter()
        .any(|case| case.args.iter().any(contains_dict) || contains_dict(&case.expected))
}

fn list_element(ty: &TypeExpr) -> Option<&TypeExpr> {
    match ty {
        TypeExpr::Generic(base, args) if base.eq_ignore_ascii_case("list") && args.len() == 1 => {
            args.first()
        }
        _ => None,
    }
}

fn tuple_elements(ty: &TypeExpr) -> Option<&[TypeExpr]> {
    match ty {
        TypeExpr::Generic(base, args) if base.eq_ignore_ascii_case("tuple") => Some(args.as_slice()),
        TypeExpr::Tuple(elements) => Some(elements.as_slice()),
        _ => None,
    }
}

fn dict_params(ty: &TypeExpr) -> Option<(&TypeExpr, &TypeExpr)> {
    match ty {
        TypeExpr::Generic(base, args) if base.eq_ignore_ascii_case("dict") => match args.as_slice() {
            [key, value] => Some((key, value)),
            _ => None,
        },
        _ => None,
    }
}
