//! Properties every registered target must satisfy

use pgb_codegen::{build_problem, translator_for, Translator, TypeMapper, TARGETS};
use pgb_common::{FunctionSignature, Param, SourceProblem, TestCase, TypeExpr, Value};
use pgb_frontend::Frontend;
use pretty_assertions::assert_eq;

fn targets() -> Vec<&'static dyn Translator> {
    TARGETS.iter().filter_map(|name| translator_for(name)).collect()
}

fn annotations() -> Vec<TypeExpr> {
    [
        "int",
        "List[Tuple[int, str]]",
        "Dict[str, List[float]]",
        "Optional[Dict[int, int]]",
        "(bool, str)",
        "Callable[[int], int]",
        "Frobnicator",
        "Union[int, str]",
        "Tuple[int, ...]",
    ]
    .iter()
    .filter_map(|text| Frontend::parse_annotation(text).ok())
    .chain([TypeExpr::generic("Tuple", vec![TypeExpr::named("int"), TypeExpr::named("str")])])
    .collect()
}

fn sample_problem() -> SourceProblem {
    let list = TypeExpr::generic("List", vec![TypeExpr::named("int")]);
    SourceProblem {
        signature: FunctionSignature::new(
            "sum_product",
            vec![Param::new("numbers", list)],
            Some(TypeExpr::generic(
                "Tuple",
                vec![TypeExpr::named("int"), TypeExpr::named("int")],
            )),
            "For a given list of integers, return a tuple consisting of a sum and a product.\n    >>> sum_product([])\n    (0, 1)\n    ",
        ),
        tests: vec![TestCase {
            args: vec![Value::List(vec![Value::int(3), Value::int(5)])],
            expected: Value::Tuple(vec![Value::int(8), Value::int(15)]),
        }],
    }
}

#[test]
fn translation_is_total_and_deterministic() {
    for target in targets() {
        for ty in annotations() {
            let first = TypeMapper::new(target).translate(&ty);
            let second = TypeMapper::new(target).translate(&ty);
            assert!(!first.is_empty());
            assert_eq!(first, second);
        }

        let unknown_a = TypeMapper::new(target).translate(&TypeExpr::named("Foo"));
        let unknown_b = TypeMapper::new(target).translate(&TypeExpr::generic("Bar", vec![]));
        assert_eq!(unknown_a, unknown_b);
    }
}

#[test]
fn dict_anywhere_sets_signal_once_per_call() {
    let dict = TypeExpr::generic("Dict", vec![TypeExpr::named("str"), TypeExpr::named("int")]);
    let deep = TypeExpr::generic(
        "List",
        vec![TypeExpr::Tuple(vec![dict.clone(), TypeExpr::generic("Optional", vec![dict.clone()])])],
    );

    for target in targets() {
        let mut mapper = TypeMapper::new(target);
        mapper.translate(&deep);
        mapper.translate(&dict);
        assert!(mapper.finish().uses_map);

        // A later call starts clean
        let mut mapper = TypeMapper::new(target);
        mapper.translate(&TypeExpr::named("int"));
        assert!(!mapper.finish().uses_map);
    }
}

#[test]
fn stub_completes_any_prompt() {
    for target in targets() {
        let problem = build_problem(target, "HumanEval_8_sum_product", &sample_problem())
            .unwrap()
            .unwrap();
        let text = format!("{}{}", problem.prompt, target.no_completion_stub());

        let opened = text.lines().filter(|l| l.starts_with("fun ")).count();
        let closed = text.lines().filter(|l| *l == "end").count();
        assert_eq!(opened, 1);
        assert_eq!(closed, 1);
        assert!(text.ends_with("\nend"));
    }
}

#[test]
fn stop_marker_recovers_prompt_boundary() {
    for target in targets() {
        let mut problem = build_problem(target, "HumanEval_8_sum_product", &sample_problem())
            .unwrap()
            .unwrap();
        let completion = "    {fold(lam(a, b): a + b end, 0, numbers); 1}".to_string();
        problem.completions.push(completion.clone());

        let program = problem.program(0).unwrap();
        let marker = &problem.stop_tokens[0];
        let cut = program.find(marker.as_str()).unwrap();
        assert_eq!(&program[..cut], format!("{}{}", problem.prompt, completion));
    }
}

#[test]
fn deep_equality_is_one_line_assertion() {
    for target in targets() {
        for literal in ["1", "1.0000001", "[list: 1, 2]", "\"x\""] {
            let assertion = target.deep_equality(literal, literal);
            assert_eq!(assertion.lines().count(), 1);
            assert_eq!(assertion.matches(literal).count(), 2);
        }
    }
}

#[test]
fn source_file_to_pyret_problem() {
    let source = r#"
def strlen(string: str) -> int:
    """ Return length of given string
    >>> strlen('')
    0
    """


def check(candidate):
    assert candidate('') == 0
    assert candidate('x') == 1
"#;
    let parsed = Frontend::parse_problem(source, "HumanEval_23_strlen.py").unwrap();
    let pyret = translator_for("pyret").unwrap();
    let problem = build_problem(pyret, "HumanEval_23_strlen", &parsed).unwrap().unwrap();

    assert_eq!(
        problem.prompt,
        "fun strlen(string :: String) -> Number:\n    doc: ```Return length of given string\n    >>> strlen('')\n    0```\n"
    );
    assert_eq!(
        problem.tests,
        "end\n\n\ncheck:\n    candidate = strlen\n    candidate(\"\") is-roughly 0\n    candidate(\"x\") is-roughly 1\nend\n"
    );
}
