//! Source-side types shared by the frontend and the code generators
//!
//! These describe a benchmark problem as it was written in the source
//! language: type annotations, literal values, the function signature and
//! the test cases extracted from the reference test suite.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed type annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A bare name such as `int` or `str`
    Named(String),
    /// A subscripted name such as `List[int]` or `Dict[str, int]`
    Generic(String, Vec<TypeExpr>),
    /// A bare tuple of types such as `(int, str)`
    Tuple(Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Named(name.to_string())
    }

    pub fn generic(base: &str, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic(base.to_string(), args)
    }

    /// Annotation used when the source left a parameter unannotated
    pub fn untyped() -> Self {
        Self::named("Any")
    }

    /// The wrapped type of `Optional[T]`, if this is one
    pub fn optional_inner(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Generic(base, args) if base.eq_ignore_ascii_case("optional") && args.len() == 1 => {
                args.first()
            }
            _ => None,
        }
    }

    /// Does a `Dict[..]` appear anywhere inside this annotation
    pub fn contains_dict(&self) -> bool {
        match self {
            TypeExpr::Named(_) => false,
            TypeExpr::Generic(base, args) => {
                base.eq_ignore_ascii_case("dict") || args.iter().any(TypeExpr::contains_dict)
            }
            TypeExpr::Tuple(elems) => elems.iter().any(TypeExpr::contains_dict),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{name}"),
            TypeExpr::Generic(base, args) => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}[{}]", base, args.join(", "))
            }
            TypeExpr::Tuple(elems) if elems.len() == 1 => write!(f, "({},)", elems[0]),
            TypeExpr::Tuple(elems) => {
                let elems: Vec<String> = elems.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", elems.join(", "))
            }
        }
    }
}

/// A scalar constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A constant value as it appears in a test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Literal),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Key/value pairs in source order
    Dict(Vec<(Value, Value)>),
}

impl Value {
    pub fn none() -> Self {
        Value::Scalar(Literal::None)
    }

    pub fn bool(b: bool) -> Self {
        Value::Scalar(Literal::Bool(b))
    }

    pub fn int(n: i64) -> Self {
        Value::Scalar(Literal::Int(n))
    }

    pub fn float(x: f64) -> Self {
        Value::Scalar(Literal::Float(x))
    }

    pub fn str(s: &str) -> Self {
        Value::Scalar(Literal::Str(s.to_string()))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::Scalar(Literal::None))
    }
}

/// One parameter of a function signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub annotation: TypeExpr,
}

impl Param {
    pub fn new(name: &str, annotation: TypeExpr) -> Self {
        Self {
            name: name.to_string(),
            annotation,
        }
    }
}

/// The function a benchmark problem asks to complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Option<TypeExpr>,
    pub docstring: String,
}

impl FunctionSignature {
    pub fn new(name: &str, params: Vec<Param>, returns: Option<TypeExpr>, docstring: &str) -> Self {
        Self {
            name: name.to_string(),
            params,
            returns,
            docstring: docstring.to_string(),
        }
    }
}

/// One `candidate(args) == expected` check from the reference test suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub args: Vec<Value>,
    pub expected: Value,
}

/// Everything the frontend extracts from one benchmark source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProblem {
    pub signature: FunctionSignature,
    pub tests: Vec<TestCase>,
}
