//! Polyglot Bench - Common Types and Utilities
//! 
//! This crate contains the data model shared by every stage of the
//! benchmark pipeline: parsed signatures and values on the source side,
//! problem records in between, and evaluation outcomes at the end.

pub mod error;
pub mod problem;
pub mod source_loc;
pub mod types;

pub use error::ProblemError;
pub use problem::{EvaluationOutcome, Problem, ResultList, Status, OUTPUT_LIMIT};
pub use source_loc::{SourceLocation, SourceSpan};
pub use types::*;
