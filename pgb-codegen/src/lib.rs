//! Polyglot Bench - Code Generation
//!
//! Turns source benchmark problems into target-language problems:
//!
//! - Type mapping from source annotations to target type syntax
//! - The `Translator` contract each target backend implements
//! - Prompt synthesis (function header plus doc comment)
//! - Test-suite translation with value coercion
//! - Target backends (Pyret)

pub mod docstring;
pub mod error;
pub mod prompt;
pub mod suite;
pub mod targets;
pub mod translator;
pub mod type_mapper;

pub use error::TranslateError;
pub use prompt::{synthesize_prompt, synthesize_prompt_with};
pub use suite::{render_value, translate_suite};
pub use targets::{translator_for, TARGETS};
pub use translator::{scalar_literal, PromptHeader, Translator};
pub use type_mapper::{MapSupport, Primitive, TranslationState, TypeMapper, TypeSyntax};

use pgb_common::{Problem, SourceProblem};

/// Build the complete problem record for one source problem
///
/// Returns `None` when the target cannot express the problem. The record has
/// no completions yet.
pub fn build_problem<T: Translator + ?Sized>(
    translator: &T,
    name: &str,
    source: &SourceProblem,
) -> Result<Option<Problem>, TranslateError> {
    let state = TranslationState {
        uses_map: suite::tests_use_map(&source.tests),
    };
    let Some(prompt) = synthesize_prompt_with(translator, &source.signature, state)? else {
        return Ok(None);
    };

    Ok(Some(Problem {
        name: name.to_string(),
        language: translator.name().to_string(),
        prompt,
        tests: translate_suite(translator, &source.signature, &source.tests),
        completions: Vec::new(),
        entry_point: source.signature.name.clone(),
        stop_tokens: translator.stop_markers(),
    }))
}
