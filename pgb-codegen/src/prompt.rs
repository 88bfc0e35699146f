//! Prompt synthesis
//!
//! Builds the target-language function header and doc comment for one
//! source signature. Targets that cannot express a problem make it
//! disappear from the run (an absent prompt) instead of aborting it;
//! malformed signatures are reported as errors.

use crate::error::TranslateError;
use crate::translator::{PromptHeader, Translator};
use crate::type_mapper::{TranslationState, TypeMapper};
use log::warn;
use pgb_common::FunctionSignature;
use std::collections::HashSet;

/// Prompt for `signature`, or `None` when the target cannot express it
pub fn synthesize_prompt<T: Translator + ?Sized>(
    translator: &T,
    signature: &FunctionSignature,
) -> Result<Option<String>, TranslateError> {
    synthesize_prompt_with(translator, signature, TranslationState::default())
}

/// Like `synthesize_prompt`, starting from an existing state (for example
/// when test values already need a map definition)
pub fn synthesize_prompt_with<T: Translator + ?Sized>(
    translator: &T,
    signature: &FunctionSignature,
    state: TranslationState,
) -> Result<Option<String>, TranslateError> {
    match build_header(translator, signature, state) {
        Ok(prompt) => Ok(Some(prompt)),
        Err(e @ TranslateError::Unsupported { .. }) => {
            warn!("Skipping '{}': {}", signature.name, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn build_header<T: Translator + ?Sized>(
    translator: &T,
    signature: &FunctionSignature,
    state: TranslationState,
) -> Result<String, TranslateError> {
    if signature.name.is_empty() {
        return Err(TranslateError::internal("function has no name"));
    }
    translator.check_identifier(&signature.name)?;

    let mut seen = HashSet::new();
    for param in &signature.params {
        if param.name.is_empty() {
            return Err(TranslateError::internal(format!(
                "unnamed parameter in '{}'",
                signature.name
            )));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(TranslateError::internal(format!(
                "duplicate parameter '{}' in '{}'",
                param.name, signature.name
            )));
        }
        translator.check_identifier(&param.name)?;
    }
    translator.check_docstring(&signature.docstring)?;

    let mut mapper = TypeMapper::new(translator);
    let params: Vec<(String, String)> = signature
        .params
        .iter()
        .map(|p| (p.name.clone(), mapper.translate(&p.annotation)))
        .collect();
    let return_type = signature.returns.as_ref().map(|r| mapper.translate(r));

    let mut used = mapper.finish();
    used.uses_map |= state.uses_map;

    Ok(translator.prompt_header(&PromptHeader {
        name: &signature.name,
        params,
        return_type,
        doc: &signature.docstring,
        preamble: used.preamble(translator),
    }))
}
