//! Target registry

pub mod pyret;

pub use pyret::Pyret;

use crate::translator::Translator;

/// Canonical names of every available target
pub const TARGETS: &[&str] = &["pyret"];

/// Look up a target by name or file extension
pub fn translator_for(name: &str) -> Option<&'static dyn Translator> {
    match name.to_ascii_lowercase().as_str() {
        "pyret" | "arr" => Some(&Pyret),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(translator_for("pyret").map(|t| t.name()), Some("pyret"));
        assert_eq!(translator_for("ARR").map(|t| t.file_extension()), Some("arr"));
        assert!(translator_for("cobol").is_none());
    }

    #[test]
    fn test_every_target_resolves() {
        for name in TARGETS {
            assert_eq!(translator_for(name).map(|t| t.name()), Some(*name));
        }
    }
}
