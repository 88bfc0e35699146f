//! Type Mapper
//!
//! Recursive translation from a source `TypeExpr` to target type syntax.
//! Translation never fails: anything unrecognised renders as the target's
//! untyped form. Whether a key/value map type was used is recorded in a
//! `TranslationState` owned by the mapper, so each generation call starts
//! from a clean state.

use pgb_common::TypeExpr;

/// Source primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Float,
    Bool,
    Str,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Primitive::Int),
            "float" => Some(Primitive::Float),
            "bool" => Some(Primitive::Bool),
            "str" => Some(Primitive::Str),
            _ => None,
        }
    }
}

/// How a target provides key/value maps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSupport {
    /// The target has a built-in associative type
    Native,
    /// The target needs this definition emitted ahead of the function
    Synthesized(&'static str),
}

/// Type syntax of one target language
pub trait TypeSyntax {
    fn primitive(&self, primitive: Primitive) -> String;

    /// Parametric sequence type, e.g. `List<T>`
    fn sequence(&self, element: String) -> String;

    /// Anonymous product type over the given elements
    fn product(&self, elements: Vec<String>) -> String;

    /// Parametric map type
    fn map(&self, key: String, value: String) -> String;

    /// Nullable/option wrapper
    fn optional(&self, inner: String) -> String;

    /// Fallback for anything without a translation
    fn untyped(&self) -> String;

    fn map_support(&self) -> MapSupport;
}

/// Per-call record of what a translation needed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationState {
    pub uses_map: bool,
}

impl TranslationState {
    /// Definitions that must precede the generated function
    pub fn preamble<S: TypeSyntax + ?Sized>(&self, syntax: &S) -> &'static str {
        match (self.uses_map, syntax.map_support()) {
            (true, MapSupport::Synthesized(definition)) => definition,
            _ => "",
        }
    }
}

/// Translates type expressions for one generation call
pub struct TypeMapper<'a, S: TypeSyntax + ?Sized> {
    syntax: &'a S,
    state: TranslationState,
}

impl<'a, S: TypeSyntax + ?Sized> TypeMapper<'a, S> {
    pub fn new(syntax: &'a S) -> Self {
        Self {
            syntax,
            state: TranslationState::default(),
        }
    }

    pub fn translate(&mut self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(name) => match Primitive::from_name(name) {
                Some(primitive) => self.syntax.primitive(primitive),
                None => self.syntax.untyped(),
            },
            TypeExpr::Generic(base, args) => {
                match (base.to_ascii_lowercase().as_str(), args.as_slice()) {
                    ("list", [element]) => {
                        let element = self.translate(element);
                        self.syntax.sequence(element)
                    }
                    ("tuple", elements) if !elements.is_empty() => self.translate_product(elements),
                    ("dict", [key, value]) => {
                        self.state.uses_map = true;
                        let key = self.translate(key);
                        let value = self.translate(value);
                        self.syntax.map(key, value)
                    }
                    ("optional", [inner]) => {
                        let inner = self.translate(inner);
                        self.syntax.optional(inner)
                    }
                    _ => self.fallback(ty),
                }
            }
            TypeExpr::Tuple(elements) if !elements.is_empty() => self.translate_product(elements),
            TypeExpr::Tuple(_) => self.fallback(ty),
        }
    }

    /// State accumulated by this mapper's translations
    pub fn finish(self) -> TranslationState {
        self.state
    }

    fn translate_product(&mut self, elements: &[TypeExpr]) -> String {
        let elements = elements.iter().map(|e| self.translate(e)).collect();
        self.syntax.product(elements)
    }

    fn fallback(&mut self, ty: &TypeExpr) -> String {
        // A map nested in an untranslatable type still needs its definition
        // for any literal rendered against it
        if ty.contains_dict() {
            self.state.uses_map = true;
        }
        self.syntax.untyped()
    }
}
