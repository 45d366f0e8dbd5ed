//! Name-to-language bindings consulted while resolving an expression.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::language::Language;
use crate::primitive::Primitive;

/// Error returned when a binding name cannot be written in an expression.
///
/// # Examples
/// ```
/// use langcheck::{Language, Registry};
/// let mut registry = Registry::empty();
/// let err = registry.define("answer", Language::from_fn(|_| true)).unwrap_err();
/// assert_eq!(err.0, "answer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid language name; expected `L` followed by ASCII digits")]
pub struct InvalidName(
    /// The rejected name.
    pub String,
);

/// Return `true` when `name` has the `L<digits>` shape used in expressions.
///
/// # Examples
/// ```
/// use langcheck::is_language_name;
/// assert!(is_language_name("L42"));
/// assert!(!is_language_name("L"));
/// assert!(!is_language_name("l1"));
/// ```
#[must_use]
pub fn is_language_name(name: &str) -> bool {
    name.strip_prefix('L')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Languages available to an expression, keyed by name.
///
/// [`Registry::default`] and [`Registry::with_primitives`] start with `L1`
/// to `L4`. Further names may be bound with [`define`](Self::define) before
/// compiling.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, Language>,
}

impl Registry {
    /// Registry without any bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry seeded with the built-in primitives.
    #[must_use]
    pub fn with_primitives() -> Self {
        let entries = Primitive::ALL
            .into_iter()
            .map(|p| (p.name().to_string(), Language::primitive(p)))
            .collect();
        Self { entries }
    }

    /// Bind `name` to `language`, returning any language previously bound.
    ///
    /// # Errors
    /// Returns [`InvalidName`] when `name` is not of the form `L<digits>`,
    /// since such a binding could never be referenced.
    ///
    /// # Examples
    /// ```
    /// use langcheck::{Language, Registry, compile_with};
    ///
    /// let mut registry = Registry::with_primitives();
    /// registry
    ///     .define("L5", Language::from_fn(|s| s == "c"))
    ///     .expect("L5 is a valid name");
    /// let language = compile_with("L4.L5", &registry).expect("all names are bound");
    /// assert!(language.contains("abc"));
    /// ```
    pub fn define(
        &mut self,
        name: impl Into<String>,
        language: Language,
    ) -> Result<Option<Language>, InvalidName> {
        let name = name.into();
        if !is_language_name(&name) {
            return Err(InvalidName(name));
        }
        Ok(self.entries.insert(name, language))
    }

    /// Look up the language bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Language> {
        self.entries.get(name)
    }

    pub(crate) fn entry(&self, name: &str) -> Option<(&str, &Language)> {
        self.entries
            .get_key_value(name)
            .map(|(key, language)| (key.as_str(), language))
    }

    /// Return `true` when `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_primitives()
    }
}
