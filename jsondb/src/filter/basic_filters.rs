use std::{any::Any, fmt::Display};

use crate::{collection::Document, errors::JsonDbResult};

use super::FilterProvider;

/// A filter that matches all documents.
///
/// Compiled from the empty condition `{}`.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> JsonDbResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// Direct-match filter over every `(key, value)` pair of a condition.
///
/// Without `inverse` a document matches when it holds every pair with an
/// equal value. With `inverse` a document matches when it holds *none* of
/// the pairs. That is "not equal on any key", which is stricter than
/// negating the conjunction: `{a: 1, b: 2}` inverted rejects `{a: 1, b: 3}`.
pub(crate) struct EqualsFilter {
    condition: Document,
    inverse: bool,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(condition: Document, inverse: bool) -> Self {
        EqualsFilter { condition, inverse }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = if self.inverse { "!=" } else { "==" };
        let terms = self
            .condition
            .iter()
            .map(|(key, value)| format!("{} {} {}", key, op, value))
            .collect::<Vec<_>>()
            .join(" && ");
        write!(f, "({})", terms)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> JsonDbResult<bool> {
        let mut pairs = self.condition.iter();
        if self.inverse {
            Ok(!pairs.any(|(key, value)| entry.has_entry(key, value)))
        } else {
            Ok(pairs.all(|(key, value)| entry.has_entry(key, value)))
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
