use std::{any::Any, cmp::Ordering, fmt::Display};

use crate::{
    collection::Document,
    common::{Value, OP_GT, OP_GTE, OP_LT, OP_LTE},
    errors::{ErrorKind, JsonDbError, JsonDbResult},
};

use super::FilterProvider;

/// Comparison operators of the condition grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    pub(crate) fn from_operator(operator: &str) -> JsonDbResult<ComparisonMode> {
        match operator {
            OP_LT => Ok(ComparisonMode::Lesser),
            OP_LTE => Ok(ComparisonMode::LesserEqual),
            OP_GT => Ok(ComparisonMode::Greater),
            OP_GTE => Ok(ComparisonMode::GreaterEqual),
            _ => {
                log::error!("Unsupported comparison operator {}", operator);
                Err(JsonDbError::new(
                    &format!("Unsupported operator '{}'", operator),
                    ErrorKind::UnsupportedOperator,
                ))
            }
        }
    }

    /// The `(strict, flipped)` primitive this operator reduces to.
    ///
    /// Only "less than" and "less than or equal" are evaluated; the greater
    /// operators are their negations: `gt(x, y) = !(x <= y)` and
    /// `gte(x, y) = !(x < y)`.
    #[inline]
    fn primitive(self) -> (bool, bool) {
        match self {
            ComparisonMode::Lesser => (true, false),
            ComparisonMode::LesserEqual => (false, false),
            ComparisonMode::Greater => (false, true),
            ComparisonMode::GreaterEqual => (true, true),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
        }
    }
}

/// Evaluates `{field: threshold}` bounds with one less-than primitive.
///
/// A document matches when, for every bound, it holds the field and the
/// primitive's outcome differs from `inverse`. A document without the field
/// never matches, inverted or not.
pub(crate) struct ComparisonFilter {
    mode: ComparisonMode,
    bounds: Vec<(String, Value)>,
    strict: bool,
    inverse: bool,
}

impl ComparisonFilter {
    #[inline]
    pub(crate) fn new(mode: ComparisonMode, bounds: Vec<(String, Value)>, inverse: bool) -> Self {
        let (strict, flipped) = mode.primitive();
        ComparisonFilter {
            mode,
            bounds,
            strict,
            inverse: inverse ^ flipped,
        }
    }
}

/// `value < threshold` when `strict`, otherwise `value <= threshold`.
#[inline]
pub(crate) fn less_than(value: &Value, threshold: &Value, strict: bool) -> JsonDbResult<bool> {
    let ordering = value.compare(threshold)?;
    Ok(if strict {
        ordering == Ordering::Less
    } else {
        ordering != Ordering::Greater
    })
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (_, flipped) = self.mode.primitive();
        let negated = if self.inverse ^ flipped { "!" } else { "" };
        let terms = self
            .bounds
            .iter()
            .map(|(field, threshold)| format!("{} {} {}", field, self.mode.symbol(), threshold))
            .collect::<Vec<_>>()
            .join(" && ");
        write!(f, "{}({})", negated, terms)
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> JsonDbResult<bool> {
        for (field, threshold) in &self.bounds {
            let Some(value) = entry.get(field) else {
                return Ok(false);
            };
            if less_than(value, threshold, self.strict)? == self.inverse {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
