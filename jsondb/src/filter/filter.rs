use crate::collection::Document;
use crate::common::{Value, COMPARISON_OPERATORS, OPERATOR_SIGIL};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use itertools::Itertools;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::ComparisonFilter;
use super::ComparisonMode;
use super::EqualsFilter;

/// A compiled predicate over a single document.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// An error aborts the whole scan the filter is part of.
    fn apply(&self, entry: &Document) -> JsonDbResult<bool>;

    fn as_any(&self) -> &dyn Any;
}

/// A compiled condition, ready to be applied to documents.
///
/// Filters are produced by [compile] from a condition document and are
/// cheap to clone.
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter({})", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

/// Compiles a condition document into a [Filter].
///
/// * `{}` matches every document, whatever `inverse` says.
/// * A condition whose only key is one of `$lt`, `$lte`, `$gt`, `$gte` maps
///   to a mapping of `{field: threshold}` pairs and compiles to a
///   comparison filter.
/// * Any other condition is a direct match on every `(key, value)` pair.
///
/// Conditions are rejected when they use an unknown `$` key
/// ([ErrorKind::UnsupportedOperator]), mix an operator with other keys or
/// give an operator something other than a mapping
/// ([ErrorKind::TypeMismatch]), or compare against a threshold that is
/// neither a number nor a string ([ErrorKind::IncomparableTypes]).
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::compile;
///
/// let filter = compile(&doc! { "$gt": { age: 30 } }, false).unwrap();
/// assert!(filter.apply(&doc! { age: 42 }).unwrap());
/// assert!(!filter.apply(&doc! { age: 30 }).unwrap());
/// assert!(!filter.apply(&doc! { name: "no age" }).unwrap());
/// ```
pub fn compile(condition: &Document, inverse: bool) -> JsonDbResult<Filter> {
    if condition.is_empty() {
        return Ok(all());
    }

    let operators = condition
        .fields()
        .into_iter()
        .filter(|key| key.starts_with(OPERATOR_SIGIL))
        .collect_vec();

    if let Some(unknown) = operators
        .iter()
        .find(|op| !COMPARISON_OPERATORS.contains(&op.as_str()))
    {
        log::error!("Unsupported operator {} in condition {}", unknown, condition);
        return Err(JsonDbError::new(
            &format!("Unsupported operator '{}'", unknown),
            ErrorKind::UnsupportedOperator,
        ));
    }

    match operators.as_slice() {
        [] => Ok(Filter::new(EqualsFilter::new(condition.clone(), inverse))),
        [operator] if condition.size() == 1 => {
            let mode = ComparisonMode::from_operator(operator)?;
            let bounds = comparison_bounds(operator, condition.get(operator))?;
            Ok(Filter::new(ComparisonFilter::new(mode, bounds, inverse)))
        }
        _ => {
            log::error!("Condition {} mixes an operator with other keys", condition);
            Err(JsonDbError::new(
                &format!(
                    "A condition holds either one operator or plain keys, found [{}]",
                    condition.fields().join(", ")
                ),
                ErrorKind::TypeMismatch,
            ))
        }
    }
}

fn comparison_bounds(operator: &str, value: Option<&Value>) -> JsonDbResult<Vec<(String, Value)>> {
    let Some(Value::Document(bounds)) = value else {
        log::error!("Operator {} expects a mapping of field thresholds", operator);
        return Err(JsonDbError::new(
            &format!("Operator '{}' expects a mapping of {{field: threshold}}", operator),
            ErrorKind::TypeMismatch,
        ));
    };

    bounds
        .iter()
        .map(|(field, threshold)| {
            if threshold.is_comparable() {
                Ok((field.clone(), threshold.clone()))
            } else {
                log::error!("Threshold {} for {} is not orderable", threshold, field);
                Err(JsonDbError::new(
                    &format!(
                        "Cannot compare field '{}' against a {} threshold",
                        field,
                        threshold.type_name()
                    ),
                    ErrorKind::IncomparableTypes,
                ))
            }
        })
        .collect()
}
