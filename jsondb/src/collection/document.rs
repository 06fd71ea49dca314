use im::OrdMap;
use smallvec::SmallVec;

use crate::common::Value;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use std::borrow::Cow;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// A schema-less document: a mapping from string keys to [Value]s.
///
/// Documents compare by full structural equality; key order never matters.
///
/// The map is a persistent `im::OrdMap`, so cloning a document is O(1) and
/// shares structure with the original. The store relies on that when it
/// snapshots a match set before mutating the collection.
#[derive(Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Parses a document from JSON text.
    ///
    /// Fails with [ErrorKind::EncodingError] when the text is not JSON and
    /// with [ErrorKind::TypeMismatch] when it is JSON but not a mapping.
    ///
    /// ```rust
    /// use jsondb::collection::Document;
    /// use jsondb::errors::ErrorKind;
    ///
    /// let doc = Document::from_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
    /// assert_eq!(doc.size(), 2);
    ///
    /// let err = Document::from_json("[1, 2]").unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
    /// ```
    pub fn from_json(text: &str) -> JsonDbResult<Document> {
        Document::try_from(parse_json(text)?)
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// Empty keys are rejected.
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> JsonDbResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(JsonDbError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key.into_owned(), value.into());
        Ok(())
    }

    /// Gets the value mapped to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes `key` and returns the value it held.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Top-level field names in key order.
    pub fn fields(&self) -> FieldVec {
        self.data.keys().cloned().collect()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Checks that the document survives a save and reload unchanged.
    ///
    /// NaN and the infinities have no JSON form, so a document holding one
    /// at any depth is rejected with [ErrorKind::TypeMismatch].
    pub(crate) fn check_storable(&self) -> JsonDbResult<()> {
        self.data
            .iter()
            .try_for_each(|(key, value)| check_storable_value(key, value))
    }

    /// Checks whether this document maps `key` to a value equal to `value`.
    #[inline]
    pub(crate) fn has_entry(&self, key: &str, value: &Value) -> bool {
        self.data.get(key).is_some_and(|v| v == value)
    }
}

fn check_storable_value(path: &str, value: &Value) -> JsonDbResult<()> {
    match value {
        Value::F64(number) if !number.is_finite() => {
            log::error!("Field {} holds non-finite number {}", path, number);
            Err(JsonDbError::new(
                &format!("Field '{}' holds {}, which has no JSON representation", path, number),
                ErrorKind::TypeMismatch,
            ))
        }
        Value::Array(items) => items
            .iter()
            .try_for_each(|item| check_storable_value(path, item)),
        Value::Document(doc) => doc
            .iter()
            .try_for_each(|(key, item)| check_storable_value(&format!("{}.{}", path, key), item)),
        _ => Ok(()),
    }
}

// Keys go through the same rule as `put`, so parsed documents never hold an
// empty key.
impl<'de> serde::Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = <OrdMap<String, Value> as serde::Deserialize>::deserialize(deserializer)?;
        if data.contains_key("") {
            return Err(serde::de::Error::custom("document does not support empty key"));
        }
        Ok(Document { data })
    }
}

impl TryFrom<Value> for Document {
    type Error = JsonDbError;

    fn try_from(value: Value) -> JsonDbResult<Document> {
        match value {
            Value::Document(doc) => Ok(doc),
            other => {
                log::error!("Expected a mapping but found {}", other);
                Err(JsonDbError::new(
                    &format!("Expected a key-value mapping, found a {}", other.type_name()),
                    ErrorKind::TypeMismatch,
                ))
            }
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

/// Parses a sequence of documents from JSON text, as accepted by the bulk
/// operations.
///
/// Fails with [ErrorKind::TypeMismatch] unless the text is an array whose
/// every element is a mapping.
pub fn documents_from_json(text: &str) -> JsonDbResult<Vec<Document>> {
    match parse_json(text)? {
        Value::Array(items) => items.into_iter().map(Document::try_from).collect(),
        other => {
            log::error!("Expected a sequence of mappings but found {}", other);
            Err(JsonDbError::new(
                &format!(
                    "Expected a sequence of key-value mappings, found a {}",
                    other.type_name()
                ),
                ErrorKind::TypeMismatch,
            ))
        }
    }
}

fn parse_json(text: &str) -> JsonDbResult<Value> {
    serde_json::from_str::<Value>(text).map_err(|e| {
        log::error!("Invalid JSON payload: {}", e);
        JsonDbError::new(
            &format!("Invalid JSON payload: {}", e),
            ErrorKind::EncodingError,
        )
    })
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys are identifiers or string literals (needed for operator keys such
/// as `"$lt"`); values are literals, nested `{ .. }` documents, `[ .. ]`
/// arrays, or parenthesised expressions.
///
/// ```rust
/// use jsondb::doc;
///
/// let empty = doc! {};
/// assert!(empty.is_empty());
///
/// let base = 100;
/// let user = doc! {
///     name: "Alice",
///     score: (base * 2),
///     address: { city: "Paris", tags: ["home", "primary"] },
/// };
/// assert_eq!(user.size(), 3);
///
/// let condition = doc! { "$lt": { age: 30 } };
/// assert!(condition.contains_key("$lt"));
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the [doc!] macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
