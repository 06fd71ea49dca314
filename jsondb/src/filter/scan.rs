use crate::collection::Document;
use crate::errors::JsonDbResult;

use super::{compile, is_all_filter, Filter};

/// The ordered documents selected by a condition.
///
/// Holds copies of the matched documents taken at the time of the call;
/// later writes to the store do not change an existing result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    documents: Vec<Document>,
}

impl MatchResult {
    pub(crate) fn new(documents: Vec<Document>) -> Self {
        MatchResult { documents }
    }

    /// Number of matched documents.
    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The first match in collection order.
    pub fn first(&self) -> Option<&Document> {
        self.documents.first()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn to_vec(&self) -> Vec<Document> {
        self.documents.clone()
    }

    pub fn into_vec(self) -> Vec<Document> {
        self.documents
    }
}

impl IntoIterator for MatchResult {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Filters `documents` by `condition`, keeping collection order.
///
/// This is a full scan: every document is tested, nothing is indexed and
/// the input is left untouched. With `inverse` the condition's inverted
/// form is applied (see [compile] for what inversion means per condition
/// shape).
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::filter_documents;
///
/// let docs = vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 3 }];
/// let result = filter_documents(&doc! { "$lt": { a: 2 } }, &docs, true).unwrap();
/// assert_eq!(result.into_vec(), vec![doc! { a: 2 }, doc! { a: 3 }]);
/// ```
pub fn filter_documents(
    condition: &Document,
    documents: &[Document],
    inverse: bool,
) -> JsonDbResult<MatchResult> {
    let filter = compile(condition, inverse)?;
    let positions = matching_positions(&filter, documents)?;
    Ok(MatchResult::new(
        positions.into_iter().map(|i| documents[i].clone()).collect(),
    ))
}

/// Positions of every document the filter accepts, in ascending order.
pub(crate) fn matching_positions(filter: &Filter, documents: &[Document]) -> JsonDbResult<Vec<usize>> {
    if is_all_filter(filter) {
        return Ok((0..documents.len()).collect());
    }

    let mut positions = Vec::new();
    for (position, document) in documents.iter().enumerate() {
        if filter.apply(document)? {
            positions.push(position);
        }
    }
    Ok(positions)
}

/// Position of the first document the filter accepts.
pub(crate) fn first_position(filter: &Filter, documents: &[Document]) -> JsonDbResult<Option<usize>> {
    for (position, document) in documents.iter().enumerate() {
        if filter.apply(document)? {
            return Ok(Some(position));
        }
    }
    Ok(None)
}
