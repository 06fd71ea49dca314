/// The outcome of a write operation (insert, update, delete).
///
/// Every mutating call returns this one shape. Counters that do not apply
/// to the operation stay at zero.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::WriteResult;
///
/// let result = WriteResult::updated(2, 2);
/// assert_eq!(result.matched_count(), 2);
/// assert_eq!(result.updated_count(), 2);
/// assert_eq!(result.inserted_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResult {
    matched_count: usize,
    inserted_count: usize,
    updated_count: usize,
    deleted_count: usize,
}

impl WriteResult {
    pub fn inserted(inserted_count: usize) -> Self {
        WriteResult {
            inserted_count,
            ..Default::default()
        }
    }

    pub fn updated(matched_count: usize, updated_count: usize) -> Self {
        WriteResult {
            matched_count,
            updated_count,
            ..Default::default()
        }
    }

    pub fn deleted(deleted_count: usize) -> Self {
        WriteResult {
            deleted_count,
            ..Default::default()
        }
    }

    /// Number of documents the condition selected.
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn inserted_count(&self) -> usize {
        self.inserted_count
    }

    pub fn updated_count(&self) -> usize {
        self.updated_count
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_count
    }

    /// Total number of documents the operation changed.
    pub fn affected_count(&self) -> usize {
        self.inserted_count + self.updated_count + self.deleted_count
    }
}
