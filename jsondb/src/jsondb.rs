use crate::collection::{Document, WriteResult};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::filter::{compile, first_position, matching_positions, MatchResult};
use crate::jsondb_builder::JsonDbBuilder;
use crate::jsondb_config::JsonDbConfig;
use crate::store::Store;

/// Lifecycle state of a [JsonDb] connection.
///
/// `Open` is the only state operations run in. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closed,
}

/// An embedded store for one ordered collection of JSON documents.
///
/// The whole collection lives in memory. Writes change only the in-memory
/// copy until [`commit`](JsonDb::commit) or [`close`](JsonDb::close) hands
/// it to the backing store; [`rollback`](JsonDb::rollback) throws pending
/// writes away and reloads the last saved snapshot.
///
/// Dropping an open connection saves it, so pending writes survive an
/// early return.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::jsondb::JsonDb;
///
/// # fn main() -> jsondb::errors::JsonDbResult<()> {
/// let mut db = JsonDb::builder().open_or_create()?;
/// db.insert_many(vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 3 }])?;
///
/// let small = db.find(&doc! { "$lt": { a: 2 } }, false)?;
/// assert_eq!(small.count(), 1);
///
/// let result = db.update_one(&doc! { a: 3 }, doc! { a: 30, tag: "big" })?;
/// assert_eq!(result.updated_count(), 1);
///
/// db.close()?;
/// assert!(db.find(&doc! {}, false).is_err());
/// # Ok(())
/// # }
/// ```
pub struct JsonDb {
    documents: Vec<Document>,
    store: Store,
    config: JsonDbConfig,
    state: ConnectionState,
    dirty: bool,
}

impl JsonDb {
    pub fn builder() -> JsonDbBuilder {
        JsonDbBuilder::new()
    }

    pub(crate) fn open(config: JsonDbConfig) -> JsonDbResult<JsonDb> {
        let store = config.store();
        let documents = store.open_or_create()?;
        log::debug!(
            "Opened {} with {} document(s)",
            store.store_name(),
            documents.len()
        );

        Ok(JsonDb {
            documents,
            store,
            config,
            state: ConnectionState::Open,
            dirty: false,
        })
    }

    /// Returns every document matching `condition`, in collection order.
    ///
    /// See [compile](crate::filter::compile) for the condition grammar and
    /// the meaning of `inverse`.
    pub fn find(&self, condition: &Document, inverse: bool) -> JsonDbResult<MatchResult> {
        self.check_opened()?;
        let filter = compile(condition, inverse)?;
        let positions = matching_positions(&filter, &self.documents)?;
        log::debug!("find {} matched {} document(s)", filter, positions.len());

        Ok(MatchResult::new(
            positions
                .into_iter()
                .map(|i| self.documents[i].clone())
                .collect(),
        ))
    }

    /// Returns the first document matching `condition`.
    ///
    /// # Errors
    ///
    /// [ErrorKind::NotFound] when no document matches, including when the
    /// collection is empty.
    pub fn find_one(&self, condition: &Document, inverse: bool) -> JsonDbResult<Document> {
        self.check_opened()?;
        let filter = compile(condition, inverse)?;
        match first_position(&filter, &self.documents)? {
            Some(position) => Ok(self.documents[position].clone()),
            None => {
                log::error!("No document matches {}", filter);
                Err(JsonDbError::new(
                    &format!("No document matches {}", filter),
                    ErrorKind::NotFound,
                ))
            }
        }
    }

    /// Appends one document to the collection.
    ///
    /// Documents holding NaN or an infinity are rejected with
    /// [ErrorKind::TypeMismatch], since JSON cannot represent them.
    pub fn insert_one(&mut self, document: Document) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        if document.is_empty() {
            log::error!("Cannot insert an empty document");
            return Err(JsonDbError::new(
                "Cannot insert an empty document",
                ErrorKind::EmptyInsert,
            ));
        }
        document.check_storable()?;

        self.documents.push(document);
        self.dirty = true;
        Ok(WriteResult::inserted(1))
    }

    /// Appends a batch of documents, all or nothing.
    ///
    /// The batch is rejected as a whole when it is empty or holds an empty
    /// document.
    pub fn insert_many(&mut self, documents: Vec<Document>) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        if documents.is_empty() {
            log::error!("Cannot insert an empty batch of documents");
            return Err(JsonDbError::new(
                "Cannot insert an empty batch of documents",
                ErrorKind::EmptyInsert,
            ));
        }
        if let Some(position) = documents.iter().position(Document::is_empty) {
            log::error!("Batch holds an empty document at position {}", position);
            return Err(JsonDbError::new(
                &format!("Cannot insert an empty document (batch position {})", position),
                ErrorKind::EmptyInsert,
            ));
        }
        documents.iter().try_for_each(Document::check_storable)?;

        let count = documents.len();
        self.documents.extend(documents);
        self.dirty = true;
        log::debug!("Inserted {} document(s)", count);
        Ok(WriteResult::inserted(count))
    }

    /// Replaces the first document matching `condition` with `replacement`.
    ///
    /// This is a whole-document replacement: fields of the old document that
    /// `replacement` does not hold are gone afterwards. Nothing matching is
    /// not an error, the result then reports zero counts.
    pub fn update_one(
        &mut self,
        condition: &Document,
        replacement: Document,
    ) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        replacement.check_storable()?;
        let filter = compile(condition, false)?;
        let Some(position) = first_position(&filter, &self.documents)? else {
            log::debug!("update_one {} matched nothing", filter);
            return Ok(WriteResult::updated(0, 0));
        };

        self.documents[position] = replacement;
        self.dirty = true;
        Ok(WriteResult::updated(1, 1))
    }

    /// Replaces every document matching `condition` with `replacement`.
    ///
    /// Matches are taken before anything is written, so a replacement that
    /// itself satisfies `condition` is never counted or replaced twice.
    pub fn update_many(
        &mut self,
        condition: &Document,
        replacement: Document,
    ) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        replacement.check_storable()?;
        let filter = compile(condition, false)?;
        let positions = matching_positions(&filter, &self.documents)?;

        for &position in &positions {
            self.documents[position] = replacement.clone();
        }

        let matched = positions.len();
        if matched > 0 {
            self.dirty = true;
        }
        log::debug!("update_many {} replaced {} document(s)", filter, matched);
        Ok(WriteResult::updated(matched, matched))
    }

    /// Removes the first document matching `condition`.
    pub fn delete_one(&mut self, condition: &Document) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        let filter = compile(condition, false)?;
        match first_position(&filter, &self.documents)? {
            Some(position) => {
                self.documents.remove(position);
                self.dirty = true;
                Ok(WriteResult::deleted(1))
            }
            None => Ok(WriteResult::deleted(0)),
        }
    }

    /// Removes every document matching `condition`.
    ///
    /// The empty condition clears the collection and reports its prior size.
    pub fn delete_many(&mut self, condition: &Document) -> JsonDbResult<WriteResult> {
        self.check_opened()?;
        if condition.is_empty() {
            let count = self.documents.len();
            self.documents.clear();
            self.dirty |= count > 0;
            log::debug!("Cleared {} document(s)", count);
            return Ok(WriteResult::deleted(count));
        }

        let filter = compile(condition, false)?;
        let positions = matching_positions(&filter, &self.documents)?;
        if positions.is_empty() {
            return Ok(WriteResult::deleted(0));
        }

        // positions are ascending, so a single pass drops exactly the snapshot
        let mut doomed = positions.iter().copied().peekable();
        let mut index = 0;
        self.documents.retain(|_| {
            let keep = doomed.next_if_eq(&index).is_none();
            index += 1;
            keep
        });

        self.dirty = true;
        log::debug!("delete_many {} removed {} document(s)", filter, positions.len());
        Ok(WriteResult::deleted(positions.len()))
    }

    /// Saves the in-memory collection to the backing store.
    pub fn commit(&mut self) -> JsonDbResult<()> {
        self.check_opened()?;
        self.save()
    }

    /// Same as [`commit`](JsonDb::commit).
    pub fn flush(&mut self) -> JsonDbResult<()> {
        self.commit()
    }

    /// Discards uncommitted writes and reloads the last saved snapshot.
    ///
    /// When the reload fails the in-memory collection is left as it was.
    pub fn rollback(&mut self) -> JsonDbResult<()> {
        self.check_opened()?;
        let documents = self.store.load()?;
        log::debug!(
            "Rolled back {} to {} document(s)",
            self.store.store_name(),
            documents.len()
        );
        self.documents = documents;
        self.dirty = false;
        Ok(())
    }

    /// Saves the collection and closes the connection.
    ///
    /// A failed save leaves the connection open, so the caller can retry.
    /// Closing twice is a [ErrorKind::ClosedConnection] error.
    pub fn close(&mut self) -> JsonDbResult<()> {
        self.check_opened()?;
        self.save()?;
        self.state = ConnectionState::Closed;
        log::debug!("Closed {}", self.store.store_name());
        Ok(())
    }

    /// Number of documents in the collection.
    pub fn count(&self) -> JsonDbResult<usize> {
        self.check_opened()?;
        Ok(self.documents.len())
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    /// Whether the collection holds writes not yet saved.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn config(&self) -> &JsonDbConfig {
        &self.config
    }

    fn save(&mut self) -> JsonDbResult<()> {
        self.store
            .save(&self.documents, &self.config.save_options())?;
        self.dirty = false;
        log::debug!(
            "Saved {} document(s) to {}",
            self.documents.len(),
            self.store.store_name()
        );
        Ok(())
    }

    fn check_opened(&self) -> JsonDbResult<()> {
        if self.is_closed() {
            log::error!("Database {} is closed", self.store.store_name());
            return Err(JsonDbError::new(
                "Database is closed",
                ErrorKind::ClosedConnection,
            ));
        }
        Ok(())
    }
}

impl Drop for JsonDb {
    fn drop(&mut self) {
        if self.state == ConnectionState::Open {
            if let Err(e) = self.save() {
                log::error!("Failed to save {} on drop: {}", self.store.store_name(), e);
            }
            self.state = ConnectionState::Closed;
        }
    }
}
