use crate::collection::Document;
use crate::errors::JsonDbResult;
use crate::store::SaveOptions;
use std::ops::Deref;
use std::sync::Arc;

/// Persistence contract of the document store.
///
/// A provider loads and saves the whole collection as one unit. There is no
/// incremental format: every save replaces the previous snapshot.
///
/// # Implementations
/// - [`JsonFileStore`](crate::store::JsonFileStore): a single JSON file
/// - [`InMemoryStore`](crate::store::InMemoryStore): a snapshot kept in memory
pub trait StoreProvider: Send + Sync {
    /// Opens the backing store, creating it when it does not exist yet.
    ///
    /// New or blank backing content yields an empty collection. Malformed
    /// content is logged as a warning and also yields an empty collection.
    fn open_or_create(&self) -> JsonDbResult<Vec<Document>>;

    /// Loads the last saved snapshot.
    ///
    /// Fails with [`ErrorKind::Corrupt`](crate::errors::ErrorKind::Corrupt)
    /// when the content is not a sequence of mappings.
    fn load(&self) -> JsonDbResult<Vec<Document>>;

    /// Replaces the saved snapshot with `documents`.
    fn save(&self, documents: &[Document], options: &SaveOptions) -> JsonDbResult<()>;

    /// Human readable name of the backing store, used in logs.
    fn store_name(&self) -> String;
}

/// Shared handle to a [StoreProvider].
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn StoreProvider>,
}

impl Store {
    pub fn new<T: StoreProvider + 'static>(inner: T) -> Self {
        Store {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Store {
    type Target = Arc<dyn StoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
