use crate::collection::Document;
use crate::common::IN_MEMORY_STORE;
use crate::errors::JsonDbResult;
use crate::store::codec::{decode, encode, is_blank};
use crate::store::{SaveOptions, StoreProvider};
use parking_lot::Mutex;
use std::sync::Arc;

/// A store that keeps the last saved snapshot in memory.
///
/// Snapshots are held as encoded JSON, so a save/load cycle goes through the
/// same codec as the file store. Clones share the snapshot, which lets a
/// test reopen a database over the "same" backing store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    snapshot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Builds a store whose snapshot is the given raw content.
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        InMemoryStore {
            snapshot: Arc::new(Mutex::new(Some(content.into()))),
        }
    }

    /// Replaces the saved snapshot with raw content.
    pub fn set_content(&self, content: impl Into<Vec<u8>>) {
        *self.snapshot.lock() = Some(content.into());
    }
}

impl StoreProvider for InMemoryStore {
    fn open_or_create(&self) -> JsonDbResult<Vec<Document>> {
        let mut snapshot = self.snapshot.lock();
        match snapshot.as_deref() {
            Some(content) if !is_blank(content) => match decode(content) {
                Ok(documents) => Ok(documents),
                Err(e) => {
                    log::warn!("Ignoring malformed in-memory snapshot and starting empty: {}", e);
                    Ok(Vec::new())
                }
            },
            _ => {
                *snapshot = Some(b"[]".to_vec());
                Ok(Vec::new())
            }
        }
    }

    fn load(&self) -> JsonDbResult<Vec<Document>> {
        let snapshot = self.snapshot.lock();
        decode(snapshot.as_deref().unwrap_or_default())
    }

    fn save(&self, documents: &[Document], options: &SaveOptions) -> JsonDbResult<()> {
        let bytes = encode(documents, options)?;
        *self.snapshot.lock() = Some(bytes);
        Ok(())
    }

    fn store_name(&self) -> String {
        IN_MEMORY_STORE.to_string()
    }
}
