//! Configuration of a jsondb database.

use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::store::{InMemoryStore, JsonFileStore, SaveOptions, Store, StoreProvider};
use std::path::{Path, PathBuf};

/// Settings a database is opened with.
///
/// Built through [`JsonDbBuilder`](crate::jsondb_builder::JsonDbBuilder).
/// Without a file path or custom store, the database lives in memory.
#[derive(Clone, Default)]
pub struct JsonDbConfig {
    file_path: Option<PathBuf>,
    store: Option<Store>,
    save_options: SaveOptions,
}

impl JsonDbConfig {
    pub fn new() -> Self {
        JsonDbConfig::default()
    }

    /// The configured backing file, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn save_options(&self) -> SaveOptions {
        self.save_options
    }

    pub fn indent(&self) -> Option<usize> {
        self.save_options.indent
    }

    /// Sets the backing file path.
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty or a custom store is already set.
    pub fn set_file_path(&mut self, path: impl AsRef<Path>) -> JsonDbResult<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            log::error!("Database file path cannot be empty");
            return Err(JsonDbError::new(
                "Database file path cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }
        if self.store.is_some() {
            log::error!("Cannot set a file path on a database with a custom store");
            return Err(JsonDbError::new(
                "A custom store is already configured, a file path cannot be set",
                ErrorKind::InvalidOperation,
            ));
        }
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Sets a custom persistence adapter.
    ///
    /// # Errors
    ///
    /// Returns error if a file path is already set.
    pub fn set_store<T: StoreProvider + 'static>(&mut self, store: T) -> JsonDbResult<()> {
        if self.file_path.is_some() {
            log::error!("Cannot set a custom store on a database with a file path");
            return Err(JsonDbError::new(
                "A file path is already configured, a custom store cannot be set",
                ErrorKind::InvalidOperation,
            ));
        }
        self.store = Some(Store::new(store));
        Ok(())
    }

    pub fn set_indent(&mut self, indent: Option<usize>) {
        self.save_options.indent = indent;
    }

    /// Resolves the store the database reads and writes.
    pub(crate) fn store(&self) -> Store {
        match (&self.store, &self.file_path) {
            (Some(store), _) => store.clone(),
            (None, Some(path)) => Store::new(JsonFileStore::new(path)),
            (None, None) => Store::new(InMemoryStore::new()),
        }
    }
}
