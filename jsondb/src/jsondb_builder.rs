use crate::errors::{JsonDbError, JsonDbResult};
use crate::jsondb::JsonDb;
use crate::jsondb_config::JsonDbConfig;
use crate::store::StoreProvider;
use std::path::Path;

/// Builder for opening a [JsonDb].
///
/// Configuration errors are captured as they happen and reported by
/// [`open_or_create`](JsonDbBuilder::open_or_create).
///
/// # Examples
///
/// ```rust
/// use jsondb::jsondb::JsonDb;
///
/// # fn main() -> jsondb::errors::JsonDbResult<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let mut db = JsonDb::builder()
///     .file_path(dir.path().join("users"))
///     .indent(2)
///     .open_or_create()?;
///
/// db.insert_one(jsondb::doc! { name: "Alice" })?;
/// db.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct JsonDbBuilder {
    error: Option<JsonDbError>,
    config: JsonDbConfig,
}

impl JsonDbBuilder {
    pub fn new() -> Self {
        JsonDbBuilder::default()
    }

    /// Stores the collection in a JSON file at `path`.
    ///
    /// `.json` is appended when the path has another or no extension.
    pub fn file_path(mut self, path: impl AsRef<Path>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_file_path(path) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Pretty-prints saved snapshots with `indent` spaces per level.
    pub fn indent(mut self, indent: usize) -> Self {
        self.config.set_indent(Some(indent));
        self
    }

    /// Uses a custom persistence adapter instead of a file.
    pub fn store<T: StoreProvider + 'static>(mut self, store: T) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_store(store) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Opens the database, creating its backing store when missing.
    pub fn open_or_create(self) -> JsonDbResult<JsonDb> {
        if let Some(error) = self.error {
            return Err(error);
        }
        JsonDb::open(self.config)
    }
}
