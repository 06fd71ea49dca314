use crate::collection::Document;
use crate::common::{JSON_EXTENSION, TEMP_FILE_SUFFIX};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::store::codec::{decode, encode, is_blank};
use crate::store::{SaveOptions, StoreProvider};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A store backed by one JSON file holding the entire collection.
///
/// The `.json` extension is appended when the given path lacks it, so
/// `JsonFileStore::new("data/users")` reads and writes `data/users.json`.
///
/// Saves go to a sibling temporary file that is then renamed over the
/// target, so the file always holds a complete snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: with_json_extension(path.as_ref()),
        }
    }

    /// The resolved path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(TEMP_FILE_SUFFIX);
        PathBuf::from(name)
    }

    fn read(&self) -> JsonDbResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| {
            log::error!("Failed to read {}: {}", self.path.display(), e);
            JsonDbError::new_with_cause(
                &format!("Failed to read {}", self.path.display()),
                ErrorKind::IOError,
                e.into(),
            )
        })
    }
}

impl StoreProvider for JsonFileStore {
    fn open_or_create(&self) -> JsonDbResult<Vec<Document>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // creates an empty file when missing, leaves an existing one untouched
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let content = self.read()?;
        if is_blank(&content) {
            log::debug!("Starting with an empty collection at {}", self.path.display());
            self.save(&[], &SaveOptions::default())?;
            return Ok(Vec::new());
        }

        match decode(&content) {
            Ok(documents) => Ok(documents),
            Err(e) => {
                // the malformed content stays on disk until the next save
                log::warn!(
                    "Ignoring malformed content in {} and starting empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn load(&self) -> JsonDbResult<Vec<Document>> {
        let content = self.read()?;
        decode(&content)
    }

    fn save(&self, documents: &[Document], options: &SaveOptions) -> JsonDbResult<()> {
        let bytes = encode(documents, options)?;
        let temp_path = self.temp_path();

        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(e) = written {
            log::error!("Failed to write {}: {}", temp_path.display(), e);
            let _ = fs::remove_file(&temp_path);
            return Err(JsonDbError::new_with_cause(
                &format!("Failed to write {}", temp_path.display()),
                ErrorKind::IOError,
                e.into(),
            ));
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            log::error!("Failed to replace {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&temp_path);
            JsonDbError::new_with_cause(
                &format!("Failed to replace {}", self.path.display()),
                ErrorKind::IOError,
                e.into(),
            )
        })?;

        log::debug!("Saved {} documents to {}", documents.len(), self.path.display());
        Ok(())
    }

    fn store_name(&self) -> String {
        self.path.display().to_string()
    }
}

fn with_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == JSON_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(JSON_EXTENSION);
    PathBuf::from(name)
}
