//! Database factory functions for benchmarks

use jsondb::jsondb::JsonDb;
use jsondb::collection::Document;
use tempfile::TempDir;

/// Result type for store operations
pub type StoreResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Context holding a database and the directory backing it
pub struct BenchContext {
    db: JsonDb,
    _dir: Option<TempDir>,
}

impl BenchContext {
    pub fn db(&self) -> &JsonDb {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut JsonDb {
        &mut self.db
    }
}

/// Create an in-memory database
pub fn create_inmemory_db() -> StoreResult<BenchContext> {
    let db = JsonDb::builder().open_or_create()?;
    Ok(BenchContext { db, _dir: None })
}

/// Create a database backed by a JSON file in a fresh temporary directory
pub fn create_file_db() -> StoreResult<BenchContext> {
    let dir = tempfile::tempdir()?;
    let db = JsonDb::builder()
        .file_path(dir.path().join("bench"))
        .open_or_create()?;
    log::debug!("Benchmark database at {}", dir.path().display());
    Ok(BenchContext {
        db,
        _dir: Some(dir),
    })
}

/// Create an in-memory database preloaded with `docs`
pub fn create_seeded_db(docs: Vec<Document>) -> StoreResult<BenchContext> {
    let mut ctx = create_inmemory_db()?;
    if !docs.is_empty() {
        ctx.db_mut().insert_many(docs)?;
    }
    Ok(ctx)
}
