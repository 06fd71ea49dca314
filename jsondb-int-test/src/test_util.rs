use jsondb::collection::{Document, WriteResult};
use jsondb::doc;
use jsondb::errors::JsonDbResult;
use jsondb::jsondb::JsonDb;
use jsondb::store::InMemoryStore;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Runs a test between its setup and teardown.
///
/// `after` runs even when the test body fails, so temporary files are
/// always removed. Any failure, including a panic inside the body, fails
/// the test with the error that caused it.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: FnOnce(&mut TestContext) -> JsonDbResult<()>,
    B: FnOnce() -> JsonDbResult<TestContext>,
    A: FnOnce(TestContext) -> JsonDbResult<()>,
{
    let mut ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test(&mut ctx)));
    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic) => std::panic::resume_unwind(panic),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

/// A database opened for one test, plus what is needed to reopen it.
pub struct TestContext {
    path: Option<PathBuf>,
    memory: Option<InMemoryStore>,
    db: JsonDb,
}

impl TestContext {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn db(&self) -> &JsonDb {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut JsonDb {
        &mut self.db
    }

    /// Closes the database if still open and opens the same backing store
    /// again.
    pub fn reopen(&mut self) -> JsonDbResult<()> {
        if !self.db.is_closed() {
            self.db.close()?;
        }
        self.db = open(self.path.as_deref(), self.memory.as_ref())?;
        Ok(())
    }

    /// Drops the database without closing it, then opens the same backing
    /// store again.
    pub fn drop_and_reopen(&mut self) -> JsonDbResult<()> {
        let scratch = JsonDb::builder().open_or_create()?;
        drop(std::mem::replace(&mut self.db, scratch));
        self.db = open(self.path.as_deref(), self.memory.as_ref())?;
        Ok(())
    }
}

fn open(path: Option<&Path>, memory: Option<&InMemoryStore>) -> JsonDbResult<JsonDb> {
    let mut builder = JsonDb::builder();
    if let Some(path) = path {
        builder = builder.file_path(path);
    }
    if let Some(store) = memory {
        builder = builder.store(store.clone());
    }
    builder.open_or_create()
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("jsondb-{}.json", id))
}

#[cfg(not(any(feature = "file", feature = "memory")))]
compile_error!("enable the `file` or `memory` feature to pick a store for the integration suite");

/// Whether the suite runs against a backing file rather than the in-memory
/// store. `memory` wins when both features are enabled.
pub const USES_FILE_STORE: bool = cfg!(all(feature = "file", not(feature = "memory")));

#[cfg(all(feature = "file", not(feature = "memory")))]
pub fn create_test_context() -> JsonDbResult<TestContext> {
    let path = random_path();
    let db = open(Some(&path), None)?;
    Ok(TestContext {
        path: Some(path),
        memory: None,
        db,
    })
}

#[cfg(feature = "memory")]
pub fn create_test_context() -> JsonDbResult<TestContext> {
    let store = InMemoryStore::new();
    let db = open(None, Some(&store))?;
    Ok(TestContext {
        path: None,
        memory: Some(store),
        db,
    })
}

pub fn cleanup(mut ctx: TestContext) -> JsonDbResult<()> {
    if !ctx.db.is_closed() {
        if let Err(e) = ctx.db.close() {
            eprintln!("Warning: Failed to close database: {:?}", e);
        }
    }

    if let Some(path) = ctx.path() {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            first_name: "fn1",
            last_name: "ln1",
            age: 34,
            data: [1, 2, 3],
            list: ["one", "two", "three"],
            body: "a quick brown fox jump over the lazy dog",
        },
        doc! {
            first_name: "fn2",
            last_name: "ln2",
            age: 47,
            data: [3, 4, 3],
            list: ["three", "four", "five"],
            body: "quick hello world from jsondb",
        },
        doc! {
            first_name: "fn3",
            last_name: "ln2",
            age: 19,
            data: [9, 4, 8],
            body: "Lorem ipsum dolor sit amet",
        },
    ]
}

pub fn insert_test_documents(db: &mut JsonDb) -> JsonDbResult<WriteResult> {
    db.insert_many(create_test_docs())
}
