#![forbid(unsafe_code)]

mod catalog;
mod employees;
mod error;
mod gate;
mod history;
mod requests;
mod responses;
mod seed;
mod support;
mod types;

pub use error::StoreError;
pub use requests::*;
pub use seed::{default_catalog_seed, load_catalog_seed};
pub use types::*;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::install_schema;

const DB_FILE_NAME: &str = "checklist.db";

/// SQLite-backed store for employees, the checklist catalog and daily responses.
///
/// Writers are serialized by SQLite; each batch runs in one transaction.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;
        tracing::debug!(path = %db_path.display(), "checklist store opened");

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(DB_FILE_NAME)
    }
}
