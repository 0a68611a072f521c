use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".horologia";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "horologia.sqlite";

/// Ensure the database file exists in the user's home, run lazy migrations,
/// and return a live connection.
pub fn ensure_schema() -> Result<Connection> {
    ensure_schema_at(&db_path()?)
}

/// Same as [`ensure_schema`] but against an explicit file path, so tests can
/// point the store at a throwaway location.
pub fn ensure_schema_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Create the single key-value table backing durable state. The store holds
/// one slot per logical key; values are whole serialized payloads, rewritten
/// in full on every mutation.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create kv table")?;
    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
