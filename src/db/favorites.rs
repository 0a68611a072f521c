//! The favorites store: a set of watch ids hydrated once at startup and
//! rewritten in full after every toggle. The in-memory set is authoritative
//! for the session; storage failures are logged and swallowed so a broken or
//! read-only database never blocks the UI.

use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Key of the durable slot holding the serialized favorite ids.
pub const FAVORITES_KEY: &str = "favorites";

/// Failures the store can hit while reading or writing its slot. Callers
/// never see these escalate; they exist so the recovery paths can log what
/// actually went wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("favorites payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Outcome of a toggle, used to pick the notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Owns the favorite-id set and its durable slot.
pub struct FavoritesStore {
    conn: Connection,
    set: HashSet<i64>,
}

impl FavoritesStore {
    /// Hydrate the set from the durable slot. A missing or corrupt slot
    /// yields the empty set; the error is logged, never raised.
    pub fn load(conn: Connection) -> Self {
        let set = match read_slot(&conn) {
            Ok(set) => set,
            Err(err) => {
                log::warn!("failed to load favorites, starting empty: {err}");
                HashSet::new()
            }
        };
        Self { conn, set }
    }

    /// Membership test, O(1) amortized.
    pub fn contains(&self, id: i64) -> bool {
        self.set.contains(&id)
    }

    /// The current set, for the filter engine.
    pub fn ids(&self) -> &HashSet<i64> {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Flip membership for `id` and persist the whole set. The in-memory
    /// update always succeeds; a failed write is logged and swallowed so the
    /// session keeps the toggled state.
    pub fn toggle(&mut self, id: i64) -> FavoriteChange {
        let change = if self.set.remove(&id) {
            FavoriteChange::Removed
        } else {
            self.set.insert(id);
            FavoriteChange::Added
        };

        if let Err(err) = self.persist() {
            log::error!("failed to persist favorites: {err}");
        }

        change
    }

    /// Serialize the full set into the slot. Ids are written in ascending
    /// order so equal sets always produce byte-identical payloads.
    fn persist(&self) -> Result<(), StoreError> {
        let mut ids: Vec<i64> = self.set.iter().copied().collect();
        ids.sort_unstable();
        let payload = serde_json::to_string(&ids)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![FAVORITES_KEY, payload],
        )?;
        Ok(())
    }
}

/// Read and deserialize the favorites slot. Absence is not an error; a
/// present-but-malformed payload is.
fn read_slot(conn: &Connection) -> Result<HashSet<i64>, StoreError> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![FAVORITES_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match payload {
        Some(raw) => {
            let ids: Vec<i64> = serde_json::from_str(&raw)?;
            Ok(ids.into_iter().collect())
        }
        None => Ok(HashSet::new()),
    }
}
