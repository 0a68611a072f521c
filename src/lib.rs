//! Core library surface for the Horologia concept-watch portfolio browser.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the immutable catalog, the favorites store, the headless
//! view-state controller, and the Ratatui shell driving it.

pub mod catalog;
pub mod db;
pub mod models;
pub mod state;
pub mod ui;

/// The persistence layer: the SQLite-backed key-value slot plus the
/// favorites store hydrated from it at startup.
pub use db::{ensure_schema, FavoritesStore};

/// The catalog source and its record types.
pub use catalog::{fetch_catalog, Catalog};
pub use models::{WatchCategory, WatchRecord};

/// The view-state controller every front end drives.
pub use state::Portfolio;

/// The interactive application shell and its event loop.
pub use ui::{run_app, App};
