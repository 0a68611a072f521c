//! Persistence module split across logical submodules.

mod connection;
mod favorites;

pub use connection::{ensure_schema, ensure_schema_at, init_schema};
pub use favorites::{FavoriteChange, FavoritesStore, StoreError, FAVORITES_KEY};
