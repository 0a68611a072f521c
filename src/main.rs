//! Binary entry point that glues the persisted favorites and the in-memory
//! catalog to the TUI: bring up the key-value store, hydrate the controller,
//! honor a deep link passed on the command line, and drive the Ratatui event
//! loop until the user exits.
use horologia::{ensure_schema, fetch_catalog, run_app, App, FavoritesStore, Portfolio};

/// Initialize persistence, load the catalog, and launch the event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example an unwritable home directory) to the terminal instead of crashing
/// silently. An optional first argument is treated as a deep-link fragment
/// (`'#/watch/7'`); an unknown or malformed one degrades to a normal start.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let catalog = fetch_catalog();
    let favorites = FavoritesStore::load(conn);

    let mut portfolio = Portfolio::new(catalog, favorites);
    if let Some(fragment) = std::env::args().nth(1) {
        portfolio.apply_fragment(&fragment);
    }

    let mut app = App::new(portfolio);
    run_app(&mut app)
}
