//! The filter engine: a pure derivation from catalog, favorites, and filter
//! state down to the visible subset. Filtering is a predicate pass over the
//! catalog in its original order; nothing here sorts, ranks, or mutates.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use crate::models::{WatchCategory, WatchRecord};

/// Quiet interval a search edit must survive before the filter recomputes
/// with it. The raw term keeps driving the input box and suggestions; only
/// the debounced copy reaches the predicate.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Transient filter inputs owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Active category selection. Empty means no category restriction. The
    /// selection discipline is exclusive: picking a category replaces the
    /// set, picking it again clears it (see `Portfolio::toggle_category`).
    pub active_categories: BTreeSet<WatchCategory>,
    /// Restrict the view to favorited records.
    pub favorites_only: bool,
    /// Raw search input, exactly as typed.
    pub search_term: String,
    /// The raw term after the quiet interval. This is what the predicate
    /// matches against.
    pub debounced_term: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute the visible subset as indices into `catalog`, preserving catalog
/// order. Category, favorites, and text predicates are ANDed; an empty
/// category selection and an empty (debounced) term each pass everything.
/// Pure: identical inputs always yield identical output.
pub fn derive_visible(
    catalog: &[WatchRecord],
    favorites: &HashSet<i64>,
    filter: &FilterState,
) -> Vec<usize> {
    let needle = filter.debounced_term.to_lowercase();

    catalog
        .iter()
        .enumerate()
        .filter(|(_, watch)| {
            let category_match = filter.active_categories.is_empty()
                || filter.active_categories.contains(&watch.category);
            let favorite_match = !filter.favorites_only || favorites.contains(&watch.id);
            let search_match = needle.is_empty()
                || watch.name.to_lowercase().contains(&needle)
                || watch.description.to_lowercase().contains(&needle);
            category_match && favorite_match && search_match
        })
        .map(|(index, _)| index)
        .collect()
}
