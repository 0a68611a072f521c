//! Autocomplete suggestions for the search box. Suggestions always run
//! against the full catalog, never the filtered view, and are recomputed on
//! every keystroke; they are cheap enough that only the main filter gets the
//! debounce treatment.

use std::collections::HashSet;

use crate::models::WatchRecord;

/// Upper bound on the number of suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 5;

/// Collect up to [`MAX_SUGGESTIONS`] catalog names containing `raw_term` as a
/// case-insensitive substring. Names are deduplicated and keep first-seen
/// order. Terms of one character or less never suggest.
pub fn suggest_names(catalog: &[WatchRecord], raw_term: &str) -> Vec<String> {
    if raw_term.chars().count() <= 1 {
        return Vec::new();
    }

    let needle = raw_term.to_lowercase();
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for watch in catalog {
        if !watch.name.to_lowercase().contains(&needle) {
            continue;
        }
        if seen.insert(watch.name.clone()) {
            names.push(watch.name.clone());
            if names.len() == MAX_SUGGESTIONS {
                break;
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchCategory;

    fn named(id: i64, name: &str) -> WatchRecord {
        WatchRecord {
            id,
            name: name.to_string(),
            category: WatchCategory::Vanguard,
            image_url: format!("https://i.imgur.com/watch{id}.jpg"),
            description: String::new(),
            material: None,
            dimensions: None,
            movement: None,
        }
    }

    #[test]
    fn one_character_terms_never_suggest() {
        let catalog = vec![named(1, "Aeon Drift")];
        assert!(suggest_names(&catalog, "A").is_empty());
        assert!(suggest_names(&catalog, "").is_empty());
        assert_eq!(suggest_names(&catalog, "Ae"), vec!["Aeon Drift"]);
    }

    #[test]
    fn matches_are_case_insensitive_and_order_preserving() {
        let catalog = vec![
            named(1, "Helix Vanguard"),
            named(2, "Aeon Drift"),
            named(3, "Gran Turismo Heritage"),
        ];
        assert_eq!(
            suggest_names(&catalog, "AN"),
            vec!["Helix Vanguard", "Gran Turismo Heritage"]
        );
    }

    #[test]
    fn duplicate_names_collapse_to_one_entry() {
        let catalog = vec![
            named(1, "Aeon Drift"),
            named(2, "Aeon Drift"),
            named(3, "Aeon Drift Mk II"),
        ];
        assert_eq!(
            suggest_names(&catalog, "aeon"),
            vec!["Aeon Drift", "Aeon Drift Mk II"]
        );
    }

    #[test]
    fn list_caps_at_five_entries() {
        let catalog: Vec<WatchRecord> = (1..=8)
            .map(|id| named(id, &format!("Concept {id}")))
            .collect();
        let suggestions = suggest_names(&catalog, "concept");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Concept 1");
        assert_eq!(suggestions[4], "Concept 5");
    }
}
