//! The catalog source: a fixed, versioned, in-memory collection treated as if
//! it had been fetched from a gallery service. The rest of the application
//! only relies on two facts about it: records come in a stable display order,
//! and the collection never changes after `fetch_catalog` returns.

use crate::models::{WatchCategory, WatchRecord};

/// Ordered, immutable collection of watch records plus id lookups.
pub struct Catalog {
    watches: Vec<WatchRecord>,
}

impl Catalog {
    pub fn new(watches: Vec<WatchRecord>) -> Self {
        Self { watches }
    }

    /// All records in display order. Filtering downstream is a predicate over
    /// this slice and never re-sorts it.
    pub fn records(&self) -> &[WatchRecord] {
        &self.watches
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Find a record by id. The catalog holds tens of items, so a scan is the
    /// simplest correct lookup.
    pub fn by_id(&self, id: i64) -> Option<&WatchRecord> {
        self.watches.iter().find(|watch| watch.id == id)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.by_id(id).is_some()
    }
}

/// Shorthand constructor for the seeded records below.
fn watch(
    id: i64,
    name: &str,
    category: WatchCategory,
    image_url: &str,
    description: &str,
) -> WatchRecord {
    WatchRecord {
        id,
        name: name.to_string(),
        category,
        image_url: image_url.to_string(),
        description: description.to_string(),
        material: None,
        dimensions: None,
        movement: None,
    }
}

/// Load the concept collection. This stands in for a network fetch; the data
/// ships with the binary and is loaded exactly once at startup.
pub fn fetch_catalog() -> Catalog {
    use WatchCategory::{ReimaginedClassics, Structural, Vanguard};

    let watches = vec![
        WatchRecord {
            material: Some("Sandblasted titanium".to_string()),
            dimensions: Some("44mm x 12.8mm".to_string()),
            movement: Some("Manual caliber HG-01".to_string()),
            ..watch(
                1,
                "Aeon Drift",
                Vanguard,
                "https://i.imgur.com/qT4xRz1.jpg",
                "A floating hour ring suspended in sapphire, read against a fixed lume index.",
            )
        },
        watch(
            2,
            "Helix Vanguard",
            Vanguard,
            "https://i.imgur.com/Wf8mKp2.jpg",
            "Twin helical springs drive a dial that rotates instead of the hands.",
        ),
        WatchRecord {
            material: Some("Forged carbon".to_string()),
            movement: Some("Automatic caliber HG-07".to_string()),
            ..watch(
                3,
                "Nocturne Zero",
                Vanguard,
                "https://i.imgur.com/c9VbLn3.jpg",
                "An all-black display that only reveals the time under ambient moonlight.",
            )
        },
        watch(
            4,
            "Quantum Veil",
            Vanguard,
            "https://i.imgur.com/pD2sWq4.jpg",
            "Electrochromic glass hides the movement until the crown is touched.",
        ),
        watch(
            5,
            "Photon Arc",
            Vanguard,
            "https://i.imgur.com/hK7tYe5.jpg",
            "Fiber-optic strands carry daylight into a glowing minute arc.",
        ),
        WatchRecord {
            dimensions: Some("41mm x 9.9mm".to_string()),
            ..watch(
                6,
                "Meridian Pulse",
                Vanguard,
                "https://i.imgur.com/sN1uGv6.jpg",
                "A liquid-filled capillary tracks seconds as a slow crimson pulse.",
            )
        },
        watch(
            7,
            "Kinetic Bloom",
            Vanguard,
            "https://i.imgur.com/eR5jCx7.jpg",
            "Petal-shaped shutters open with the hours and close again at midnight.",
        ),
        watch(
            8,
            "Spectra Mono",
            Vanguard,
            "https://i.imgur.com/vB6wHt8.jpg",
            "A single prism hand splits white light into the twelve hour markers.",
        ),
        WatchRecord {
            material: Some("904L steel, aged brass bezel".to_string()),
            dimensions: Some("39mm x 11.2mm".to_string()),
            movement: Some("Automatic caliber HG-12".to_string()),
            ..watch(
                9,
                "Heritage Redux",
                ReimaginedClassics,
                "https://i.imgur.com/mJ3kQa9.jpg",
                "A 1950s dress silhouette rebuilt around a silicon escapement.",
            )
        },
        watch(
            10,
            "Atlas Revival",
            ReimaginedClassics,
            "https://i.imgur.com/yG8fLd1.jpg",
            "The classic world-timer ring redrawn for a drifting-pole century.",
        ),
        watch(
            11,
            "Sovereign '59",
            ReimaginedClassics,
            "https://i.imgur.com/kP4vNm2.jpg",
            "A faithful reissue of the house's first chronometer, minus the date window.",
        ),
        WatchRecord {
            movement: Some("Manual column-wheel chronograph".to_string()),
            ..watch(
                12,
                "Regatta Classic",
                ReimaginedClassics,
                "https://i.imgur.com/zX9cBf3.jpg",
                "Countdown bezel and varnished teak dial borrowed from postwar yacht timers.",
            )
        },
        watch(
            13,
            "Pilot's Echo",
            ReimaginedClassics,
            "https://i.imgur.com/aQ2dRh4.jpg",
            "An oversized onion crown and flame-blued hands, sized for modern wrists.",
        ),
        watch(
            14,
            "Gran Turismo Heritage",
            ReimaginedClassics,
            "https://i.imgur.com/tL5nWy5.jpg",
            "Dashboard-instrument numerals over a basket-weave leather dial.",
        ),
        WatchRecord {
            material: Some("Opaline silver dial, rose gold case".to_string()),
            ..watch(
                15,
                "Opaline Officer",
                ReimaginedClassics,
                "https://i.imgur.com/uC7pJs6.jpg",
                "A trench-watch revival with a hinged caseback engraving.",
            )
        },
        watch(
            16,
            "Empire Moonphase",
            ReimaginedClassics,
            "https://i.imgur.com/oF1gKt7.jpg",
            "The archive moonphase complication, re-cut with a photoreal lunar disc.",
        ),
        WatchRecord {
            material: Some("Grade 5 titanium struts".to_string()),
            dimensions: Some("46mm x 13.5mm".to_string()),
            movement: Some("Suspended automatic caliber HG-21".to_string()),
            ..watch(
                17,
                "Tensegrity One",
                Structural,
                "https://i.imgur.com/iW6bVc8.jpg",
                "The movement floats on tensioned cables with no rigid connection to the case.",
            )
        },
        watch(
            18,
            "Cantilever",
            Structural,
            "https://i.imgur.com/bM3hZe9.jpg",
            "An off-center barrel carries the entire gear train from a single beam.",
        ),
        watch(
            19,
            "Lattice Frame",
            Structural,
            "https://i.imgur.com/dS8rQn1.jpg",
            "A printed lattice case that weighs less than its own sapphire crystal.",
        ),
        watch(
            20,
            "Monocoque",
            Structural,
            "https://i.imgur.com/gV2tXa2.jpg",
            "One milled block, no caseback: the movement loads through the dial side.",
        ),
        WatchRecord {
            dimensions: Some("45mm x 11.1mm".to_string()),
            ..watch(
                21,
                "Suspension Span",
                Structural,
                "https://i.imgur.com/rY7kUf3.jpg",
                "Bridge-truss lugs spread the strap load across the whole case flank.",
            )
        },
        watch(
            22,
            "Exoskeleton V2",
            Structural,
            "https://i.imgur.com/nH4wPd4.jpg",
            "Structural skeletonization: every removed gram is a load path made visible.",
        ),
        watch(
            23,
            "Truss Automatic",
            Structural,
            "https://i.imgur.com/xK9eMb5.jpg",
            "Rotor and barrel hang inside a riveted micro-truss, visible edge-on.",
        ),
        WatchRecord {
            material: Some("Hardened vault steel".to_string()),
            movement: Some("Tourbillon caliber HG-30".to_string()),
            ..watch(
                24,
                "Vault Tourbillon",
                Structural,
                "https://i.imgur.com/fT6jRw6.jpg",
                "A tourbillon behind a miniature pressure door that opens on demand.",
            )
        },
    ];

    Catalog::new(watches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_positive_and_unique() {
        let catalog = fetch_catalog();
        let mut seen = HashSet::new();
        for watch in catalog.records() {
            assert!(watch.id > 0);
            assert!(seen.insert(watch.id), "duplicate id {}", watch.id);
        }
    }

    #[test]
    fn lookup_by_id_matches_the_record() {
        let catalog = fetch_catalog();
        let first = &catalog.records()[0];
        assert_eq!(catalog.by_id(first.id).unwrap().name, first.name);
        assert!(!catalog.contains_id(9_999));
    }

    #[test]
    fn every_category_is_represented() {
        let catalog = fetch_catalog();
        for category in WatchCategory::ALL {
            assert!(catalog.records().iter().any(|w| w.category == category));
        }
    }

    #[test]
    fn collection_is_deep_enough_to_page() {
        // The grid pages in at twenty cards, so the seeded collection has to
        // exceed the initial window for the loading path to ever run.
        assert!(fetch_catalog().len() > 20);
    }
}
