//! Domain models for the concept-watch catalog. These types stay light-weight
//! data holders so the state controller and the TUI can focus on derivation
//! and presentation logic. Catalog entries are immutable for the lifetime of
//! the process; the `id` is the stable join key between the catalog, the
//! favorites store, and deep links.

use std::fmt;

/// Closed set of collection categories. The catalog never uses a label outside
/// this set, which lets the filter bar enumerate them statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WatchCategory {
    Vanguard,
    ReimaginedClassics,
    Structural,
}

impl WatchCategory {
    /// Every category in filter-bar order.
    pub const ALL: [WatchCategory; 3] = [
        WatchCategory::Vanguard,
        WatchCategory::ReimaginedClassics,
        WatchCategory::Structural,
    ];

    /// User-facing label shown on cards and filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            WatchCategory::Vanguard => "Vanguard",
            WatchCategory::ReimaginedClassics => "Reimagined Classics",
            WatchCategory::Structural => "Structural",
        }
    }
}

impl fmt::Display for WatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone)]
/// One immutable catalog entry. Ids are positive, unique, and never reused or
/// renumbered while the process lives.
pub struct WatchRecord {
    /// Stable identifier referenced by favorites and `#/watch/<id>` links.
    pub id: i64,
    /// Display name shown on cards, in suggestions, and in share payloads.
    pub name: String,
    /// Collection the piece belongs to.
    pub category: WatchCategory,
    /// Locator for the full-resolution image. Thumbnail variants are derived
    /// from this string, not stored separately.
    pub image_url: String,
    /// Free-text blurb searched alongside the name.
    pub description: String,
    /// Optional technical attributes. Presence of any one of them enables the
    /// expandable details section on the card.
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub movement: Option<String>,
}

impl WatchRecord {
    /// Card-sized image variant: the host serves it when a size suffix is
    /// inserted before the file extension.
    pub fn thumbnail_url(&self) -> String {
        insert_size_suffix(&self.image_url, 'l')
    }

    /// Small square variant used next to search suggestions.
    pub fn small_url(&self) -> String {
        insert_size_suffix(&self.image_url, 's')
    }

    /// Whether the record carries any technical attribute worth expanding.
    pub fn has_details(&self) -> bool {
        self.material.is_some() || self.dimensions.is_some() || self.movement.is_some()
    }
}

/// Insert a single-character size suffix before the last `.` of a locator.
/// A locator without an extension is returned unchanged.
fn insert_size_suffix(url: &str, suffix: char) -> String {
    match url.rfind('.') {
        Some(index) => format!("{}{}{}", &url[..index], suffix, &url[index..]),
        None => url.to_string(),
    }
}
