//! Deep-link fragments and share payloads. A fragment of the form
//! `#/watch/<id>` is the single source of truth for which record is open in
//! the modal; this module owns the grammar and the share-URL construction,
//! while the controller decides what a parsed id means against the catalog.

use std::env;

use anyhow::Result;

use crate::models::WatchRecord;

/// Fragment prefix for a selected record.
pub const FRAGMENT_PREFIX: &str = "#/watch/";

/// Origin-plus-path of the hosted gallery, used when composing share links.
const DEFAULT_SHARE_BASE: &str = "https://horologia.example";
/// Environment override for the share base, mainly for staging deployments.
const SHARE_BASE_ENV: &str = "HOROLOGIA_SHARE_BASE";

/// Parse a fragment into a candidate record id. Only `#/watch/` followed by
/// bare decimal digits qualifies; anything else (signs, trailing junk, empty
/// id, out-of-range values) is malformed and yields `None`.
pub fn parse_fragment(fragment: &str) -> Option<i64> {
    let digits = fragment.strip_prefix(FRAGMENT_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Fragment naming a record, the inverse of [`parse_fragment`].
pub fn fragment_for(id: i64) -> String {
    format!("{FRAGMENT_PREFIX}{id}")
}

/// Payload handed to whatever share capability the environment provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    /// Build the share payload for one record: a fully qualified link plus
    /// title and teaser text.
    pub fn for_watch(watch: &WatchRecord) -> Self {
        Self {
            title: format!("Horologia Concepts: {}", watch.name),
            text: format!("Check out this incredible concept watch: {}!", watch.name),
            url: format!("{}/{}", share_base(), fragment_for(watch.id)),
        }
    }
}

/// What happened when the native share capability was offered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDisposition {
    /// The capability took the request. Covers user cancellation too, which
    /// is expected and must not surface as an error.
    Handled,
    /// No native share capability exists in this environment; the caller
    /// falls back to copying the link.
    Unavailable,
}

/// Environment-provided share and clipboard capabilities. The controller
/// drives the fallback chain; implementations only perform the mechanics.
pub trait ShareSink {
    /// Offer the request to a native share capability, if one exists.
    fn native_share(&mut self, request: &ShareRequest) -> ShareDisposition;

    /// Copy `text` to the clipboard. Failure here is the one share problem
    /// that gets reported to the user.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

/// Share base with any trailing slash trimmed, so composed URLs always have
/// exactly one separator before the fragment.
fn share_base() -> String {
    let base = env::var(SHARE_BASE_ENV).unwrap_or_else(|_| DEFAULT_SHARE_BASE.to_string());
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchCategory;

    #[test]
    fn well_formed_fragments_parse_to_their_id() {
        assert_eq!(parse_fragment("#/watch/3"), Some(3));
        assert_eq!(parse_fragment("#/watch/9999"), Some(9999));
    }

    #[test]
    fn malformed_fragments_are_rejected() {
        assert_eq!(parse_fragment(""), None);
        assert_eq!(parse_fragment("#/watch/"), None);
        assert_eq!(parse_fragment("#/watch/abc"), None);
        assert_eq!(parse_fragment("#/watch/-3"), None);
        assert_eq!(parse_fragment("#/watch/3/extra"), None);
        assert_eq!(parse_fragment("#/watch/0"), None);
        assert_eq!(parse_fragment("#/gallery/3"), None);
        // Larger than i64: parse fails, treated as malformed.
        assert_eq!(parse_fragment("#/watch/99999999999999999999"), None);
    }

    #[test]
    fn fragment_round_trips_through_the_formatter() {
        assert_eq!(parse_fragment(&fragment_for(17)), Some(17));
    }

    #[test]
    fn share_request_embeds_the_record_fragment() {
        let watch = WatchRecord {
            id: 3,
            name: "Nocturne Zero".to_string(),
            category: WatchCategory::Vanguard,
            image_url: "https://i.imgur.com/c9VbLn3.jpg".to_string(),
            description: String::new(),
            material: None,
            dimensions: None,
            movement: None,
        };

        let request = ShareRequest::for_watch(&watch);
        assert!(request.url.ends_with("/#/watch/3"));
        assert!(request.title.contains("Nocturne Zero"));
        assert!(request.text.contains("Nocturne Zero"));
    }
}
