//! The view-state controller. `Portfolio` owns every piece of mutable
//! application state and exposes the named operations the front end calls;
//! the visible set is rederived unconditionally after each mutation because
//! the catalog holds tens of records and a predicate pass is cheaper than any
//! dependency tracking. The controller never knows how an operation was
//! invoked, only what it means.

use std::cmp::min;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::db::{FavoriteChange, FavoritesStore};
use crate::models::{WatchCategory, WatchRecord};

use super::filter::{derive_visible, FilterState, DEBOUNCE_INTERVAL};
use super::notify::{Notice, NoticeKind};
use super::pager::Pager;
use super::router::{fragment_for, parse_fragment, ShareDisposition, ShareRequest, ShareSink};
use super::suggest::suggest_names;

/// Central application state. All timers (debounce, pending load, notice
/// dismissal) are deadlines resolved by `tick`, which the event loop calls
/// every poll cycle with the current instant.
pub struct Portfolio {
    catalog: Catalog,
    favorites: FavoritesStore,
    filter: FilterState,
    visible: Vec<usize>,
    suggestions: Vec<String>,
    pager: Pager,
    selected: Option<i64>,
    fragment: String,
    notice: Option<Notice>,
    debounce_deadline: Option<Instant>,
}

impl Portfolio {
    pub fn new(catalog: Catalog, favorites: FavoritesStore) -> Self {
        let mut portfolio = Self {
            catalog,
            favorites,
            filter: FilterState::new(),
            visible: Vec::new(),
            suggestions: Vec::new(),
            pager: Pager::new(),
            selected: None,
            fragment: String::new(),
            notice: None,
            debounce_deadline: None,
        };
        portfolio.refresh_visible();
        portfolio
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of records passing the current filters, before windowing.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The windowed prefix of the visible set, as catalog indices.
    pub fn window(&self) -> &[usize] {
        let end = min(self.pager.visible_count(), self.visible.len());
        &self.visible[..end]
    }

    /// Record at a grid position within the window.
    pub fn watch_at(&self, position: usize) -> Option<&WatchRecord> {
        self.window()
            .get(position)
            .map(|&index| &self.catalog.records()[index])
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.visible.len())
    }

    pub fn is_loading_more(&self) -> bool {
        self.pager.is_loading()
    }

    pub fn search_term(&self) -> &str {
        &self.filter.search_term
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites_only(&self) -> bool {
        self.filter.favorites_only
    }

    pub fn is_category_active(&self, category: WatchCategory) -> bool {
        self.filter.active_categories.contains(&category)
    }

    /// The record the modal is showing, if any.
    pub fn selected_watch(&self) -> Option<&WatchRecord> {
        self.selected.and_then(|id| self.catalog.by_id(id))
    }

    /// Current fragment; empty means no modal open.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replace the raw search term. Suggestions recompute immediately; the
    /// filter itself waits for the quiet interval, re-armed on every edit.
    pub fn set_search_text(&mut self, text: &str, now: Instant) {
        self.filter.search_term = text.to_string();
        self.suggestions = suggest_names(self.catalog.records(), &self.filter.search_term);
        self.debounce_deadline = Some(now + DEBOUNCE_INTERVAL);
    }

    /// Adopt a suggestion as the search term and drop the suggestion list.
    pub fn accept_suggestion(&mut self, position: usize, now: Instant) {
        let Some(name) = self.suggestions.get(position).cloned() else {
            return;
        };
        self.filter.search_term = name;
        self.suggestions.clear();
        self.debounce_deadline = Some(now + DEBOUNCE_INTERVAL);
    }

    /// Exclusive category selection: picking a category replaces the active
    /// set, picking the active one again clears it back to "all".
    pub fn toggle_category(&mut self, category: WatchCategory) {
        let was_active = self.filter.active_categories.contains(&category);
        self.filter.active_categories.clear();
        if !was_active {
            self.filter.active_categories.insert(category);
        }
        self.refresh_visible();
        self.pager.reset();
    }

    /// The "All" button: drop any category restriction.
    pub fn clear_categories(&mut self) {
        if self.filter.active_categories.is_empty() {
            return;
        }
        self.filter.active_categories.clear();
        self.refresh_visible();
        self.pager.reset();
    }

    pub fn toggle_favorites_only(&mut self) {
        self.filter.favorites_only = !self.filter.favorites_only;
        self.refresh_visible();
        self.pager.reset();
    }

    /// Flip a favorite and raise the matching notice. The favorite set feeds
    /// the filter, so the visible set refreshes, but the grid window is left
    /// alone: favoriting a card is not a filter-control change.
    pub fn toggle_favorite(&mut self, id: i64, now: Instant) {
        let message = match self.favorites.toggle(id) {
            FavoriteChange::Added => "Added to favorites!",
            FavoriteChange::Removed => "Removed from favorites.",
        };
        self.notify(message, NoticeKind::Info, now);
        self.refresh_visible();
    }

    /// Open a record in the modal by writing its fragment. Everything flows
    /// through `apply_fragment` so the fragment and the selection can never
    /// disagree.
    pub fn select_watch(&mut self, id: i64) {
        self.apply_fragment(&fragment_for(id));
    }

    /// Close the modal and clear the fragment.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.fragment.clear();
    }

    /// Two-way binding from a fragment string. A known id selects it; a
    /// malformed or unknown fragment degrades to "no modal open" with the
    /// fragment reset, never an error.
    pub fn apply_fragment(&mut self, fragment: &str) {
        if fragment.is_empty() {
            self.clear_selection();
            return;
        }

        match parse_fragment(fragment) {
            Some(id) if self.catalog.contains_id(id) => {
                self.selected = Some(id);
                self.fragment = fragment.to_string();
            }
            _ => {
                log::warn!("ignoring deep link {fragment:?}: unknown or malformed id");
                self.clear_selection();
            }
        }
    }

    /// Ask for another page of the grid. Returns whether a load started.
    pub fn request_more(&mut self, now: Instant) -> bool {
        self.pager.request_more(self.visible.len(), now)
    }

    /// Share the record open in the modal. Prefers the native capability;
    /// falls back to copying the link, which is the only step whose failure
    /// the user hears about. Native-share refusal (for instance the user
    /// dismissing a share sheet) is expected and stays silent.
    pub fn share_selected(&mut self, sink: &mut dyn ShareSink, now: Instant) {
        let request = match self.selected_watch() {
            Some(watch) => ShareRequest::for_watch(watch),
            None => return,
        };

        match sink.native_share(&request) {
            ShareDisposition::Handled => {}
            ShareDisposition::Unavailable => match sink.copy_to_clipboard(&request.url) {
                Ok(()) => self.notify("Watch link copied!", NoticeKind::Info, now),
                Err(err) => {
                    log::warn!("clipboard copy failed: {err:#}");
                    self.notify("Could not copy the link.", NoticeKind::Error, now);
                }
            },
        }
    }

    /// Resolve every due deadline: debounce settling, pending grid loads,
    /// and notice dismissal. Returns whether anything observable changed so
    /// the caller can skip redraws on quiet ticks.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(deadline) = self.debounce_deadline {
            if now >= deadline {
                self.debounce_deadline = None;
                if self.filter.debounced_term != self.filter.search_term {
                    self.filter.debounced_term = self.filter.search_term.clone();
                    self.refresh_visible();
                    self.pager.reset();
                    changed = true;
                }
            }
        }

        if self.pager.tick(now) {
            changed = true;
        }

        if let Some(notice) = &self.notice {
            if notice.is_expired(now) {
                self.notice = None;
                changed = true;
            }
        }

        changed
    }

    /// Raise a transient notice. Newest wins: any pending notice is replaced
    /// along with its dismissal deadline. Public so the presentation layer
    /// can report its own recoverable failures through the same channel.
    pub fn notify(&mut self, message: &str, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice::new(message, kind, now));
    }

    fn refresh_visible(&mut self) {
        self.visible = derive_visible(self.catalog.records(), self.favorites.ids(), &self.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::state::notify::NOTICE_DURATION;
    use crate::state::pager::{INITIAL_WINDOW, LOAD_LATENCY, WINDOW_INCREMENT};
    use anyhow::anyhow;
    use rusqlite::Connection;
    use std::time::Duration;

    fn memory_store() -> FavoritesStore {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        FavoritesStore::load(conn)
    }

    fn record(id: i64, name: &str, category: WatchCategory) -> WatchRecord {
        WatchRecord {
            id,
            name: name.to_string(),
            category,
            image_url: format!("https://i.imgur.com/watch{id}.jpg"),
            description: format!("Concept piece number {id}."),
            material: None,
            dimensions: None,
            movement: None,
        }
    }

    fn small_portfolio() -> Portfolio {
        let catalog = Catalog::new(vec![
            record(1, "Rolex Conceito X", WatchCategory::ReimaginedClassics),
            record(2, "Aeon Drift", WatchCategory::Vanguard),
            record(3, "Tensegrity One", WatchCategory::Structural),
            record(4, "Helix Vanguard", WatchCategory::Vanguard),
        ]);
        Portfolio::new(catalog, memory_store())
    }

    fn deep_portfolio(total: i64) -> Portfolio {
        let catalog = Catalog::new(
            (1..=total)
                .map(|id| record(id, &format!("Concept {id}"), WatchCategory::Vanguard))
                .collect(),
        );
        Portfolio::new(catalog, memory_store())
    }

    #[test]
    fn keystrokes_within_the_quiet_interval_settle_once() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();

        portfolio.set_search_text("R", t0);
        portfolio.set_search_text("Ro", t0 + Duration::from_millis(100));
        portfolio.set_search_text("Rol", t0 + Duration::from_millis(200));

        // The first keystroke's deadline has passed, but it was re-armed by
        // the later edits: nothing settles yet.
        assert!(!portfolio.tick(t0 + Duration::from_millis(400)));
        assert_eq!(portfolio.visible_len(), 4);

        // Quiet interval after the last edit: exactly one recompute, with
        // the final term.
        assert!(portfolio.tick(t0 + Duration::from_millis(500)));
        assert_eq!(portfolio.visible_len(), 1);
        assert_eq!(portfolio.watch_at(0).unwrap().name, "Rolex Conceito X");

        // Settled state: further ticks change nothing.
        assert!(!portfolio.tick(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn suggestions_track_the_raw_term_without_debounce() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();

        portfolio.set_search_text("va", t0);
        assert_eq!(portfolio.suggestions(), ["Helix Vanguard"]);
        // The filter has not settled yet.
        assert_eq!(portfolio.visible_len(), 4);
    }

    #[test]
    fn accepting_a_suggestion_adopts_the_name_and_clears_the_list() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();

        portfolio.set_search_text("ae", t0);
        assert_eq!(portfolio.suggestions(), ["Aeon Drift"]);

        portfolio.accept_suggestion(0, t0 + Duration::from_millis(50));
        assert_eq!(portfolio.search_term(), "Aeon Drift");
        assert!(portfolio.suggestions().is_empty());

        portfolio.tick(t0 + Duration::from_millis(50) + DEBOUNCE_INTERVAL);
        assert_eq!(portfolio.visible_len(), 1);
    }

    #[test]
    fn category_selection_is_exclusive_and_reclick_clears() {
        let mut portfolio = small_portfolio();

        portfolio.toggle_category(WatchCategory::Vanguard);
        assert!(portfolio.is_category_active(WatchCategory::Vanguard));
        assert_eq!(portfolio.visible_len(), 2);

        portfolio.toggle_category(WatchCategory::Structural);
        assert!(!portfolio.is_category_active(WatchCategory::Vanguard));
        assert!(portfolio.is_category_active(WatchCategory::Structural));
        assert_eq!(portfolio.visible_len(), 1);

        portfolio.toggle_category(WatchCategory::Structural);
        assert!(!portfolio.is_category_active(WatchCategory::Structural));
        assert_eq!(portfolio.visible_len(), 4);
    }

    #[test]
    fn filter_changes_reset_the_grid_window() {
        let t0 = Instant::now();
        let mut portfolio = deep_portfolio(35);
        assert_eq!(portfolio.window().len(), INITIAL_WINDOW);
        assert!(portfolio.has_more());

        assert!(portfolio.request_more(t0));
        portfolio.tick(t0 + LOAD_LATENCY);
        assert_eq!(portfolio.window().len(), INITIAL_WINDOW + WINDOW_INCREMENT);

        portfolio.toggle_category(WatchCategory::Vanguard);
        assert_eq!(portfolio.window().len(), INITIAL_WINDOW);
        assert!(portfolio.has_more());

        // Against a shrunken visible set, has_more recomputes honestly.
        portfolio.toggle_category(WatchCategory::Structural);
        assert_eq!(portfolio.visible_len(), 0);
        assert!(!portfolio.has_more());
    }

    #[test]
    fn favoriting_refreshes_the_view_but_keeps_the_window() {
        let t0 = Instant::now();
        let mut portfolio = deep_portfolio(35);
        portfolio.request_more(t0);
        portfolio.tick(t0 + LOAD_LATENCY);

        portfolio.toggle_favorite(1, t0 + LOAD_LATENCY);
        assert_eq!(portfolio.window().len(), INITIAL_WINDOW + WINDOW_INCREMENT);

        portfolio.toggle_favorites_only();
        assert_eq!(portfolio.visible_len(), 1);
        assert_eq!(portfolio.window().len(), 1);

        // Unfavoriting while the favorites view is active empties it.
        portfolio.toggle_favorite(1, t0 + LOAD_LATENCY);
        assert_eq!(portfolio.visible_len(), 0);
    }

    #[test]
    fn deep_link_round_trip() {
        let mut portfolio = small_portfolio();

        portfolio.apply_fragment("#/watch/3");
        assert_eq!(portfolio.selected_watch().unwrap().id, 3);
        assert_eq!(portfolio.fragment(), "#/watch/3");

        portfolio.apply_fragment("#/watch/9999");
        assert!(portfolio.selected_watch().is_none());
        assert_eq!(portfolio.fragment(), "");

        portfolio.apply_fragment("#/watch/not-a-number");
        assert!(portfolio.selected_watch().is_none());
        assert_eq!(portfolio.fragment(), "");
    }

    #[test]
    fn selecting_and_closing_drive_the_fragment() {
        let mut portfolio = small_portfolio();

        portfolio.select_watch(2);
        assert_eq!(portfolio.fragment(), "#/watch/2");
        assert_eq!(portfolio.selected_watch().unwrap().name, "Aeon Drift");

        portfolio.clear_selection();
        assert_eq!(portfolio.fragment(), "");
        assert!(portfolio.selected_watch().is_none());
    }

    #[test]
    fn favorite_notices_replace_and_expire() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();

        portfolio.toggle_favorite(2, t0);
        assert_eq!(portfolio.notice().unwrap().message, "Added to favorites!");

        // A second toggle replaces the pending notice and its deadline.
        let t1 = t0 + Duration::from_secs(1);
        portfolio.toggle_favorite(2, t1);
        assert_eq!(
            portfolio.notice().unwrap().message,
            "Removed from favorites."
        );

        portfolio.tick(t1 + NOTICE_DURATION - Duration::from_millis(1));
        assert!(portfolio.notice().is_some());
        portfolio.tick(t1 + NOTICE_DURATION);
        assert!(portfolio.notice().is_none());
    }

    /// Recording share sink for driving the fallback chain in tests.
    struct FakeSink {
        native_available: bool,
        fail_copy: bool,
        native_offers: usize,
        copied: Vec<String>,
    }

    impl FakeSink {
        fn new(native_available: bool, fail_copy: bool) -> Self {
            Self {
                native_available,
                fail_copy,
                native_offers: 0,
                copied: Vec::new(),
            }
        }
    }

    impl ShareSink for FakeSink {
        fn native_share(&mut self, _request: &ShareRequest) -> ShareDisposition {
            self.native_offers += 1;
            if self.native_available {
                ShareDisposition::Handled
            } else {
                ShareDisposition::Unavailable
            }
        }

        fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
            if self.fail_copy {
                return Err(anyhow!("clipboard unavailable"));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn share_prefers_the_native_capability() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();
        portfolio.select_watch(3);

        let mut sink = FakeSink::new(true, false);
        portfolio.share_selected(&mut sink, t0);
        assert_eq!(sink.native_offers, 1);
        assert!(sink.copied.is_empty());
        assert!(portfolio.notice().is_none());
    }

    #[test]
    fn share_falls_back_to_the_clipboard() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();
        portfolio.select_watch(3);

        let mut sink = FakeSink::new(false, false);
        portfolio.share_selected(&mut sink, t0);
        assert_eq!(sink.copied.len(), 1);
        assert!(sink.copied[0].ends_with("#/watch/3"));
        let notice = portfolio.notice().unwrap();
        assert_eq!(notice.message, "Watch link copied!");
        assert_eq!(notice.kind, NoticeKind::Info);
    }

    #[test]
    fn clipboard_failure_surfaces_a_distinct_notice() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();
        portfolio.select_watch(3);

        let mut sink = FakeSink::new(false, true);
        portfolio.share_selected(&mut sink, t0);
        let notice = portfolio.notice().unwrap();
        assert_eq!(notice.message, "Could not copy the link.");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn share_without_a_selection_is_a_no_op() {
        let t0 = Instant::now();
        let mut portfolio = small_portfolio();

        let mut sink = FakeSink::new(false, false);
        portfolio.share_selected(&mut sink, t0);
        assert_eq!(sink.native_offers, 0);
        assert!(portfolio.notice().is_none());
    }
}
