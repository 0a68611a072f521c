//! The headless view-state core. Everything the portfolio shows is either
//! owned by [`app::Portfolio`] or derived from it by a pure function; the
//! presentation layer only calls the named operations and reads the derived
//! views back. Time never flows in implicitly: every operation that arms or
//! resolves a deadline takes `now` as a parameter, which keeps the debounce,
//! notice, and loading timers testable with a hand-driven clock.

pub mod app;
pub mod filter;
pub mod notify;
pub mod pager;
pub mod router;
pub mod suggest;

pub use app::Portfolio;
pub use filter::{derive_visible, FilterState, DEBOUNCE_INTERVAL};
pub use notify::{Notice, NoticeKind, NOTICE_DURATION};
pub use pager::{Pager, INITIAL_WINDOW, LOAD_LATENCY, WINDOW_INCREMENT};
pub use router::{
    fragment_for, parse_fragment, ShareDisposition, ShareRequest, ShareSink, FRAGMENT_PREFIX,
};
pub use suggest::{suggest_names, MAX_SUGGESTIONS};
