//! Transient user-facing notices with auto-dismiss. Only one notice is ever
//! pending: pushing a new one replaces the old together with its dismissal
//! deadline, so rapid toggles behave as last-write-wins.

use std::time::{Duration, Instant};

/// How long a notice stays on screen before it dismisses itself.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Severity of a notice. The front end decides how each level is rendered;
/// the core only picks which one a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One transient message plus the instant it should disappear.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + NOTICE_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_its_duration() {
        let t0 = Instant::now();
        let notice = Notice::new("Added to favorites!", NoticeKind::Info, t0);
        assert!(!notice.is_expired(t0));
        assert!(!notice.is_expired(t0 + NOTICE_DURATION - Duration::from_millis(1)));
        assert!(notice.is_expired(t0 + NOTICE_DURATION));
    }
}
