use chrono::{DateTime, Duration, Utc};

/// Text shown when an interaction is blocked
pub const PROTECTED_MESSAGE: &str = "Protected content - action not allowed";

/// Default display time of the notification
pub const DEFAULT_DISPLAY_MS: i64 = 2000;

/// Transient notice raised on blocked actions.
///
/// Raising it again while visible restarts the display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    display: Duration,
    visible_until: Option<DateTime<Utc>>,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_DISPLAY_MS))
    }
}

impl Notification {
    pub fn new(display: Duration) -> Self {
        Self {
            message: PROTECTED_MESSAGE.to_string(),
            display,
            visible_until: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn raise(&mut self, now: DateTime<Utc>) {
        self.visible_until = Some(now + self.display);
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    /// Message while visible
    pub fn current(&self, now: DateTime<Utc>) -> Option<&str> {
        self.is_visible(now).then_some(self.message.as_str())
    }

    /// Forget an elapsed notification; true when it was just hidden
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.visible_until.is_some() && !self.is_visible(now) {
            self.visible_until = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.visible_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_visible_for_two_seconds() {
        let mut n = Notification::default();
        assert!(!n.is_visible(t0()));
        n.raise(t0());
        assert_eq!(n.current(t0()), Some(PROTECTED_MESSAGE));
        assert!(n.is_visible(t0() + Duration::milliseconds(1999)));
        assert!(!n.is_visible(t0() + Duration::seconds(2)));
    }

    #[test]
    fn test_raise_again_restarts() {
        let mut n = Notification::default();
        n.raise(t0());
        n.raise(t0() + Duration::seconds(1));
        assert!(n.is_visible(t0() + Duration::milliseconds(2500)));
    }

    #[test]
    fn test_tick_hides_once() {
        let mut n = Notification::new(Duration::milliseconds(500));
        n.raise(t0());
        assert!(!n.tick(t0()));
        assert!(n.tick(t0() + Duration::seconds(1)));
        assert!(!n.tick(t0() + Duration::seconds(2)));
    }

    #[test]
    fn test_dismiss() {
        let mut n = Notification::default();
        n.raise(t0());
        n.dismiss();
        assert_eq!(n.current(t0()), None);
    }
}
