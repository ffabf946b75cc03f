// 🔔 Notifications - popups that dismiss themselves
// Times are offsets from application start, advanced by the event loop

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub expires_at: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Notifications { items: Vec::new() }
    }

    /// Show a popup from `now` until `now + duration`
    pub fn push(&mut self, title: &str, message: &str, now: Duration, duration: Duration) {
        self.items.push(Notification {
            title: title.to_string(),
            message: message.to_string(),
            expires_at: now + duration,
        });
    }

    /// Drop everything that has expired at `now`
    pub fn prune(&mut self, now: Duration) {
        self.items.retain(|n| n.expires_at > now);
    }

    /// Oldest first
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_expires_after_duration() {
        let mut n = Notifications::new();
        n.push("Financial Tip", "Save more", Duration::ZERO, Duration::from_millis(5_000));

        n.prune(Duration::from_millis(4_999));
        assert_eq!(n.active().len(), 1);

        n.prune(Duration::from_millis(5_000));
        assert!(n.is_empty());
    }

    #[test]
    fn test_each_popup_has_its_own_deadline() {
        let mut n = Notifications::new();
        let five = Duration::from_millis(5_000);
        n.push("A", "first", Duration::ZERO, five);
        n.push("B", "second", Duration::from_millis(3_000), five);

        n.prune(Duration::from_millis(6_000));
        assert_eq!(n.active().len(), 1);
        assert_eq!(n.active()[0].title, "B");
    }

    #[test]
    fn test_dismiss_all() {
        let mut n = Notifications::new();
        n.push("A", "x", Duration::ZERO, Duration::from_secs(5));
        n.dismiss_all();
        assert!(n.is_empty());
    }
}
