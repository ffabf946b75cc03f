// 💡 Financial Tips - one random tip on a repeating timer
//
// The timer is cooperative: the event loop calls `poll` with the elapsed time
// and gets a tip back whenever one is due. The first tip is due at start.

use rand::Rng;
use std::time::Duration;
use tracing::debug;

pub const TIPS: [&str; 6] = [
    "Automate your savings to ensure you always pay yourself first.",
    "Create a budget and track your expenses to avoid overspending.",
    "Invest in low-cost index funds for long-term growth.",
    "Keep an emergency fund with at least 3-6 months of living expenses.",
    "Pay off high-interest debt as soon as possible.",
    "Live below your means to build financial security faster.",
];

pub const DEFAULT_TIP_INTERVAL: Duration = Duration::from_millis(900_000);
pub const DEFAULT_POPUP_DURATION: Duration = Duration::from_millis(5_000);

pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TIPS[rng.gen_range(0..TIPS.len())]
}

#[derive(Debug, Clone)]
pub struct TipTimer {
    interval: Duration,
    next_due: Duration,
    fired: u64,
}

impl TipTimer {
    pub fn new(interval: Duration) -> Self {
        TipTimer {
            interval,
            next_due: Duration::ZERO,
            fired: 0,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns a tip if one is due at `now`. The next tip is scheduled one
    /// interval after this firing, so a stalled loop never produces a burst.
    pub fn poll<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> Option<&'static str> {
        if now < self.next_due {
            return None;
        }

        self.next_due = now + self.interval;
        self.fired += 1;

        let tip = random_tip(rng);
        debug!(fired = self.fired, next_due_ms = self.next_due.as_millis() as u64, "tip due");
        Some(tip)
    }
}

impl Default for TipTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TIP_INTERVAL)
    }
}
