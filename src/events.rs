// 🎲 Random Life Events - windfalls and shocks applied to savings
// A shortfall that empties savings is carried over into liabilities

use rand::Rng;
use serde::Serialize;

// ============================================================================
// EVENT TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RandomEvent {
    pub title: &'static str,
    pub message: &'static str,
    /// Signed change applied to savings
    pub delta: i64,
}

pub const RANDOM_EVENTS: [RandomEvent; 5] = [
    RandomEvent {
        title: "Unexpected Expense",
        message: "A sudden car repair costs you KES 10,000.",
        delta: -10_000,
    },
    RandomEvent {
        title: "Bonus Received",
        message: "You received a bonus at work worth KES 50,000!",
        delta: 50_000,
    },
    RandomEvent {
        title: "Investment Gain",
        message: "Your stock investment grew by KES 20,000.",
        delta: 20_000,
    },
    RandomEvent {
        title: "Medical Bill",
        message: "A medical emergency costs KES 30,000.",
        delta: -30_000,
    },
    RandomEvent {
        title: "Freelance Gig",
        message: "You earned KES 15,000 from a freelance project.",
        delta: 15_000,
    },
];

/// Uniform pick from the event table
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static RandomEvent {
    &RANDOM_EVENTS[rng.gen_range(0..RANDOM_EVENTS.len())]
}

// ============================================================================
// APPLYING A DELTA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub savings: i64,
    pub liabilities: i64,
}

/// Add `delta` to savings. If savings would go negative the shortfall moves
/// to liabilities and savings stops at zero.
pub fn apply_delta(savings: i64, liabilities: i64, delta: i64) -> Adjustment {
    let new_savings = savings.saturating_add(delta);

    if new_savings < 0 {
        Adjustment {
            savings: 0,
            liabilities: liabilities.saturating_add(new_savings.saturating_abs()),
        }
    } else {
        Adjustment {
            savings: new_savings,
            liabilities,
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    pub event: RandomEvent,
    pub before: Adjustment,
    pub after: Adjustment,
}

impl EventOutcome {
    pub fn new(event: &RandomEvent, savings: i64, liabilities: i64) -> Self {
        EventOutcome {
            event: *event,
            before: Adjustment {
                savings,
                liabilities,
            },
            after: apply_delta(savings, liabilities, event.delta),
        }
    }

    pub fn is_setback(&self) -> bool {
        self.event.delta < 0
    }

    pub fn impact_message(&self, currency: &str) -> String {
        format!(
            "Event: {}\nImpact: {}\n\nAdjustments:\nSavings: {cur} {} -> {cur} {}\nLiabilities: {cur} {} -> {cur} {}",
            self.event.title,
            self.event.message,
            self.before.savings,
            self.after.savings,
            self.before.liabilities,
            self.after.liabilities,
            cur = currency,
        )
    }

    pub fn suggestion(&self) -> &'static str {
        if self.is_setback() {
            "Consider revising your budget or finding ways to increase income."
        } else {
            "Good job managing the impact. Continue to monitor your finances."
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
