// 🧭 Planner - conscious spending plan and the hero's journey
// Static guidance shown next to the stage result

use crate::inputs::format_amount;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PercentRange {
    pub min: u8,
    pub max: u8,
}

impl PercentRange {
    /// Recommended amount range for a given income, rounded down
    pub fn of(&self, income: i64) -> (i64, i64) {
        let low = income as i128 * self.min as i128 / 100;
        let high = income as i128 * self.max as i128 / 100;
        (low as i64, high as i64)
    }
}

impl std::fmt::Display for PercentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}%", self.min)
        } else {
            write!(f, "{}-{}%", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendingCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub recommended: Option<PercentRange>,
}

pub const SPENDING_CATEGORIES: [SpendingCategory; 5] = [
    SpendingCategory {
        name: "Needs",
        description: "Essentials like housing, utilities, and food.",
        recommended: Some(PercentRange { min: 50, max: 60 }),
    },
    SpendingCategory {
        name: "Wants",
        description: "Discretionary spending on things like dining out, entertainment, and vacations.",
        recommended: None,
    },
    SpendingCategory {
        name: "Savings",
        description: "Money set aside for future goals and investments.",
        recommended: Some(PercentRange { min: 10, max: 10 }),
    },
    SpendingCategory {
        name: "Investing",
        description: "Money put into investments for growth.",
        recommended: Some(PercentRange { min: 10, max: 10 }),
    },
    SpendingCategory {
        name: "Guilt-Free Spending",
        description: "Extra spending that doesn't affect financial goals.",
        recommended: Some(PercentRange { min: 20, max: 35 }),
    },
];

pub const HERO_JOURNEY_PHASES: [&str; 7] = [
    "The Call to Adventure: Recognize the need for financial change.",
    "Crossing the Threshold: Commit to a budget and financial goals.",
    "Trials and Challenges: Face financial obstacles and setbacks.",
    "Meeting the Mentor: Seek advice and education on personal finance.",
    "Transformation: Implement changes and see progress in financial health.",
    "The Return: Enjoy the benefits of financial stability and independence.",
    "Master of Two Worlds: Balance between financial security and enjoyment of life.",
];

pub fn spending_plan_text() -> String {
    let mut text = String::from("Conscious Spending Plan:\n\n");
    for category in SPENDING_CATEGORIES.iter() {
        let recommended = category
            .recommended
            .map(|r| r.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        text.push_str(&format!(
            "{}: {} (Recommended: {})\n",
            category.name, category.description, recommended
        ));
    }
    text
}

/// One line per category with a recommendation, in currency amounts
pub fn spending_allocation(income: i64, currency: &str) -> Vec<String> {
    SPENDING_CATEGORIES
        .iter()
        .filter_map(|category| {
            let range = category.recommended?;
            let (low, high) = range.of(income);
            Some(if low == high {
                format!("{}: {} {}", category.name, currency, format_amount(low as i128))
            } else {
                format!(
                    "{}: {} {} - {}",
                    category.name,
                    currency,
                    format_amount(low as i128),
                    format_amount(high as i128)
                )
            })
        })
        .collect()
}

pub fn hero_journey_text() -> String {
    let mut text = String::from("Your Hero's Journey:\n\n");
    for phase in HERO_JOURNEY_PHASES.iter() {
        text.push_str(phase);
        text.push('\n');
    }
    text
}
