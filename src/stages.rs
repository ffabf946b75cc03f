// 🪜 Stages of Financial Independence - ordered classification rules
// First matching rule wins; the order of CLASSIFICATION_RULES is the classifier

use crate::inputs::FinancialInputs;
use serde::{Deserialize, Serialize};

/// Savings target expressed as a multiple of expenses
pub const CRITICAL_MASS_MULTIPLIER: i128 = 300;

// ============================================================================
// STAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Dependence = 0,
    Solvency = 1,
    Stability = 2,
    DebtFreedom = 3,
    Security = 4,
    Independence = 5,
    Freedom = 6,
    Abundance = 7,
}

impl Stage {
    /// All stages, least to most mature
    pub const ALL: [Stage; 8] = [
        Stage::Dependence,
        Stage::Solvency,
        Stage::Stability,
        Stage::DebtFreedom,
        Stage::Security,
        Stage::Independence,
        Stage::Freedom,
        Stage::Abundance,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Stage::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Dependence => "Total Financial Dependence",
            Stage::Solvency => "Financial Solvency",
            Stage::Stability => "Financial Stability",
            Stage::DebtFreedom => "Debt Freedom",
            Stage::Security => "Financial Security",
            Stage::Independence => "Financial Independence",
            Stage::Freedom => "Financial Freedom",
            Stage::Abundance => "Financial Abundance",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Dependence => "Relying entirely on others for financial support.",
            Stage::Solvency => "Able to pay all bills on time but has no savings or investments.",
            Stage::Stability => "Building an emergency fund and beginning to save and invest.",
            Stage::DebtFreedom => "Completely debt-free, including consumer and mortgage debts.",
            Stage::Security => "Investment income covers basic living expenses.",
            Stage::Independence => "Investment income covers current lifestyle expenses.",
            Stage::Freedom => {
                "Investment income allows for luxury spending and fulfilling big dreams."
            }
            Stage::Abundance => {
                "Investment income far exceeds spending needs; focus is on legacy and giving back."
            }
        }
    }

    /// Progress bar value: each stage is worth 12.5%
    pub fn progress_percent(&self) -> f64 {
        (self.index() + 1) as f64 * 12.5
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DERIVED FIGURES
// ============================================================================

pub fn net_worth(savings: i64, liabilities: i64) -> i128 {
    savings as i128 - liabilities as i128
}

pub fn critical_mass(expenses: i64) -> i128 {
    expenses as i128 * CRITICAL_MASS_MULTIPLIER
}

// ============================================================================
// CLASSIFICATION RULES
// ============================================================================

/// Everything a rule may look at, widened so no input can overflow
#[derive(Debug, Clone, Copy)]
struct Facts {
    income: i128,
    expenses: i128,
    liabilities: i128,
    net_worth: i128,
}

struct StageRule {
    stage: Stage,
    applies: fn(&Facts) -> bool,
}

// Evaluated top to bottom. Debt Freedom sits above the income-ratio bands.
const CLASSIFICATION_RULES: [StageRule; 7] = [
    StageRule {
        stage: Stage::Abundance,
        applies: |f| f.net_worth >= 150_000_000,
    },
    StageRule {
        stage: Stage::Freedom,
        applies: |f| f.net_worth >= 30_000_000,
    },
    StageRule {
        stage: Stage::Independence,
        applies: |f| f.net_worth >= 15_000_000,
    },
    StageRule {
        stage: Stage::Security,
        applies: |f| f.net_worth >= 7_500_000,
    },
    StageRule {
        stage: Stage::DebtFreedom,
        applies: |f| f.liabilities == 0,
    },
    // expenses <= income * 0.5
    StageRule {
        stage: Stage::Stability,
        applies: |f| f.income >= 120_000 && f.expenses * 2 <= f.income,
    },
    // expenses <= income * 0.7
    StageRule {
        stage: Stage::Solvency,
        applies: |f| f.income >= 60_000 && f.expenses * 10 <= f.income * 7,
    },
];

/// Map the four inputs to a stage. Never fails.
pub fn classify(income: i64, expenses: i64, savings: i64, liabilities: i64) -> Stage {
    let facts = Facts {
        income: income as i128,
        expenses: expenses as i128,
        liabilities: liabilities as i128,
        net_worth: net_worth(savings, liabilities),
    };

    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.applies)(&facts))
        .map(|rule| rule.stage)
        .unwrap_or(Stage::Dependence)
}

pub fn classify_inputs(inputs: &FinancialInputs) -> Stage {
    classify(
        inputs.income,
        inputs.expenses,
        inputs.savings,
        inputs.liabilities,
    )
}

impl FinancialInputs {
    pub fn stage(&self) -> Stage {
        classify_inputs(self)
    }

    pub fn net_worth(&self) -> i128 {
        net_worth(self.savings, self.liabilities)
    }

    pub fn critical_mass(&self) -> i128 {
        critical_mass(self.expenses)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_all_zero_is_debt_free() {
        // No liabilities and no net-worth band: rule 5 applies
        assert_eq!(classify(0, 0, 0, 0), Stage::DebtFreedom);
    }

    #[test]
    fn test_dependence_when_nothing_applies() {
        assert_eq!(classify(0, 0, 0, 1), Stage::Dependence);
        assert_eq!(classify(50_000, 40_000, 1_000, 500), Stage::Dependence);
    }

    #[test]
    fn test_debt_freedom_before_stability() {
        assert_eq!(classify(130_000, 50_000, 0, 0), Stage::DebtFreedom);
        // Same income profile with a liability falls through to Stability
        assert_eq!(classify(130_000, 50_000, 0, 1), Stage::Stability);
    }

    #[test]
    fn test_net_worth_band_beats_lower_rules() {
        assert_eq!(classify(0, 0, 8_000_000, 0), Stage::Security);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(classify(0, 0, 150_000_000, 0), Stage::Abundance);
        assert_eq!(classify(0, 0, 149_999_999, 0), Stage::Freedom);
        assert_eq!(classify(0, 0, 30_000_000, 0), Stage::Freedom);
        assert_eq!(classify(0, 0, 15_000_000, 0), Stage::Independence);
        assert_eq!(classify(0, 0, 7_500_000, 1), Stage::Dependence);
        assert_eq!(classify(0, 0, 7_500_001, 1), Stage::Security);
    }

    #[test]
    fn test_liabilities_reduce_net_worth() {
        assert_eq!(classify(0, 0, 40_000_000, 20_000_000), Stage::Independence);
    }

    #[test]
    fn test_stability_ratio_edge() {
        assert_eq!(classify(120_000, 60_000, 0, 1), Stage::Stability);
        // 60_001 > half of income, but within 70%
        assert_eq!(classify(120_000, 60_001, 0, 1), Stage::Solvency);
        assert_eq!(classify(119_999, 10, 0, 1), Stage::Solvency);
    }

    #[test]
    fn test_solvency_ratio_edge() {
        assert_eq!(classify(60_000, 42_000, 0, 1), Stage::Solvency);
        assert_eq!(classify(60_000, 42_001, 0, 1), Stage::Dependence);
        assert_eq!(classify(59_999, 0, 0, 1), Stage::Dependence);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Stage::Dependence.progress_percent(), 12.5);
        assert_eq!(Stage::DebtFreedom.progress_percent(), 50.0);
        assert_eq!(Stage::Abundance.progress_percent(), 100.0);
    }

    #[test]
    fn test_stage_table_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(Stage::from_index(i), Some(*stage));
        }
        assert_eq!(Stage::from_index(8), None);
        assert_eq!(Stage::Abundance.name(), "Financial Abundance");
    }

    #[test]
    fn test_derived_figures() {
        let inputs = FinancialInputs::new(100_000, 40_000, 500_000, 200_000);
        assert_eq!(inputs.net_worth(), 300_000);
        assert_eq!(inputs.critical_mass(), 12_000_000);
        assert_eq!(critical_mass(i64::MAX), i64::MAX as i128 * 300);
    }

    proptest! {
        #[test]
        fn prop_net_worth_bands_ignore_income(
            income in any::<i64>(),
            expenses in any::<i64>(),
            savings in 7_500_000i64..1_000_000_000,
        ) {
            let stage = classify(income, expenses, savings, 0);
            prop_assert!(stage >= Stage::Security);
        }

        #[test]
        fn prop_zero_liabilities_never_below_debt_freedom(
            income in any::<i64>(),
            expenses in any::<i64>(),
            savings in any::<i64>(),
        ) {
            prop_assert!(classify(income, expenses, savings, 0) >= Stage::DebtFreedom);
        }

        #[test]
        fn prop_extreme_inputs_do_not_panic(
            income in any::<i64>(),
            expenses in any::<i64>(),
            savings in any::<i64>(),
            liabilities in any::<i64>(),
        ) {
            let stage = classify(income, expenses, savings, liabilities);
            prop_assert!(stage.progress_percent() <= 100.0);
        }
    }
}
