// 📝 Financial Inputs - the four numbers typed into the form
// Parsing is per field so the error can say which entry was wrong

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use thiserror::Error;

// ============================================================================
// FIELD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Income,
    Expenses,
    Savings,
    Liabilities,
}

impl Field {
    /// Display order of the form and of every chart
    pub const ALL: [Field; 4] = [
        Field::Income,
        Field::Expenses,
        Field::Savings,
        Field::Liabilities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Income => "Income",
            Field::Expenses => "Expenses",
            Field::Savings => "Savings",
            Field::Liabilities => "Liabilities",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Field::Income => 0,
            Field::Expenses => 1,
            Field::Savings => 2,
            Field::Liabilities => 3,
        }
    }

    pub fn next(&self) -> Self {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field}: '{value}' is not a whole number")]
    NonNumeric { field: Field, value: String },

    #[error("{field}: '{value}' is too large")]
    OutOfRange { field: Field, value: String },
}

impl InputError {
    pub fn field(&self) -> Field {
        match self {
            InputError::NonNumeric { field, .. } | InputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Parse one entry. Surrounding whitespace is ignored, anything else must be
/// an optionally signed integer.
pub fn parse_field(field: Field, text: &str) -> Result<i64, InputError> {
    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => InputError::OutOfRange {
            field,
            value: trimmed.to_string(),
        },
        _ => InputError::NonNumeric {
            field,
            value: trimmed.to_string(),
        },
    })
}

// ============================================================================
// FINANCIAL INPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub income: i64,
    pub expenses: i64,
    pub savings: i64,
    pub liabilities: i64,
}

impl FinancialInputs {
    pub fn new(income: i64, expenses: i64, savings: i64, liabilities: i64) -> Self {
        FinancialInputs {
            income,
            expenses,
            savings,
            liabilities,
        }
    }

    /// Parse the four entries in form order. The first bad field wins.
    pub fn parse(
        income: &str,
        expenses: &str,
        savings: &str,
        liabilities: &str,
    ) -> Result<Self, InputError> {
        Ok(FinancialInputs {
            income: parse_field(Field::Income, income)?,
            expenses: parse_field(Field::Expenses, expenses)?,
            savings: parse_field(Field::Savings, savings)?,
            liabilities: parse_field(Field::Liabilities, liabilities)?,
        })
    }

    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::Income => self.income,
            Field::Expenses => self.expenses,
            Field::Savings => self.savings,
            Field::Liabilities => self.liabilities,
        }
    }

    /// Values in `Field::ALL` order
    pub fn values(&self) -> [i64; 4] {
        [self.income, self.expenses, self.savings, self.liabilities]
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Group digits in thousands: 1234567 -> "1,234,567"
pub fn format_amount(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// ============================================================================
// TESTS
// ============================================================================
