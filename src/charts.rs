// 📊 Chart Model - what the proportion and magnitude panels display
// Drawing lives in the UI; this module only decides the numbers

use crate::inputs::{Field, FinancialInputs};
use serde::Serialize;
use thiserror::Error;

pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum ChartError {
    #[error("division by zero in coverage computation: expenses are 0")]
    ZeroExpenses,

    #[error("{0} is negative and cannot be shown as a share")]
    NegativeValue(Field),

    #[error("all values are zero, nothing to plot")]
    EmptyTotal,
}

/// Months of expenses the savings would cover: savings / (expenses / 12)
pub fn coverage_months(savings: i64, expenses: i64) -> Result<f64, ChartError> {
    if expenses == 0 {
        return Err(ChartError::ZeroExpenses);
    }
    Ok(savings as f64 / (expenses as f64 / MONTHS_PER_YEAR))
}

/// Series colour as RGB, shared by every panel
pub fn field_color(field: Field) -> (u8, u8, u8) {
    match field {
        Field::Income => (0x4C, 0xAF, 0x50),
        Field::Expenses => (0xFF, 0xC1, 0x07),
        Field::Savings => (0x21, 0x96, 0xF3),
        Field::Liabilities => (0xF4, 0x43, 0x36),
    }
}

pub const COVERAGE_COLOR: (u8, u8, u8) = (0xFF, 0x57, 0x22);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub field: Field,
    pub value: i64,
    /// 0.0 ..= 100.0
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub field: Field,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartData {
    pub inputs: FinancialInputs,
}

impl ChartData {
    pub fn new(inputs: FinancialInputs) -> Self {
        ChartData { inputs }
    }

    /// Share of each field in the sum of all four
    pub fn proportions(&self) -> Result<Vec<Slice>, ChartError> {
        if let Some(field) = Field::ALL.iter().find(|f| self.inputs.get(**f) < 0) {
            return Err(ChartError::NegativeValue(*field));
        }

        let total: f64 = self.inputs.values().iter().map(|v| *v as f64).sum();
        if total == 0.0 {
            return Err(ChartError::EmptyTotal);
        }

        Ok(Field::ALL
            .iter()
            .map(|field| {
                let value = self.inputs.get(*field);
                Slice {
                    field: *field,
                    value,
                    percent: value as f64 / total * 100.0,
                }
            })
            .collect())
    }

    pub fn bars(&self) -> Vec<Bar> {
        Field::ALL
            .iter()
            .map(|field| Bar {
                field: *field,
                value: self.inputs.get(*field),
            })
            .collect()
    }

    pub fn coverage_months(&self) -> Result<f64, ChartError> {
        coverage_months(self.inputs.savings, self.inputs.expenses)
    }
}
