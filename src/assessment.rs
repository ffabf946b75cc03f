// 🧮 Assessment - everything derived from one submission
// Pure: built from FinancialInputs, rendered by the UI or printed as JSON

use crate::charts::{ChartData, ChartError, Slice};
use crate::inputs::{format_amount, FinancialInputs};
use crate::stages::Stage;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub inputs: FinancialInputs,
    pub stage: Stage,
    pub net_worth: i128,
    pub critical_mass: i128,
    pub chart: ChartData,
}

impl Assessment {
    pub fn new(inputs: FinancialInputs) -> Self {
        Assessment {
            inputs,
            stage: inputs.stage(),
            net_worth: inputs.net_worth(),
            critical_mass: inputs.critical_mass(),
            chart: ChartData::new(inputs),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        self.stage.progress_percent()
    }

    pub fn coverage_months(&self) -> Result<f64, ChartError> {
        self.chart.coverage_months()
    }

    /// "Critical Mass: KES 1,000 - Progress: 50.0% - Net Worth: KES 2,000"
    pub fn progress_caption(&self, currency: &str) -> String {
        format!(
            "Critical Mass: {cur} {} - Progress: {:.1}% - Net Worth: {cur} {}",
            format_amount(self.critical_mass),
            self.progress_percent(),
            format_amount(self.net_worth),
            cur = currency,
        )
    }

    pub fn report(&self) -> AssessmentReport {
        let (coverage_months, coverage_error) = match self.coverage_months() {
            Ok(months) => (Some(months), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let (proportions, proportions_error) = match self.chart.proportions() {
            Ok(slices) => (slices, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        AssessmentReport {
            inputs: self.inputs,
            stage: self.stage,
            stage_index: self.stage.index(),
            stage_name: self.stage.name(),
            description: self.stage.description(),
            net_worth: self.net_worth,
            critical_mass: self.critical_mass,
            progress_percent: self.progress_percent(),
            coverage_months,
            coverage_error,
            proportions,
            proportions_error,
            generated_at: Utc::now(),
        }
    }
}

/// Serializable view of an assessment, used by headless mode
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub inputs: FinancialInputs,
    pub stage: Stage,
    pub stage_index: usize,
    pub stage_name: &'static str,
    pub description: &'static str,
    pub net_worth: i128,
    pub critical_mass: i128,
    pub progress_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_error: Option<String>,
    pub proportions: Vec<Slice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportions_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_figures() {
        let a = Assessment::new(FinancialInputs::new(130_000, 50_000, 0, 0));
        assert_eq!(a.stage, Stage::DebtFreedom);
        assert_eq!(a.net_worth, 0);
        assert_eq!(a.critical_mass, 15_000_000);
        assert_eq!(a.progress_percent(), 50.0);
    }

    #[test]
    fn test_progress_caption() {
        let a = Assessment::new(FinancialInputs::new(0, 10_000, 8_000_000, 0));
        assert_eq!(
            a.progress_caption("KES"),
            "Critical Mass: KES 3,000,000 - Progress: 62.5% - Net Worth: KES 8,000,000"
        );
    }

    #[test]
    fn test_report_carries_coverage_error() {
        let report = Assessment::new(FinancialInputs::new(0, 0, 0, 0)).report();
        assert_eq!(report.coverage_months, None);
        assert!(report
            .coverage_error
            .as_deref()
            .unwrap()
            .contains("division by zero"));
        assert!(report.proportions.is_empty());
        assert!(report.proportions_error.is_some());
    }

    #[test]
    fn test_report_serializes() {
        let report = Assessment::new(FinancialInputs::new(120_000, 60_000, 30_000, 1)).report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stage"], "Stability");
        assert_eq!(json["stage_index"], 2);
        assert_eq!(json["stage_name"], "Financial Stability");
        assert_eq!(json["coverage_months"], 6.0);
        assert_eq!(json["proportions"].as_array().unwrap().len(), 4);
        assert!(json.get("coverage_error").is_none());
    }
}
