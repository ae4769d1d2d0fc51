//! Serialized appraisal report emitted by the CLI and Lambda handler

use crate::appraisal::{calculate, sensitivity_analysis, CalculationInput, CalculationResult, SensitivityItem};
use crate::flows::{Contribution, YearlyFlow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline metrics plus an optional tornado ranking for one flow series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalReport {
    pub generated_at: DateTime<Utc>,
    pub discount_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_fraction: Option<f64>,
    pub result: CalculationResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensitivity: Vec<SensitivityItem>,
}

impl AppraisalReport {
    /// Appraise `flows`; sensitivity runs only when a variation is given
    pub fn build(
        flows: Vec<YearlyFlow>,
        discount_rate: f64,
        contributions: &[Contribution],
        variation_fraction: Option<f64>,
    ) -> Self {
        let sensitivity = match variation_fraction {
            Some(pct) => sensitivity_analysis(&flows, discount_rate, contributions, pct),
            None => Vec::new(),
        };
        let result = calculate(&CalculationInput::new(flows, discount_rate));

        Self {
            generated_at: Utc::now(),
            discount_rate,
            variation_fraction,
            result,
            sensitivity,
        }
    }
}
