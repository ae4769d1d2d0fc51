//! Cash-flow data structures consumed by the appraisal engine

use crate::error::AppraisalError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggregated benefits and costs for one appraisal period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyFlow {
    /// Period number, starting at 1
    pub year: u32,

    /// Total benefits realized in the period
    pub benefits: f64,

    /// Total costs incurred in the period
    pub costs: f64,
}

impl YearlyFlow {
    pub fn new(year: u32, benefits: f64, costs: f64) -> Self {
        Self { year, benefits, costs }
    }

    /// Undiscounted net flow for the period
    pub fn net(&self) -> f64 {
        self.benefits - self.costs
    }
}

/// Polarity of a line item: which side of the ledger it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Benefit,
    Cost,
}

impl ContributionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionType::Benefit => "benefit",
            ContributionType::Cost => "cost",
        }
    }
}

impl FromStr for ContributionType {
    type Err = AppraisalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" => Ok(ContributionType::Benefit),
            "cost" => Ok(ContributionType::Cost),
            _ => Err(AppraisalError::UnknownContributionType(s.to_string())),
        }
    }
}

/// One line item's share of the aggregate flow series
///
/// `yearly_values` is aligned positionally with the base flow series the
/// contribution belongs to: index 0 is the first period of that series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub node_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    pub yearly_values: Vec<f64>,
}

impl Contribution {
    pub fn new(
        node_id: impl Into<String>,
        label: impl Into<String>,
        contribution_type: ContributionType,
        yearly_values: Vec<f64>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            label: label.into(),
            contribution_type,
            yearly_values,
        }
    }

    /// Contribution value for a period index, zero past the end of the series
    pub fn value_at(&self, index: usize) -> f64 {
        self.yearly_values.get(index).copied().unwrap_or(0.0)
    }
}

/// Which point of a three-point estimate to resolve to a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateBasis {
    Pessimistic,
    #[default]
    Likely,
    Optimistic,
    /// PERT weighted mean: (pessimistic + 4 * likely + optimistic) / 6
    Pert,
}

impl EstimateBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateBasis::Pessimistic => "pessimistic",
            EstimateBasis::Likely => "likely",
            EstimateBasis::Optimistic => "optimistic",
            EstimateBasis::Pert => "pert",
        }
    }
}

impl FromStr for EstimateBasis {
    type Err = AppraisalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pessimistic" => Ok(EstimateBasis::Pessimistic),
            "likely" => Ok(EstimateBasis::Likely),
            "optimistic" => Ok(EstimateBasis::Optimistic),
            "pert" => Ok(EstimateBasis::Pert),
            _ => Err(AppraisalError::UnknownEstimateBasis(s.to_string())),
        }
    }
}

/// Three-point estimate captured for a line item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub pessimistic: f64,
    pub likely: f64,
    pub optimistic: f64,
}

impl Estimate {
    pub fn new(pessimistic: f64, likely: f64, optimistic: f64) -> Self {
        Self { pessimistic, likely, optimistic }
    }

    /// Estimate with the same value at all three points
    pub fn point(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Resolve to a single scalar under the given basis
    pub fn resolve(&self, basis: EstimateBasis) -> f64 {
        match basis {
            EstimateBasis::Pessimistic => self.pessimistic,
            EstimateBasis::Likely => self.likely,
            EstimateBasis::Optimistic => self.optimistic,
            EstimateBasis::Pert => (self.pessimistic + 4.0 * self.likely + self.optimistic) / 6.0,
        }
    }
}

/// A single benefit or cost estimate for one year of the case study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier of the benefit/cost node this item belongs to
    pub node_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    pub year: u32,
    pub estimate: Estimate,
}

impl LineItem {
    pub fn new(
        node_id: impl Into<String>,
        label: impl Into<String>,
        contribution_type: ContributionType,
        year: u32,
        estimate: Estimate,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            label: label.into(),
            contribution_type,
            year,
            estimate,
        }
    }
}
