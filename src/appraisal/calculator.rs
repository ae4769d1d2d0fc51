//! Headline appraisal metrics for a yearly benefit/cost series

use super::discount::present_value;
use super::irr::calculate_irr;
use super::payback::calculate_payback;
use crate::flows::YearlyFlow;
use serde::{Deserialize, Serialize};

/// Input to a single appraisal run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// One entry per period; need not be sorted
    pub flows: Vec<YearlyFlow>,

    /// Per-period discount rate (e.g., 0.035 for 3.5%)
    pub discount_rate: f64,
}

impl CalculationInput {
    pub fn new(flows: Vec<YearlyFlow>, discount_rate: f64) -> Self {
        Self { flows, discount_rate }
    }
}

/// Investment-appraisal metrics for one flow series
///
/// Per-period vectors are aligned with the input flows sorted by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub npv: f64,

    /// Benefit-cost ratio; 0 when discounted costs are not positive
    pub bcr: f64,

    pub irr: Option<f64>,

    /// Social return on investment; None when discounted costs are not positive
    pub sroi: Option<f64>,

    /// Fractional periods until cumulative net flow is non-negative
    pub payback_period: Option<f64>,

    pub present_value_benefits: f64,
    pub present_value_costs: f64,

    /// Sorted period numbers the per-period vectors refer to
    pub years: Vec<u32>,

    /// Undiscounted benefits minus costs per period
    pub net_by_period: Vec<f64>,
    pub cumulative_net_by_period: Vec<f64>,
}

impl CalculationResult {
    /// Result for an empty flow series
    pub fn empty() -> Self {
        Self {
            npv: 0.0,
            bcr: 0.0,
            irr: None,
            sroi: None,
            payback_period: None,
            present_value_benefits: 0.0,
            present_value_costs: 0.0,
            years: Vec::new(),
            net_by_period: Vec::new(),
            cumulative_net_by_period: Vec::new(),
        }
    }

    /// True when discounted benefits exceed discounted costs
    pub fn is_viable(&self) -> bool {
        self.npv > 0.0
    }
}

/// Run the full appraisal for a flow series and discount rate
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    if input.flows.is_empty() {
        return CalculationResult::empty();
    }

    let mut flows = input.flows.clone();
    flows.sort_by_key(|f| f.year);

    let rate = input.discount_rate;
    let benefits: Vec<f64> = flows.iter().map(|f| f.benefits).collect();
    let costs: Vec<f64> = flows.iter().map(|f| f.costs).collect();

    let present_value_benefits = present_value(&benefits, rate);
    let present_value_costs = present_value(&costs, rate);
    let npv = present_value_benefits - present_value_costs;

    let (bcr, sroi) = if present_value_costs > 0.0 {
        (
            present_value_benefits / present_value_costs,
            Some((present_value_benefits - present_value_costs) / present_value_costs),
        )
    } else {
        (0.0, None)
    };

    let net_by_period: Vec<f64> = flows.iter().map(YearlyFlow::net).collect();
    let cumulative_net_by_period: Vec<f64> = net_by_period
        .iter()
        .scan(0.0, |acc, &net| {
            *acc += net;
            Some(*acc)
        })
        .collect();

    CalculationResult {
        npv,
        bcr,
        irr: calculate_irr(&net_by_period),
        sroi,
        payback_period: calculate_payback(&net_by_period),
        present_value_benefits,
        present_value_costs,
        years: flows.iter().map(|f| f.year).collect(),
        net_by_period,
        cumulative_net_by_period,
    }
}

/// NPV only, for callers that re-run many perturbed series
///
/// Skips the IRR and payback passes; agrees with `calculate(..).npv`.
pub(crate) fn npv_of(flows: &[YearlyFlow], discount_rate: f64) -> f64 {
    let mut sorted = flows.to_vec();
    sorted.sort_by_key(|f| f.year);

    let benefits: Vec<f64> = sorted.iter().map(|f| f.benefits).collect();
    let costs: Vec<f64> = sorted.iter().map(|f| f.costs).collect();
    present_value(&benefits, discount_rate) - present_value(&costs, discount_rate)
}
