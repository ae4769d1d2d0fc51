//! One-at-a-time NPV sensitivity for tornado charts
//!
//! Each contribution is flexed down and up by the variation fraction while
//! every other contribution stays at its base value. Contributions are
//! independent, so they are evaluated in parallel.

use super::calculator::npv_of;
use crate::flows::{Contribution, ContributionType, YearlyFlow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// NPV swing attributable to one contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityItem {
    pub label: String,
    pub node_id: String,
    pub npv_low: f64,
    pub npv_base: f64,
    pub npv_high: f64,
    /// |npv_high - npv_low|
    pub spread: f64,
}

/// Copy of the base series with one contribution scaled by `factor`
///
/// Values are applied positionally; periods past either series' end are untouched.
fn flex_flows(base_flows: &[YearlyFlow], contribution: &Contribution, factor: f64) -> Vec<YearlyFlow> {
    base_flows
        .iter()
        .enumerate()
        .map(|(i, flow)| {
            let delta = contribution.value_at(i) * (factor - 1.0);
            match contribution.contribution_type {
                ContributionType::Benefit => YearlyFlow { benefits: flow.benefits + delta, ..*flow },
                ContributionType::Cost => YearlyFlow { costs: flow.costs + delta, ..*flow },
            }
        })
        .collect()
}

/// Rank contributions by the NPV swing of a ±`variation_fraction` change
///
/// # Arguments
/// * `base_flows` - Aggregate flow series the contributions sum into
/// * `discount_rate` - Per-period discount rate
/// * `contributions` - Line-item contributions, values aligned with `base_flows`
/// * `variation_fraction` - Flex applied to each contribution (0.2 = ±20%)
///
/// # Returns
/// Items sorted by `spread` descending; ties keep input order.
pub fn sensitivity_analysis(
    base_flows: &[YearlyFlow],
    discount_rate: f64,
    contributions: &[Contribution],
    variation_fraction: f64,
) -> Vec<SensitivityItem> {
    let npv_base = npv_of(base_flows, discount_rate);
    let low_factor = 1.0 - variation_fraction;
    let high_factor = 1.0 + variation_fraction;

    log::debug!(
        "Sensitivity: {} contributions over {} periods at ±{:.1}%",
        contributions.len(),
        base_flows.len(),
        variation_fraction * 100.0
    );

    let mut items: Vec<SensitivityItem> = contributions
        .par_iter()
        .map(|contribution| {
            let npv_low = npv_of(&flex_flows(base_flows, contribution, low_factor), discount_rate);
            let npv_high = npv_of(&flex_flows(base_flows, contribution, high_factor), discount_rate);

            SensitivityItem {
                label: contribution.label.clone(),
                node_id: contribution.node_id.clone(),
                npv_low,
                npv_base,
                npv_high,
                spread: (npv_high - npv_low).abs(),
            }
        })
        .collect();

    items.sort_by(|a, b| b.spread.total_cmp(&a.spread));
    items
}
