//! Scenario runner for comparing estimate bases on one case study
//!
//! Holds the line items once, then resolves and appraises them under any
//! estimate basis or discount rate without re-reading the source data.

use crate::appraisal::{calculate, sensitivity_analysis, CalculationInput, CalculationResult, SensitivityItem};
use crate::flows::{aggregate_flows, build_contributions, EstimateBasis, LineItem, YearlyFlow};
use serde::{Deserialize, Serialize};

/// Headline results under each point of the three-point estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub pessimistic: CalculationResult,
    pub likely: CalculationResult,
    pub optimistic: CalculationResult,
}

impl ScenarioComparison {
    /// (pessimistic, likely, optimistic) NPV triple
    pub fn npv_range(&self) -> (f64, f64, f64) {
        (self.pessimistic.npv, self.likely.npv, self.optimistic.npv)
    }
}

/// Pre-loaded scenario runner for one case study
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_line_items("items.csv")?, 0.035);
/// let comparison = runner.compare();
/// let tornado = runner.sensitivity(EstimateBasis::Likely, 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    line_items: Vec<LineItem>,
    discount_rate: f64,
}

impl ScenarioRunner {
    pub fn new(line_items: Vec<LineItem>, discount_rate: f64) -> Self {
        Self { line_items, discount_rate }
    }

    /// Aggregate flow series under the given basis
    pub fn flows(&self, basis: EstimateBasis) -> Vec<YearlyFlow> {
        aggregate_flows(&self.line_items, basis)
    }

    /// Appraise the case study under one estimate basis
    pub fn run(&self, basis: EstimateBasis) -> CalculationResult {
        calculate(&CalculationInput::new(self.flows(basis), self.discount_rate))
    }

    /// Appraise under pessimistic, likely and optimistic estimates
    pub fn compare(&self) -> ScenarioComparison {
        ScenarioComparison {
            pessimistic: self.run(EstimateBasis::Pessimistic),
            likely: self.run(EstimateBasis::Likely),
            optimistic: self.run(EstimateBasis::Optimistic),
        }
    }

    /// Tornado ranking of line-item nodes under one estimate basis
    pub fn sensitivity(&self, basis: EstimateBasis, variation_fraction: f64) -> Vec<SensitivityItem> {
        let flows = self.flows(basis);
        let contributions = build_contributions(&self.line_items, basis);
        sensitivity_analysis(&flows, self.discount_rate, &contributions, variation_fraction)
    }

    /// NPV of the likely case at each discount rate
    pub fn npv_profile(&self, rates: &[f64]) -> Vec<(f64, f64)> {
        let flows = self.flows(EstimateBasis::Likely);
        rates
            .iter()
            .map(|&rate| (rate, calculate(&CalculationInput::new(flows.clone(), rate)).npv))
            .collect()
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{ContributionType, Estimate};
    use approx::assert_abs_diff_eq;

    fn runner() -> ScenarioRunner {
        let items = vec![
            LineItem::new("c1", "Implementation", ContributionType::Cost, 1, Estimate::new(1200.0, 1000.0, 900.0)),
            LineItem::new("c2", "Support", ContributionType::Cost, 2, Estimate::new(250.0, 200.0, 180.0)),
            LineItem::new("c2", "Support", ContributionType::Cost, 3, Estimate::new(250.0, 200.0, 180.0)),
            LineItem::new("b1", "Time saved", ContributionType::Benefit, 2, Estimate::new(400.0, 600.0, 700.0)),
            LineItem::new("b1", "Time saved", ContributionType::Benefit, 3, Estimate::new(600.0, 800.0, 950.0)),
        ];
        ScenarioRunner::new(items, 0.05)
    }

    #[test]
    fn test_compare_orders_npv() {
        let (low, mid, high) = runner().compare().npv_range();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_run_matches_direct_calculation() {
        let runner = runner();
        let flows = vec![
            YearlyFlow::new(1, 0.0, 1000.0),
            YearlyFlow::new(2, 600.0, 200.0),
            YearlyFlow::new(3, 800.0, 200.0),
        ];
        let direct = calculate(&CalculationInput::new(flows, 0.05));
        assert_eq!(runner.run(EstimateBasis::Likely), direct);
    }

    #[test]
    fn test_sensitivity_covers_each_node() {
        let items = runner().sensitivity(EstimateBasis::Likely, 0.2);
        assert_eq!(items.len(), 3);
        assert!(items.windows(2).all(|w| w[0].spread >= w[1].spread));
        let npv = runner().run(EstimateBasis::Likely).npv;
        assert!(items.iter().all(|i| (i.npv_base - npv).abs() < 1e-9));
    }

    #[test]
    fn test_npv_profile_declines_with_rate() {
        let profile = runner().npv_profile(&[0.0, 0.05, 0.10]);
        assert_eq!(profile.len(), 3);
        // Undiscounted benefits (1400) exactly cover costs (1400)
        assert_abs_diff_eq!(profile[0].1, 0.0, epsilon = 1e-9);
        assert!(profile[0].1 > profile[1].1 && profile[1].1 > profile[2].1);
    }
}
