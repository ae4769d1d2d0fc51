//! Reduce line items into the yearly flow series and per-node contributions

use super::data::{Contribution, ContributionType, EstimateBasis, LineItem, YearlyFlow};
use std::collections::{BTreeSet, HashMap};

/// Distinct valid years across the line items, ascending
fn distinct_years(items: &[LineItem]) -> Vec<u32> {
    items
        .iter()
        .filter(|item| {
            if item.year == 0 {
                log::warn!("Skipping line item {} ({}): year 0 is not a valid period", item.node_id, item.label);
                false
            } else {
                true
            }
        })
        .map(|item| item.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Aggregate line items into one flow per year, sorted by year
pub fn aggregate_flows(items: &[LineItem], basis: EstimateBasis) -> Vec<YearlyFlow> {
    let years = distinct_years(items);
    let mut flows: Vec<YearlyFlow> = years.iter().map(|&y| YearlyFlow::new(y, 0.0, 0.0)).collect();
    let index: HashMap<u32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    for item in items {
        let Some(&idx) = index.get(&item.year) else {
            continue;
        };
        let value = item.estimate.resolve(basis);
        match item.contribution_type {
            ContributionType::Benefit => flows[idx].benefits += value,
            ContributionType::Cost => flows[idx].costs += value,
        }
    }

    flows
}

/// Build one contribution per node, aligned with `aggregate_flows` for the same items
///
/// Nodes keep their first-seen order; the first item of a node decides its
/// label and polarity.
pub fn build_contributions(items: &[LineItem], basis: EstimateBasis) -> Vec<Contribution> {
    let years = distinct_years(items);
    let index: HashMap<u32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    let mut contributions: Vec<Contribution> = Vec::new();
    let mut by_node: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let Some(&idx) = index.get(&item.year) else {
            continue;
        };
        let slot = *by_node.entry(item.node_id.as_str()).or_insert_with(|| {
            contributions.push(Contribution::new(
                item.node_id.clone(),
                item.label.clone(),
                item.contribution_type,
                vec![0.0; years.len()],
            ));
            contributions.len() - 1
        });

        let contribution = &mut contributions[slot];
        if contribution.contribution_type != item.contribution_type {
            log::warn!(
                "Line item {} in year {} is a {} but node is a {}; using node polarity",
                item.node_id,
                item.year,
                item.contribution_type.as_str(),
                contribution.contribution_type.as_str()
            );
        }
        contribution.yearly_values[idx] += item.estimate.resolve(basis);
    }

    contributions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::Estimate;
    use approx::assert_relative_eq;

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new("c1", "Licences", ContributionType::Cost, 1, Estimate::new(1200.0, 1000.0, 900.0)),
            LineItem::new("b1", "Time saved", ContributionType::Benefit, 3, Estimate::new(500.0, 800.0, 900.0)),
            LineItem::new("b1", "Time saved", ContributionType::Benefit, 2, Estimate::new(400.0, 600.0, 700.0)),
            LineItem::new("c1", "Licences", ContributionType::Cost, 2, Estimate::point(200.0)),
            LineItem::new("c1", "Licences", ContributionType::Cost, 3, Estimate::point(200.0)),
        ]
    }

    #[test]
    fn test_aggregate_sorts_and_sums() {
        let flows = aggregate_flows(&items(), EstimateBasis::Likely);
        assert_eq!(flows.iter().map(|f| f.year).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_relative_eq!(flows[0].costs, 1000.0);
        assert_relative_eq!(flows[0].benefits, 0.0);
        assert_relative_eq!(flows[1].benefits, 600.0);
        assert_relative_eq!(flows[2].net(), 600.0);
    }

    #[test]
    fn test_contributions_align_with_flows() {
        let items = items();
        let flows = aggregate_flows(&items, EstimateBasis::Pessimistic);
        let contributions = build_contributions(&items, EstimateBasis::Pessimistic);

        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].node_id, "c1");
        assert_eq!(contributions[1].yearly_values, vec![0.0, 400.0, 500.0]);

        // Summing contributions by polarity reproduces the aggregate flows
        for (i, flow) in flows.iter().enumerate() {
            let benefits: f64 = contributions
                .iter()
                .filter(|c| c.contribution_type == ContributionType::Benefit)
                .map(|c| c.value_at(i))
                .sum();
            let costs: f64 = contributions
                .iter()
                .filter(|c| c.contribution_type == ContributionType::Cost)
                .map(|c| c.value_at(i))
                .sum();
            assert_relative_eq!(benefits, flow.benefits);
            assert_relative_eq!(costs, flow.costs);
        }
    }

    #[test]
    fn test_year_zero_skipped() {
        let items = vec![
            LineItem::new("b1", "Bad", ContributionType::Benefit, 0, Estimate::point(10.0)),
            LineItem::new("b2", "Good", ContributionType::Benefit, 1, Estimate::point(5.0)),
        ];
        let flows = aggregate_flows(&items, EstimateBasis::Likely);
        assert_eq!(flows, vec![YearlyFlow::new(1, 5.0, 0.0)]);
        assert_eq!(build_contributions(&items, EstimateBasis::Likely).len(), 1);
    }
}
