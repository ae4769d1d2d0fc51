//! Load yearly flows and line items from CSV exports of the case-study tool

use super::{ContributionType, Estimate, LineItem, YearlyFlow};
use crate::error::{AppraisalError, AppraisalResult};
use csv::Reader;
use std::path::Path;

/// Raw CSV row for a pre-aggregated flow series
#[derive(Debug, serde::Deserialize)]
struct FlowRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Benefits")]
    benefits: f64,
    #[serde(rename = "Costs")]
    costs: f64,
}

/// Raw CSV row for a single benefit/cost estimate
#[derive(Debug, serde::Deserialize)]
struct LineItemRow {
    #[serde(rename = "NodeId")]
    node_id: String,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Type")]
    item_type: String,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Pessimistic")]
    pessimistic: f64,
    #[serde(rename = "Likely")]
    likely: f64,
    #[serde(rename = "Optimistic")]
    optimistic: f64,
}

impl FlowRow {
    fn to_flow(self) -> AppraisalResult<YearlyFlow> {
        if self.year == 0 {
            return Err(AppraisalError::InvalidYear { node_id: "flow".to_string(), year: 0 });
        }
        Ok(YearlyFlow::new(self.year, self.benefits, self.costs))
    }
}

impl LineItemRow {
    fn to_line_item(self) -> AppraisalResult<LineItem> {
        if self.year == 0 {
            return Err(AppraisalError::InvalidYear { node_id: self.node_id, year: 0 });
        }
        let contribution_type: ContributionType = self.item_type.parse()?;

        Ok(LineItem {
            node_id: self.node_id,
            label: self.label,
            contribution_type,
            year: self.year,
            estimate: Estimate::new(self.pessimistic, self.likely, self.optimistic),
        })
    }
}

/// Load a yearly flow series from a CSV file (`Year,Benefits,Costs`)
pub fn load_flows<P: AsRef<Path>>(path: P) -> AppraisalResult<Vec<YearlyFlow>> {
    let file = std::fs::File::open(path)?;
    load_flows_from_reader(file)
}

/// Load a yearly flow series from any reader
pub fn load_flows_from_reader<R: std::io::Read>(reader: R) -> AppraisalResult<Vec<YearlyFlow>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut flows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: FlowRow = result?;
        flows.push(row.to_flow()?);
    }

    log::debug!("Loaded {} yearly flows", flows.len());
    Ok(flows)
}

/// Load line items from a CSV file
/// (`NodeId,Label,Type,Year,Pessimistic,Likely,Optimistic`)
pub fn load_line_items<P: AsRef<Path>>(path: P) -> AppraisalResult<Vec<LineItem>> {
    let file = std::fs::File::open(path)?;
    load_line_items_from_reader(file)
}

/// Load line items from any reader
pub fn load_line_items_from_reader<R: std::io::Read>(reader: R) -> AppraisalResult<Vec<LineItem>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut items = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LineItemRow = result?;
        items.push(row.to_line_item()?);
    }

    log::debug!("Loaded {} line items", items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_flows() {
        let data = "Year,Benefits,Costs\n2,600,200\n1,0,1000\n";
        let flows = load_flows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(flows, vec![YearlyFlow::new(2, 600.0, 200.0), YearlyFlow::new(1, 0.0, 1000.0)]);
    }

    #[test]
    fn test_load_line_items() {
        let data = "NodeId,Label,Type,Year,Pessimistic,Likely,Optimistic\n\
                    b1,Faster onboarding,Benefit,2,100,150,220\n\
                    c1,Licences,cost,1,1000,900,850\n";
        let items = load_line_items_from_reader(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].contribution_type, ContributionType::Benefit);
        assert_eq!(items[0].estimate, Estimate::new(100.0, 150.0, 220.0));
        assert_eq!(items[1].label, "Licences");
    }

    #[test]
    fn test_rejects_bad_rows() {
        let zero_year = "Year,Benefits,Costs\n0,10,10\n";
        assert!(matches!(
            load_flows_from_reader(zero_year.as_bytes()),
            Err(AppraisalError::InvalidYear { year: 0, .. })
        ));

        let bad_type = "NodeId,Label,Type,Year,Pessimistic,Likely,Optimistic\nx,X,risk,1,1,1,1\n";
        assert!(matches!(
            load_line_items_from_reader(bad_type.as_bytes()),
            Err(AppraisalError::UnknownContributionType(_))
        ));

        let bad_number = "Year,Benefits,Costs\n1,abc,10\n";
        assert!(matches!(load_flows_from_reader(bad_number.as_bytes()), Err(AppraisalError::Csv(_))));
    }
}
