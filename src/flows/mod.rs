//! Cash-flow inputs: yearly flows, contributions, line items and their loaders

mod data;
mod aggregate;
pub mod loader;

pub use data::{Contribution, ContributionType, Estimate, EstimateBasis, LineItem, YearlyFlow};
pub use aggregate::{aggregate_flows, build_contributions};
pub use loader::{load_flows, load_flows_from_reader, load_line_items, load_line_items_from_reader};
