//! Benefit Realization - Investment-appraisal engine for benefit realization case studies
//!
//! This library provides:
//! - Present value and NPV of yearly benefit/cost series
//! - Benefit-cost ratio, SROI, IRR and payback period
//! - One-at-a-time NPV sensitivity ranked for tornado charts
//! - Three-point estimate resolution and line-item aggregation
//! - Pessimistic/likely/optimistic scenario comparison

pub mod error;
pub mod flows;
pub mod appraisal;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{AppraisalError, AppraisalResult};
pub use flows::{Contribution, ContributionType, Estimate, EstimateBasis, LineItem, YearlyFlow};
pub use appraisal::{
    calculate, calculate_irr, calculate_npv, calculate_payback, present_value, sensitivity_analysis,
    CalculationInput, CalculationResult, SensitivityItem,
};
pub use scenario::{ScenarioComparison, ScenarioRunner};
pub use report::AppraisalReport;
