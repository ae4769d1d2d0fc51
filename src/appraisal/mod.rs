//! Appraisal engine: present value, NPV, BCR, SROI, IRR, payback and sensitivity
//!
//! Every function here is pure. Degenerate inputs produce sentinel results
//! (`0` or `None`), never errors:
//! - empty series: zeroed metrics, `None` for IRR/SROI/payback
//! - no discounted cost: `bcr = 0`, `sroi = None`
//! - no sign change or solver failure: `irr = None`
//! - cumulative flow never recovers: `payback_period = None`

mod discount;
mod irr;
mod payback;
mod calculator;
mod sensitivity;

pub use discount::{calculate_npv, discount_factor, present_value};
pub use irr::{
    calculate_irr, IRR_FLAT_SLOPE_NUDGE, IRR_INITIAL_GUESS, IRR_MAX_ACCEPTED, IRR_MAX_ITERATIONS,
    IRR_MIN_ACCEPTED, IRR_MIN_DERIVATIVE, IRR_RATE_CEILING, IRR_RATE_FLOOR, IRR_TOLERANCE,
};
pub use payback::calculate_payback;
pub use calculator::{calculate, CalculationInput, CalculationResult};
pub use sensitivity::{sensitivity_analysis, SensitivityItem};
