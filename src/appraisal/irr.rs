//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on the NPV function using the same end-of-period
//! convention as `present_value`: `flow[t]` is discounted by `(1 + r)^(t + 1)`.

/// Starting rate for the Newton-Raphson iteration
pub const IRR_INITIAL_GUESS: f64 = 0.10;

/// Maximum Newton-Raphson iterations before giving up
pub const IRR_MAX_ITERATIONS: usize = 100;

/// Convergence tolerance on successive rate estimates
pub const IRR_TOLERANCE: f64 = 1e-7;

/// Derivative magnitude below which the slope is treated as flat
pub const IRR_MIN_DERIVATIVE: f64 = 1e-12;

/// Rate nudge applied when the slope is flat
pub const IRR_FLAT_SLOPE_NUDGE: f64 = 0.05;

/// Working-rate clamp between iterations
pub const IRR_RATE_FLOOR: f64 = -0.99;
pub const IRR_RATE_CEILING: f64 = 10.0;

/// Converged roots outside this range are rejected
pub const IRR_MIN_ACCEPTED: f64 = -1.0;
pub const IRR_MAX_ACCEPTED: f64 = 10.0;

/// Calculate the IRR of a nominal net cash-flow series
///
/// # Arguments
/// * `cashflows` - Net flows, first element one period out (positive = inflow)
///
/// # Returns
/// * `Option<f64>` - Periodic IRR as a decimal (e.g., 0.10 for 10%), or None
///   when the flows never change sign, the root is implausible, or the
///   iteration does not converge
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    // Sign change required for an IRR to exist
    if cashflows.iter().all(|&cf| cf >= 0.0) || cashflows.iter().all(|&cf| cf <= 0.0) {
        return None;
    }

    let mut rate = IRR_INITIAL_GUESS;

    for iteration in 0..IRR_MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < IRR_MIN_DERIVATIVE {
            rate = nudge_flat_slope(rate);
            continue;
        }

        let new_rate = rate - npv / dnpv;

        if (new_rate - rate).abs() < IRR_TOLERANCE {
            if !(IRR_MIN_ACCEPTED..=IRR_MAX_ACCEPTED).contains(&new_rate) {
                log::debug!("IRR converged to implausible rate {new_rate} after {iteration} iterations");
                return None;
            }
            return Some(new_rate);
        }

        rate = new_rate.clamp(IRR_RATE_FLOOR, IRR_RATE_CEILING);
    }

    log::debug!(
        "IRR did not converge within {IRR_MAX_ITERATIONS} iterations ({} periods)",
        cashflows.len()
    );
    None
}

/// Step off a flat slope without leaving the working-rate range
fn nudge_flat_slope(rate: f64) -> f64 {
    (rate + IRR_FLAT_SLOPE_NUDGE).clamp(IRR_RATE_FLOOR, IRR_RATE_CEILING)
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let periods = t as i32 + 1;
        npv += cf / (1.0 + rate).powi(periods);
        dnpv -= periods as f64 * cf / (1.0 + rate).powi(periods + 1);
    }

    (npv, dnpv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appraisal::calculate_npv;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_irr() {
        let irr = calculate_irr(&[-100.0, 110.0]).unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        assert!(calculate_irr(&[]).is_none());
        assert!(calculate_irr(&[0.0, 0.0]).is_none());
        assert!(calculate_irr(&[100.0, 0.0, 50.0]).is_none());
        assert!(calculate_irr(&[-100.0, -10.0, 0.0]).is_none());
    }

    #[test]
    fn test_irr_zeroes_npv() {
        let flows = [-1000.0, 400.0, 600.0, 800.0];
        let irr = calculate_irr(&flows).unwrap();
        assert!(irr > 0.2 && irr < 0.5, "unexpected IRR {irr}");
        assert_abs_diff_eq!(calculate_npv(&flows, irr), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_negative_irr() {
        // Only 90 of 100 comes back
        let irr = calculate_irr(&[-100.0, 50.0, 40.0]).unwrap();
        assert!(irr < 0.0);
        assert_abs_diff_eq!(calculate_npv(&[-100.0, 50.0, 40.0], irr), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_loan_shaped_flows() {
        // Inflow first, repayments after
        let mut flows = vec![10_000.0];
        flows.extend(vec![-900.0; 12]);
        let irr = calculate_irr(&flows).unwrap();
        assert_abs_diff_eq!(calculate_npv(&flows, irr), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_root_above_ceiling_not_found() {
        // Root is 11; the working rate is held at the ceiling and never settles
        assert!(calculate_irr(&[-1.0, 12.0]).is_none());
    }

    #[test]
    fn test_root_near_ceiling_accepted() {
        let irr = calculate_irr(&[-1.0, 10.5]).unwrap();
        assert_abs_diff_eq!(irr, 9.5, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_slope_gives_up() {
        // Magnitudes keep |f'(r)| below the floor, so every step is a nudge
        let flows = [-1e-13, 1.1e-13];
        let (_, dnpv) = npv_and_derivative(&flows, IRR_INITIAL_GUESS);
        assert!(dnpv.abs() < IRR_MIN_DERIVATIVE);
        assert!(calculate_irr(&flows).is_none());
    }

    #[test]
    fn test_nudge_stays_within_clamp() {
        assert_abs_diff_eq!(nudge_flat_slope(IRR_INITIAL_GUESS), 0.15, epsilon = 1e-12);
        assert_eq!(nudge_flat_slope(IRR_RATE_CEILING), IRR_RATE_CEILING);
        assert_eq!(nudge_flat_slope(9.99), IRR_RATE_CEILING);
    }

    #[test]
    fn test_multiple_sign_changes() {
        // Roots at 10% and 20%; the solver settles on the one nearest the initial guess
        let irr = calculate_irr(&[-100.0, 230.0, -132.0]).unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-6);
    }
}
