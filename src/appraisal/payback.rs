//! Payback period from nominal net cash flows

/// Fractional number of periods until cumulative net flow turns non-negative
///
/// A non-negative first period pays back instantly (`0`). Otherwise the
/// crossing period `i` (zero-based) is interpolated linearly and reported as
/// `(i - 1) + fraction`. Downstream display logic depends on this offset.
///
/// Returns None if the cumulative flow is still negative at the end of the series.
pub fn calculate_payback(cashflows: &[f64]) -> Option<f64> {
    let first = *cashflows.first()?;
    if first >= 0.0 {
        return Some(0.0);
    }

    let mut cumulative = 0.0;
    for (i, &cf) in cashflows.iter().enumerate() {
        let before = cumulative;
        cumulative += cf;

        if cumulative >= 0.0 {
            let fraction = if cf == 0.0 { 0.0 } else { before.abs() / cf };
            return Some((i as f64 - 1.0) + fraction);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_instant_payback() {
        assert_eq!(calculate_payback(&[500.0, 200.0, 100.0]), Some(0.0));
        assert_eq!(calculate_payback(&[0.0, -10.0]), Some(0.0));
    }

    #[test]
    fn test_never_recovers() {
        assert_eq!(calculate_payback(&[-1000.0, -100.0, -50.0]), None);
        assert_eq!(calculate_payback(&[-1000.0, 400.0, 500.0]), None);
        assert_eq!(calculate_payback(&[]), None);
    }

    #[test]
    fn test_exact_boundary() {
        assert_relative_eq!(calculate_payback(&[-500.0, 500.0, 500.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_interpolated_crossing() {
        // Cumulative: -1000, -600, 0 -> crosses in period index 2
        assert_relative_eq!(calculate_payback(&[-1000.0, 400.0, 600.0, 800.0]).unwrap(), 2.0);
        // Cumulative: -1000, -200, 600 -> 200 of 800 needed in period index 2
        assert_relative_eq!(calculate_payback(&[-1000.0, 800.0, 800.0]).unwrap(), 1.25);
    }
}
