//! Present value discounting for periodic cash-flow series
//!
//! Convention: the first element of a series is one full period out, so
//! value `i` is discounted by `(1 + rate)^(i + 1)`. There is no "year 0".

/// Discount factor for a zero-based period index
pub fn discount_factor(rate: f64, index: usize) -> f64 {
    1.0 / (1.0 + rate).powi(index as i32 + 1)
}

/// Present value of a periodic series at `rate`
pub fn present_value(values: &[f64], rate: f64) -> f64 {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| v * discount_factor(rate, i))
        .sum()
}

/// NPV of a net cash-flow series (same convention as `present_value`)
pub fn calculate_npv(net_flows: &[f64], rate: f64) -> f64 {
    present_value(net_flows, rate)
}
