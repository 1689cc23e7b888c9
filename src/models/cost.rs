/// Estimated cost of a charging session in dollars.
///
/// Returns `None` unless both inputs and their product are finite and non-negative.
#[must_use]
pub fn estimate_cost(kwh: f64, price_per_kwh: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if !(valid(kwh) && valid(price_per_kwh)) {
        return None;
    }
    let cost = kwh * price_per_kwh;
    cost.is_finite().then_some(cost)
}

/// Parse two form fields and format the estimate to two decimals
#[must_use]
pub fn format_estimate(kwh: &str, price_per_kwh: &str) -> Option<String> {
    let kwh = kwh.trim().parse::<f64>().ok()?;
    let price = price_per_kwh.trim().parse::<f64>().ok()?;
    estimate_cost(kwh, price).map(|cost| format!("{cost:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_cost() {
        assert_eq!(estimate_cost(40.0, 0.5), Some(20.0));
        assert_eq!(estimate_cost(0.0, 0.5), Some(0.0));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(estimate_cost(-1.0, 0.5).is_none());
        assert!(estimate_cost(10.0, f64::NAN).is_none());
        assert!(estimate_cost(f64::INFINITY, 0.5).is_none());
        assert!(estimate_cost(1e200, 1e200).is_none());
    }

    #[test]
    fn test_format_estimate() {
        assert_eq!(format_estimate("12.5", "0.48").as_deref(), Some("6.00"));
        assert_eq!(format_estimate(" 10 ", "0.3").as_deref(), Some("3.00"));
        assert!(format_estimate("", "0.3").is_none());
        assert!(format_estimate("ten", "0.3").is_none());
        assert!(format_estimate("1e200", "1e200").is_none());
    }
}
