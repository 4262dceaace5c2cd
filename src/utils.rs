/// Round `value` to `decimals` digits after the decimal point.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round `value` to `digits` significant digits.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits as i32 - 1 - magnitude;
    if decimals >= 0 {
        return round_to(value, decimals as u32);
    }
    // 10^k is exact in f64, 10^-k is not
    let factor = 10f64.powi(-decimals);
    (value / factor).round() * factor
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::utils::{round_significant, round_to};

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.1 + 0.2, 10), 0.3);
        assert_eq!(round_to(2.0000000000000004, 6), 2.0);
        assert_eq!(round_to(-1.23456, 2), -1.23);
        assert_eq!(round_to(1.5, 0), 2.0);
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(123456.0, 3), 123000.0);
        assert_eq!(round_significant(0.00123456, 2), 0.0012);
        assert_eq!(round_significant(-9.876, 2), -9.9);
        assert_eq!(round_significant(0.0, 4), 0.0);
        assert!(round_significant(f64::NAN, 4).is_nan());
    }
}
