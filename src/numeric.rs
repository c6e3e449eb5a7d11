//! Number formatting and tolerant number parsing shared by the text codecs

/// Decimal places kept by the text writers
pub(crate) const TEXT_DECIMALS: i32 = 6;

/// Round half-to-even to `decimals` places
///
/// Values too large to carry any fractional digits are returned unchanged.
pub(crate) fn round_decimals(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    let rounded = scaled.round_ties_even() / factor;
    // -0.0 prints as "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round to [`TEXT_DECIMALS`] places and render with the shortest exact form
pub(crate) fn format_rounded(value: f64) -> String {
    round_decimals(value, TEXT_DECIMALS).to_string()
}

/// Parse a floating-point literal
///
/// Surrounding whitespace is ignored and `,` group separators are accepted in
/// the integer part (`1,024.5`).
pub(crate) fn parse_float(literal: &str) -> Option<f64> {
    let literal = literal.trim();
    let split = literal
        .find(['.', 'e', 'E'])
        .unwrap_or(literal.len());
    let (integer_part, rest) = literal.split_at(split);
    if integer_part.contains(',') {
        let cleaned: String = integer_part
            .chars()
            .filter(|&c| c != ',')
            .chain(rest.chars())
            .collect();
        cleaned.parse::<f64>().ok()
    } else {
        literal.parse::<f64>().ok()
    }
}

/// Parse a signed integer literal, ignoring surrounding whitespace
pub(crate) fn parse_i32(literal: &str) -> Option<i32> {
    literal.trim().parse::<i32>().ok()
}

/// Parse a non-negative index literal, ignoring surrounding whitespace
pub(crate) fn parse_index(literal: &str) -> Option<usize> {
    literal.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_six_decimals() {
        assert_eq!(round_decimals(1.23456789, 6), 1.234568);
        assert_eq!(round_decimals(-2.0000004, 6), -2.0);
        assert_eq!(round_decimals(0.5, 0), 0.0);
        assert_eq!(round_decimals(1.5, 0), 2.0);
    }

    #[test]
    fn test_round_normalizes_negative_zero() {
        let rounded = round_decimals(-0.0000001, 6);
        assert_eq!(rounded.to_string(), "0");
    }

    #[test]
    fn test_round_keeps_huge_values() {
        assert_eq!(round_decimals(1.0e300, 6), 1.0e300);
        assert!(round_decimals(f64::NAN, 6).is_nan());
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(1.0), "1");
        assert_eq!(format_rounded(0.1234567), "0.123457");
        assert_eq!(format_rounded(-3.5), "-3.5");
        assert_eq!(format_rounded(0.000001), "0.000001");
    }

    #[test]
    fn test_parse_float_variants() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("  -2e3 "), Some(-2000.0));
        assert_eq!(parse_float("1E-06"), Some(0.000001));
        assert_eq!(parse_float("1,024.5"), Some(1024.5));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("1.5,0"), None);
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_i32(" 42 "), Some(42));
        assert_eq!(parse_i32("-1"), Some(-1));
        assert_eq!(parse_i32("1.0"), None);
        assert_eq!(parse_index("7"), Some(7));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("1,000"), None);
    }
}
