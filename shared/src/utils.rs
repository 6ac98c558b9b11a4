// Presentation helpers for numbers that end up in the document templates.
use crate::models::Number;

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn has_fraction(value: f64) -> bool {
    value.fract() != 0.0
}

/// Integer when the value is whole, otherwise the value as is.
pub fn present_exact(value: f64) -> Number {
    if has_fraction(value) {
        Number::Decimal(value)
    } else {
        Number::Integer(value as i64)
    }
}

/// Integer when the value is whole, otherwise rounded to one decimal.
/// `10.04` stays a decimal (`10.0`) because the check runs before rounding.
pub fn present_rounded(value: f64) -> Number {
    if has_fraction(value) {
        Number::Decimal(round_to(value, 1))
    } else {
        Number::Integer(value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_values_become_integers() {
        assert_eq!(present_rounded(10.0), Number::Integer(10));
        assert_eq!(present_exact(1500.0), Number::Integer(1500));
        assert_eq!(present_rounded(-3.0), Number::Integer(-3));
    }

    #[test]
    fn test_fractional_values_round_to_one_decimal() {
        assert_eq!(present_rounded(10.25), Number::Decimal(10.3));
        assert_eq!(present_rounded(10.04), Number::Decimal(10.0));
        assert_eq!(present_rounded(2.35), Number::Decimal(2.4));
        assert_eq!(present_rounded(-1.25), Number::Decimal(-1.3));
    }

    #[test]
    fn test_present_exact_keeps_all_decimals() {
        assert_eq!(present_exact(1234.56), Number::Decimal(1234.56));
    }
}
