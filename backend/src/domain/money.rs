//! Cent-exact rounding helpers and conversions at the f64 boundary.
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::error::{FeeError, FeeResult};

/// Largest single amount accepted at a write boundary (one trillion)
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest installment count a class may be split into
pub const MAX_INSTALLMENTS: u32 = 120;

/// Round to 2 decimal places, halves away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncate toward negative infinity at 2 decimal places
pub fn floor2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

/// Convert a wire amount to a decimal. `None` for NaN and infinities.
pub fn from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Sum without panicking; `None` on overflow
pub fn checked_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// Reject negative amounts and amounts above [`MAX_AMOUNT`]
pub fn ensure_amount(field: &str, amount: Decimal) -> FeeResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(FeeError::InvalidConfiguration(format!(
            "{} cannot be negative: {}",
            field, amount
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(FeeError::InvalidConfiguration(format!(
            "{} exceeds the maximum of {}: {}",
            field, MAX_AMOUNT, amount
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2() {
        assert_eq!(round2(dec!(1250)), dec!(1250.00));
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
        assert_eq!(round2(dec!(10.004)), dec!(10.00));
        assert_eq!(round2(dec!(99.995)), dec!(100.00));
    }

    #[test]
    fn test_floor2() {
        assert_eq!(floor2(dec!(1250) / dec!(3)), dec!(416.66));
        assert_eq!(floor2(dec!(0.019)), dec!(0.01));
        assert_eq!(floor2(dec!(400)), dec!(400));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(from_f64(1000.5), Some(dec!(1000.5)));
        assert_eq!(from_f64(0.1), Some(dec!(0.1)));
        assert!(from_f64(f64::NAN).is_none());
        assert!(from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum(vec![dec!(200), dec!(50.25)]), Some(dec!(250.25)));
        assert_eq!(checked_sum(Vec::new()), Some(Decimal::ZERO));
        assert_eq!(checked_sum(vec![Decimal::MAX, dec!(1)]), None);
    }

    #[test]
    fn test_ensure_amount() {
        assert_eq!(ensure_amount("base", dec!(0)).unwrap(), dec!(0));
        assert!(ensure_amount("base", Decimal::from(MAX_AMOUNT)).is_ok());
        assert!(matches!(
            ensure_amount("base", dec!(-0.01)),
            Err(FeeError::InvalidConfiguration(_))
        ));
        let err = ensure_amount("transport", dec!(70000000000000000000000000000)).unwrap_err();
        assert!(err.to_string().contains("transport exceeds the maximum"));
    }

    #[test]
    fn test_to_f64() {
        assert!((to_f64(dec!(416.68)) - 416.68).abs() < 1e-9);
        assert_eq!(to_f64(Decimal::ZERO), 0.0);
    }
}
