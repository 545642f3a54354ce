// Mappers between the shared wire DTOs and domain types
pub mod fee_config_mapper;
pub mod legacy_fee_mapper;
pub mod student_fee_mapper;

use rust_decimal::Decimal;

use crate::domain::error::{FeeError, FeeResult};
use crate::domain::money;

/// Convert a wire amount, rejecting NaN, infinities, negatives and anything
/// above `money::MAX_AMOUNT`
pub fn amount_to_domain(field: &str, value: f64) -> FeeResult<Decimal> {
    let amount = money::from_f64(value).ok_or_else(|| {
        FeeError::InvalidConfiguration(format!(
            "{} must be a finite number in range, got {}",
            field, value
        ))
    })?;
    money::ensure_amount(field, amount)
}
