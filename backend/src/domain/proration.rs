//! # Proration Engine
//!
//! Splits a student's total fee into a class's installments with exact-cent
//! accounting:
//!
//! 1. `total = round2(base_fee + extra_total)`
//! 2. `unit = floor2(total / n)`, so `unit * n <= total`
//! 3. every installment gets `unit`; the residual `drift = total - unit * n`
//!    goes entirely to the last installment
//!
//! The amounts always sum to `total` exactly. Both the persisted recompute and
//! the live class projection call [`rebuild_schedule`], so the two read paths
//! can differ only in *when* they were derived, never in *how*.

use rust_decimal::Decimal;

use crate::domain::carry_over::CarryOverPolicy;
use crate::domain::error::{FeeError, FeeResult};
use crate::domain::models::{ClassFeeConfig, FeeInstallment, StudentFeeState};
use crate::domain::money::{floor2, round2, MAX_INSTALLMENTS};

fn overflow(what: &str) -> FeeError {
    FeeError::InvalidConfiguration(format!("Fee {} is too large to compute", what))
}

/// Prorate `base_fee_amount + extra_total` into `num_installments` parts.
/// Inputs are expected to be non-negative; a count of 0 is treated as 1.
///
/// Fails with `InvalidConfiguration` when the total overflows or the count is
/// above [`MAX_INSTALLMENTS`], which can only happen with a hand-edited
/// document.
pub fn prorate(
    base_fee_amount: Decimal,
    extra_total: Decimal,
    num_installments: u32,
    installment_dates: &[String],
) -> FeeResult<Vec<FeeInstallment>> {
    if num_installments > MAX_INSTALLMENTS {
        return Err(FeeError::InvalidConfiguration(format!(
            "Number of installments cannot exceed {}: {}",
            MAX_INSTALLMENTS, num_installments
        )));
    }

    let total = round2(
        base_fee_amount
            .checked_add(extra_total)
            .ok_or_else(|| overflow("total"))?,
    );
    let count = num_installments.max(1);
    let unit = floor2(
        total
            .checked_div(Decimal::from(count))
            .ok_or_else(|| overflow("installment"))?,
    );

    let mut installments: Vec<FeeInstallment> = (0..count)
        .map(|i| {
            let due_date = installment_dates
                .get(i as usize)
                .cloned()
                .unwrap_or_default();
            FeeInstallment::new(i + 1, unit, due_date)
        })
        .collect();

    let scheduled = unit
        .checked_mul(Decimal::from(count))
        .ok_or_else(|| overflow("schedule"))?;
    let drift = round2(
        total
            .checked_sub(scheduled)
            .ok_or_else(|| overflow("drift"))?,
    );
    if let Some(last) = installments.last_mut() {
        last.amount = round2(unit.checked_add(drift).ok_or_else(|| overflow("drift"))?);
    }

    Ok(installments)
}

/// Fresh schedule for `state` under `config`, with payment flags carried from
/// the state's current installments. No config means no schedule.
pub fn rebuild_schedule(
    config: Option<&ClassFeeConfig>,
    state: &StudentFeeState,
    policy: &dyn CarryOverPolicy,
) -> FeeResult<Vec<FeeInstallment>> {
    let Some(config) = config else {
        return Ok(Vec::new());
    };

    let extra_total = state.extra_total().ok_or_else(|| overflow("extras"))?;
    let mut installments = prorate(
        config.base_fee_amount,
        extra_total,
        config.num_installments,
        &config.installment_dates,
    )?;
    policy.carry_over(&state.installments, &mut installments);
    Ok(installments)
}
