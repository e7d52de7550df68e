//! Rounding of monetary amounts to whole currency units.
//!
//! Every payslip figure is rounded independently with round-half-away-from-zero.
//! The strategy is spelled out here instead of relying on a library default,
//! since `Decimal::round` and friends default to banker's rounding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an amount to the nearest whole unit, with halves going away from zero.
///
/// Fails only when the rounded value does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::round_to_units;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_units(Decimal::from_str("921.88").unwrap()).unwrap(), 922);
/// assert_eq!(round_to_units(Decimal::from_str("2.5").unwrap()).unwrap(), 3);
/// assert_eq!(round_to_units(Decimal::from_str("-2.5").unwrap()).unwrap(), -3);
/// ```
pub fn round_to_units(amount: Decimal) -> EngineResult<i64> {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .to_i64()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("amount {} does not fit in whole currency units", rounded),
        })
}
