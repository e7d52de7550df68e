//! Tax bracket model.
//!
//! A [`TaxBracket`] is one row of the progressive income-tax table: a salary
//! range, the marginal rate applied above its bottom floor, and the tax
//! already owed on everything below that floor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a single progressive tax bracket.
///
/// # Example
///
/// ```
/// use payslip_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     id: 3,
///     bottom_floor: Decimal::from(37001),
///     top_floor: Decimal::from(80000),
///     tax_per_unit_over_bottom_floor: Decimal::from_str("0.325").unwrap(),
///     cumulative_tax_up_to_bottom_floor: Decimal::from(3572),
/// };
///
/// assert!(bracket.covers(Decimal::from(60050)));
/// assert!(bracket.covers(Decimal::from(80000)));
/// assert!(!bracket.covers(Decimal::from(80001)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Unique identifier for the bracket.
    pub id: u64,
    /// Lowest annual salary covered by this bracket (inclusive).
    pub bottom_floor: Decimal,
    /// Highest annual salary covered by this bracket (inclusive).
    pub top_floor: Decimal,
    /// Marginal rate applied to every currency unit above the bottom floor.
    pub tax_per_unit_over_bottom_floor: Decimal,
    /// Tax owed on all income up to the bottom floor under lower brackets.
    pub cumulative_tax_up_to_bottom_floor: Decimal,
}

impl TaxBracket {
    /// Checks whether a salary falls inside this bracket.
    ///
    /// Both floors are inclusive.
    pub fn covers(&self, salary: Decimal) -> bool {
        self.bottom_floor <= salary && salary <= self.top_floor
    }
}
