//! Tax bracket resolution.
//!
//! This module finds the single bracket of the tax table that applies to an
//! annual salary. The table is expected to partition the salary range; when
//! it does not, resolution fails instead of guessing.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxBracket;

/// Reason reported when no bracket covers a salary.
pub const NO_BRACKET_COVERS_SALARY: &str = "no bracket covers salary";

/// Reason reported when more than one bracket covers a salary.
pub const MULTIPLE_BRACKETS_COVER_SALARY: &str = "multiple brackets cover salary";

/// Returns the unique bracket whose inclusive range contains `salary`.
///
/// The brackets may be in any order. Every bracket is scanned so that an
/// overlapping table is detected even when the first match looks right.
///
/// # Errors
///
/// Returns `ConsistencyFailure` when zero or several brackets match. The
/// error carries the ids of all matching brackets.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::resolve_bracket;
/// use payslip_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket {
///         id: 1,
///         bottom_floor: Decimal::from(0),
///         top_floor: Decimal::from(18200),
///         tax_per_unit_over_bottom_floor: Decimal::ZERO,
///         cumulative_tax_up_to_bottom_floor: Decimal::ZERO,
///     },
///     TaxBracket {
///         id: 2,
///         bottom_floor: Decimal::from(18201),
///         top_floor: Decimal::from(37000),
///         tax_per_unit_over_bottom_floor: Decimal::new(19, 2),
///         cumulative_tax_up_to_bottom_floor: Decimal::ZERO,
///     },
/// ];
///
/// let bracket = resolve_bracket(Decimal::from(22124), &brackets).unwrap();
/// assert_eq!(bracket.id, 2);
/// ```
pub fn resolve_bracket(salary: Decimal, brackets: &[TaxBracket]) -> EngineResult<&TaxBracket> {
    let matches: Vec<&TaxBracket> = brackets.iter().filter(|b| b.covers(salary)).collect();

    match matches.as_slice() {
        [bracket] => Ok(*bracket),
        [] => Err(EngineError::ConsistencyFailure {
            salary,
            reason: NO_BRACKET_COVERS_SALARY.to_string(),
            matching_ids: Vec::new(),
        }),
        _ => Err(EngineError::ConsistencyFailure {
            salary,
            reason: MULTIPLE_BRACKETS_COVER_SALARY.to_string(),
            matching_ids: matches.iter().map(|b| b.id).collect(),
        }),
    }
}
