//! Tax table coverage checks.
//!
//! The tax table must partition the salary range so that every salary matches
//! exactly one bracket. Nothing enforces this when rows are written; this
//! module inspects a whole table and reports where the partition breaks, so
//! operators can find the problem before a payslip request trips over it.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TaxBracket;

/// A single defect found in a tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageIssue {
    /// The table has no brackets at all.
    EmptyTable,
    /// The lowest bracket starts above zero, leaving low salaries uncovered.
    MissingZeroFloor {
        /// The lowest bracket.
        bracket_id: u64,
        /// Its bottom floor.
        bottom_floor: Decimal,
    },
    /// A bracket whose top floor is not above its bottom floor.
    InvertedRange {
        /// The offending bracket.
        bracket_id: u64,
        /// Its bottom floor.
        bottom_floor: Decimal,
        /// Its top floor.
        top_floor: Decimal,
    },
    /// Two brackets share at least one salary.
    Overlap {
        /// The bracket with the lower bottom floor.
        lower_id: u64,
        /// The bracket that starts inside it.
        upper_id: u64,
    },
    /// Salaries between two consecutive brackets that neither covers.
    Gap {
        /// The bracket below the gap.
        lower_id: u64,
        /// The bracket above the gap.
        upper_id: u64,
        /// Top floor of the lower bracket.
        from: Decimal,
        /// Bottom floor of the upper bracket.
        to: Decimal,
    },
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageIssue::EmptyTable => write!(f, "tax table is empty"),
            CoverageIssue::MissingZeroFloor {
                bracket_id,
                bottom_floor,
            } => write!(
                f,
                "lowest bracket {} starts at {} instead of 0",
                bracket_id, bottom_floor
            ),
            CoverageIssue::InvertedRange {
                bracket_id,
                bottom_floor,
                top_floor,
            } => write!(
                f,
                "bracket {} has top floor {} not above bottom floor {}",
                bracket_id, top_floor, bottom_floor
            ),
            CoverageIssue::Overlap { lower_id, upper_id } => {
                write!(f, "brackets {} and {} overlap", lower_id, upper_id)
            }
            CoverageIssue::Gap {
                lower_id,
                upper_id,
                from,
                to,
            } => write!(
                f,
                "salaries between {} and {} fall between brackets {} and {}",
                from, to, lower_id, upper_id
            ),
        }
    }
}

/// Reports every coverage defect in a tax table.
///
/// The brackets are examined in bottom-floor order; the input order does not
/// matter and the input is not modified. Consecutive brackets may step by up
/// to one currency unit (e.g. 18200 then 18201) without counting as a gap.
///
/// An empty result means the table is a valid partition starting at zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{CoverageIssue, check_coverage};
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
///         bottom_floor: Decimal::from(20000),
///         top_floor: Decimal::from(37000),
///         tax_per_unit_over_bottom_floor: Decimal::new(19, 2),
///         cumulative_tax_up_to_bottom_floor: Decimal::ZERO,
///     },
/// ];
///
/// let issues = check_coverage(&brackets);
/// assert!(matches!(issues.as_slice(), [CoverageIssue::Gap { lower_id: 1, upper_id: 2, .. }]));
/// ```
pub fn check_coverage(brackets: &[TaxBracket]) -> Vec<CoverageIssue> {
    let mut sorted: Vec<&TaxBracket> = brackets.iter().collect();
    sorted.sort_by(|a, b| {
        a.bottom_floor
            .cmp(&b.bottom_floor)
            .then(a.top_floor.cmp(&b.top_floor))
    });

    let Some(lowest) = sorted.first() else {
        return vec![CoverageIssue::EmptyTable];
    };

    let mut issues = Vec::new();

    if lowest.bottom_floor > Decimal::ZERO {
        issues.push(CoverageIssue::MissingZeroFloor {
            bracket_id: lowest.id,
            bottom_floor: lowest.bottom_floor,
        });
    }

    for bracket in &sorted {
        if bracket.top_floor <= bracket.bottom_floor {
            issues.push(CoverageIssue::InvertedRange {
                bracket_id: bracket.id,
                bottom_floor: bracket.bottom_floor,
                top_floor: bracket.top_floor,
            });
        }
    }

    // Overlaps are checked against every lower bracket; gaps against the
    // furthest top floor reached so far.
    let mut reach = *lowest;
    for (index, upper) in sorted.iter().enumerate().skip(1) {
        for lower in &sorted[..index] {
            if upper.bottom_floor <= lower.top_floor {
                issues.push(CoverageIssue::Overlap {
                    lower_id: lower.id,
                    upper_id: upper.id,
                });
            }
        }

        let beyond_reach = reach
            .top_floor
            .checked_add(Decimal::ONE)
            .is_some_and(|limit| upper.bottom_floor > limit);
        if beyond_reach {
            issues.push(CoverageIssue::Gap {
                lower_id: reach.id,
                upper_id: upper.id,
                from: reach.top_floor,
                to: upper.bottom_floor,
            });
        }

        if upper.top_floor > reach.top_floor {
            reach = *upper;
        }
    }

    issues
}
