//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the calendar month a payslip
//! is issued for. The period only labels the payslip; the amounts are always
//! one twelfth of the annual figures.

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Earliest year accepted for a pay period.
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted for a pay period.
pub const MAX_YEAR: i32 = 9999;

/// A single calendar month for which a payslip is produced.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2, 2024).unwrap();
/// assert_eq!(period.days_in_month(), 29);
/// assert_eq!(period.label(), "February 01 to February 29, 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayPeriod {
    month: u32,
    year: i32,
}

impl PayPeriod {
    /// Creates a pay period, validating the month (1-12) and year range.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPayPeriod {
                month,
                year,
                message: "month must be between 1 and 12".to_string(),
            });
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidPayPeriod {
                month,
                year,
                message: format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR),
            });
        }
        Ok(Self { month, year })
    }

    /// Returns the month number (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the number of days in the month, accounting for leap years.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Returns the English month name (e.g. "March").
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("January")
    }

    /// Formats the period as "`<Month> 01 to <Month> <days>, <Year>`".
    pub fn label(&self) -> String {
        let name = self.month_name();
        format!(
            "{} 01 to {} {}, {}",
            name,
            name,
            self.days_in_month(),
            self.year
        )
    }
}
