//! Employee model.
//!
//! This module defines the [`Employee`] record consumed read-only by the
//! payslip calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest pension rate, in percent, an employee may contribute.
pub const MAX_PENSION_RATE: u8 = 50;

/// Represents an employee as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// Annual salary in currency units, up to 3 decimal places.
    pub annual_salary: Decimal,
    /// Pension contribution as a whole percentage of gross income (0-50).
    pub pension_rate: u8,
    /// The date the employee was hired.
    pub hiring_date: NaiveDate,
}

impl Employee {
    /// Returns the first and last name joined by a single space.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     first_name: "David".to_string(),
    ///     last_name: "Rudd".to_string(),
    ///     annual_salary: Decimal::new(60050, 0),
    ///     pension_rate: 9,
    ///     hiring_date: NaiveDate::from_ymd_opt(2016, 12, 10).unwrap(),
    /// };
    /// assert_eq!(employee.full_name(), "David Rudd");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
