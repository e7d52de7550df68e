//! Input records accepted by the store.
//!
//! Creating a row takes a `New*` record without an id; updating takes a
//! `*Changes` record where every field is optional.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Employee, TaxBracket};

/// Fields of an employee about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEmployee {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Annual salary.
    pub annual_salary: Decimal,
    /// Pension rate in percent.
    pub pension_rate: u8,
    /// Hiring date.
    pub hiring_date: NaiveDate,
}

impl NewEmployee {
    pub(crate) fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            annual_salary: self.annual_salary,
            pension_rate: self.pension_rate,
            hiring_date: self.hiring_date,
        }
    }
}

/// A partial update of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New annual salary.
    pub annual_salary: Option<Decimal>,
    /// New pension rate.
    pub pension_rate: Option<u8>,
    /// New hiring date.
    pub hiring_date: Option<NaiveDate>,
}

impl EmployeeChanges {
    pub(crate) fn apply_to(self, employee: &mut Employee) {
        if let Some(first_name) = self.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            employee.last_name = last_name;
        }
        if let Some(annual_salary) = self.annual_salary {
            employee.annual_salary = annual_salary;
        }
        if let Some(pension_rate) = self.pension_rate {
            employee.pension_rate = pension_rate;
        }
        if let Some(hiring_date) = self.hiring_date {
            employee.hiring_date = hiring_date;
        }
    }
}

/// Fields of a tax bracket about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTaxBracket {
    /// Lowest salary covered (inclusive).
    pub bottom_floor: Decimal,
    /// Highest salary covered (inclusive).
    pub top_floor: Decimal,
    /// Marginal rate above the bottom floor.
    pub tax_per_unit_over_bottom_floor: Decimal,
    /// Tax owed up to the bottom floor.
    pub cumulative_tax_up_to_bottom_floor: Decimal,
}

impl NewTaxBracket {
    pub(crate) fn into_bracket(self, id: u64) -> TaxBracket {
        TaxBracket {
            id,
            bottom_floor: self.bottom_floor,
            top_floor: self.top_floor,
            tax_per_unit_over_bottom_floor: self.tax_per_unit_over_bottom_floor,
            cumulative_tax_up_to_bottom_floor: self.cumulative_tax_up_to_bottom_floor,
        }
    }
}

/// A partial update of a tax bracket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxBracketChanges {
    /// New bottom floor.
    pub bottom_floor: Option<Decimal>,
    /// New top floor.
    pub top_floor: Option<Decimal>,
    /// New marginal rate.
    pub tax_per_unit_over_bottom_floor: Option<Decimal>,
    /// New cumulative tax.
    pub cumulative_tax_up_to_bottom_floor: Option<Decimal>,
}

impl TaxBracketChanges {
    pub(crate) fn apply_to(self, bracket: &mut TaxBracket) {
        if let Some(bottom_floor) = self.bottom_floor {
            bracket.bottom_floor = bottom_floor;
        }
        if let Some(top_floor) = self.top_floor {
            bracket.top_floor = top_floor;
        }
        if let Some(rate) = self.tax_per_unit_over_bottom_floor {
            bracket.tax_per_unit_over_bottom_floor = rate;
        }
        if let Some(cumulative) = self.cumulative_tax_up_to_bottom_floor {
            bracket.cumulative_tax_up_to_bottom_floor = cumulative;
        }
    }
}
