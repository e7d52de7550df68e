//! Request types for the Payslip Engine API.
//!
//! This module defines the JSON and query structures accepted by the
//! endpoints, and checks the field limits before anything reaches the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_PENSION_RATE, PayPeriod};
use crate::store::{EmployeeChanges, NewEmployee, NewTaxBracket, TaxBracketChanges};

/// Most decimal places accepted for salaries and tax table values.
pub const MAX_DECIMAL_PLACES: u32 = 3;

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Annual salary, at least 1.
    pub annual_salary: Decimal,
    /// Pension rate in percent, 0-50.
    pub pension_rate: i64,
    /// Hiring date.
    pub hiring_date: NaiveDate,
}

/// Body of `PUT /employees/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeUpdateRequest {
    /// New first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// New annual salary.
    #[serde(default)]
    pub annual_salary: Option<Decimal>,
    /// New pension rate.
    #[serde(default)]
    pub pension_rate: Option<i64>,
    /// New hiring date.
    #[serde(default)]
    pub hiring_date: Option<NaiveDate>,
}

/// Body of `POST /tax_rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxBracketRequest {
    /// Lowest salary covered, at least 0.
    pub bottom_floor: Decimal,
    /// Highest salary covered, at least 1.
    pub top_floor: Decimal,
    /// Marginal rate, at least 0.001.
    pub tax_per_unit_over_bottom_floor: Decimal,
    /// Tax owed below the bottom floor, at least 0.
    pub cumulative_tax_up_to_bottom_floor: Decimal,
}

/// Body of `PUT /tax_rates/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxBracketUpdateRequest {
    /// New bottom floor.
    #[serde(default)]
    pub bottom_floor: Option<Decimal>,
    /// New top floor.
    #[serde(default)]
    pub top_floor: Option<Decimal>,
    /// New marginal rate.
    #[serde(default)]
    pub tax_per_unit_over_bottom_floor: Option<Decimal>,
    /// New cumulative tax.
    #[serde(default)]
    pub cumulative_tax_up_to_bottom_floor: Option<Decimal>,
}

/// Query string of `GET /payslip/:id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PayslipQuery {
    /// Month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl PayslipQuery {
    /// Validates the month and year into a pay period.
    pub fn into_period(self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.month, self.year)
    }
}

impl EmployeeRequest {
    /// Checks every field and converts the request into a store record.
    pub fn validate(self) -> EngineResult<NewEmployee> {
        Ok(NewEmployee {
            first_name: check_name("first_name", self.first_name)?,
            last_name: check_name("last_name", self.last_name)?,
            annual_salary: check_salary(self.annual_salary)?,
            pension_rate: check_pension_rate(self.pension_rate)?,
            hiring_date: self.hiring_date,
        })
    }
}

impl EmployeeUpdateRequest {
    /// Checks every provided field and converts the request into changes.
    pub fn validate(self) -> EngineResult<EmployeeChanges> {
        Ok(EmployeeChanges {
            first_name: self
                .first_name
                .map(|n| check_name("first_name", n))
                .transpose()?,
            last_name: self
                .last_name
                .map(|n| check_name("last_name", n))
                .transpose()?,
            annual_salary: self.annual_salary.map(check_salary).transpose()?,
            pension_rate: self.pension_rate.map(check_pension_rate).transpose()?,
            hiring_date: self.hiring_date,
        })
    }
}

impl TaxBracketRequest {
    /// Checks every field and converts the request into a store record.
    ///
    /// The top-above-bottom rule is enforced by the store, which also sees
    /// the merged record on updates.
    pub fn validate(self) -> EngineResult<NewTaxBracket> {
        Ok(NewTaxBracket {
            bottom_floor: check_bracket_value("bottom_floor", self.bottom_floor, Decimal::ZERO)?,
            top_floor: check_bracket_value("top_floor", self.top_floor, Decimal::ONE)?,
            tax_per_unit_over_bottom_floor: check_bracket_value(
                "tax_per_unit_over_bottom_floor",
                self.tax_per_unit_over_bottom_floor,
                min_tax_rate(),
            )?,
            cumulative_tax_up_to_bottom_floor: check_bracket_value(
                "cumulative_tax_up_to_bottom_floor",
                self.cumulative_tax_up_to_bottom_floor,
                Decimal::ZERO,
            )?,
        })
    }
}

impl TaxBracketUpdateRequest {
    /// Checks every provided field and converts the request into changes.
    pub fn validate(self) -> EngineResult<TaxBracketChanges> {
        Ok(TaxBracketChanges {
            bottom_floor: self
                .bottom_floor
                .map(|v| check_bracket_value("bottom_floor", v, Decimal::ZERO))
                .transpose()?,
            top_floor: self
                .top_floor
                .map(|v| check_bracket_value("top_floor", v, Decimal::ONE))
                .transpose()?,
            tax_per_unit_over_bottom_floor: self
                .tax_per_unit_over_bottom_floor
                .map(|v| check_bracket_value("tax_per_unit_over_bottom_floor", v, min_tax_rate()))
                .transpose()?,
            cumulative_tax_up_to_bottom_floor: self
                .cumulative_tax_up_to_bottom_floor
                .map(|v| check_bracket_value("cumulative_tax_up_to_bottom_floor", v, Decimal::ZERO))
                .transpose()?,
        })
    }
}

fn min_tax_rate() -> Decimal {
    Decimal::new(1, 3)
}

fn invalid_employee(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_name(field: &str, name: String) -> EngineResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid_employee(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_salary(salary: Decimal) -> EngineResult<Decimal> {
    if salary < Decimal::ONE {
        return Err(invalid_employee("annual_salary", "must be at least 1"));
    }
    if salary.normalize().scale() > MAX_DECIMAL_PLACES {
        return Err(invalid_employee(
            "annual_salary",
            format!("must have at most {} decimal places", MAX_DECIMAL_PLACES),
        ));
    }
    Ok(salary)
}

fn check_pension_rate(rate: i64) -> EngineResult<u8> {
    u8::try_from(rate)
        .ok()
        .filter(|r| *r <= MAX_PENSION_RATE)
        .ok_or_else(|| {
            invalid_employee(
                "pension_rate",
                format!("must be between 0 and {}", MAX_PENSION_RATE),
            )
        })
}

fn check_bracket_value(field: &str, value: Decimal, min: Decimal) -> EngineResult<Decimal> {
    if value < min {
        return Err(EngineError::InvalidTaxBracket {
            field: field.to_string(),
            message: format!("must be at least {}", min),
        });
    }
    if value.normalize().scale() > MAX_DECIMAL_PLACES {
        return Err(EngineError::InvalidTaxBracket {
            field: field.to_string(),
            message: format!("must have at most {} decimal places", MAX_DECIMAL_PLACES),
        });
    }
    Ok(value)
}
