//! Configuration types for the seed data.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a payroll configuration directory.

use serde::Deserialize;

use crate::store::{NewEmployee, NewTaxBracket};

/// Descriptive metadata about the tax table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxTableMetadata {
    /// Human-readable name of the table.
    pub name: String,
    /// The financial year the rates apply to (e.g. "2016-17").
    pub financial_year: String,
}

/// Structure of `tax_rates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRatesFile {
    /// Table metadata.
    pub table: TaxTableMetadata,
    /// The brackets, in any order.
    pub tax_rates: Vec<NewTaxBracket>,
}

/// Structure of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesFile {
    /// Employees to create at startup, in id order.
    #[serde(default)]
    pub employees: Vec<NewEmployee>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    table: TaxTableMetadata,
    tax_rates: Vec<NewTaxBracket>,
    employees: Vec<NewEmployee>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        table: TaxTableMetadata,
        tax_rates: Vec<NewTaxBracket>,
        employees: Vec<NewEmployee>,
    ) -> Self {
        let mut sorted_rates = tax_rates;
        sorted_rates.sort_by(|a, b| a.bottom_floor.cmp(&b.bottom_floor));
        Self {
            table,
            tax_rates: sorted_rates,
            employees,
        }
    }

    /// Returns the tax table metadata.
    pub fn table(&self) -> &TaxTableMetadata {
        &self.table
    }

    /// Returns the seed tax brackets, sorted by bottom floor.
    pub fn tax_rates(&self) -> &[NewTaxBracket] {
        &self.tax_rates
    }

    /// Returns the seed employees.
    pub fn employees(&self) -> &[NewEmployee] {
        &self.employees
    }
}
