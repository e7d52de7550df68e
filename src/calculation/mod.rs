//! Calculation logic for the Payslip Engine.
//!
//! This module contains the tax bracket resolver, the monthly payslip
//! calculator with its rounding rule, the tax table coverage check, and the
//! service function that runs them against a record store.

mod bracket_resolver;
mod payslip_calculator;
mod payslip_service;
mod rounding;
mod tax_table;

pub use bracket_resolver::{
    MULTIPLE_BRACKETS_COVER_SALARY, NO_BRACKET_COVERS_SALARY, resolve_bracket,
};
pub use payslip_calculator::calculate_payslip;
pub use payslip_service::compute_payslip;
pub use rounding::round_to_units;
pub use tax_table::{CoverageIssue, check_coverage};
