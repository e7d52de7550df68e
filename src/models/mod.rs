//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_period;
mod payslip;
mod tax_bracket;

pub use employee::{Employee, MAX_PENSION_RATE};
pub use pay_period::{MAX_YEAR, MIN_YEAR, PayPeriod};
pub use payslip::Payslip;
pub use tax_bracket::TaxBracket;
