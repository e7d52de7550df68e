//! Payslip Engine
//!
//! This crate keeps a small HR record store of employees and a progressive
//! income tax table, and computes monthly payslips from them: gross income,
//! income tax, net income and pension contribution for one employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
