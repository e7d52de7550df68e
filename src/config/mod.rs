//! Configuration loading for the Payslip Engine.
//!
//! This module loads the seed tax table and employee records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Loaded tax table: {}", config.table().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeesFile, PayrollConfig, TaxRatesFile, TaxTableMetadata};
