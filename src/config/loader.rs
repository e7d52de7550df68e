//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the seed tax
//! table and employees from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::calculation::{CoverageIssue, check_coverage};
use crate::error::{EngineError, EngineResult};
use crate::models::TaxBracket;
use crate::store::InMemoryStore;

use super::types::{EmployeesFile, PayrollConfig, TaxRatesFile, TaxTableMetadata};

/// Loads and provides access to the payroll seed configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── tax_rates.yaml   # Table metadata and brackets
/// └── employees.yaml   # Employees created at startup
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Loaded tax table: {}", loader.table().name);
/// let store = loader.into_store().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing or contains invalid YAML.
    /// Coverage defects in the tax table are logged as warnings but do not
    /// fail the load; they surface as consistency failures at payslip time.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax_rates_path = path.join("tax_rates.yaml");
        let tax_rates = Self::load_yaml::<TaxRatesFile>(&tax_rates_path)?;

        let employees_path = path.join("employees.yaml");
        let employees = Self::load_yaml::<EmployeesFile>(&employees_path)?;

        let config = PayrollConfig::new(tax_rates.table, tax_rates.tax_rates, employees.employees);
        let loader = Self { config };

        info!(
            table = %loader.table().name,
            financial_year = %loader.table().financial_year,
            brackets = loader.config.tax_rates().len(),
            employees = loader.config.employees().len(),
            "Loaded payroll configuration"
        );
        for issue in loader.coverage_issues() {
            warn!(issue = %issue, "Tax table coverage problem in configuration");
        }

        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the tax table metadata.
    pub fn table(&self) -> &TaxTableMetadata {
        self.config.table()
    }

    /// Checks the configured tax table for overlaps and gaps.
    ///
    /// Brackets are numbered in bottom-floor order starting at 1, which is
    /// the id each one receives when the store is seeded.
    pub fn coverage_issues(&self) -> Vec<CoverageIssue> {
        let brackets: Vec<TaxBracket> = self
            .config
            .tax_rates()
            .iter()
            .zip(1u64..)
            .map(|(bracket, id)| bracket.clone().into_bracket(id))
            .collect();
        check_coverage(&brackets)
    }

    /// Builds an in-memory store seeded with the configured records.
    pub fn into_store(self) -> EngineResult<InMemoryStore> {
        let config = self.config;
        InMemoryStore::seeded(config.employees().to_vec(), config.tax_rates().to_vec())
    }
}
