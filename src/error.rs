//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the record store, bracket resolver and payslip
//! calculator can produce.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Payslip Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No live employee exists with the requested identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that did not resolve.
        id: u64,
    },

    /// No live tax bracket exists with the requested identifier.
    #[error("Tax bracket not found: {id}")]
    TaxBracketNotFound {
        /// The identifier that did not resolve.
        id: u64,
    },

    /// The tax table does not cover a salary exactly once.
    ///
    /// `matching_ids` is empty when no bracket covers the salary and holds
    /// two or more ids when brackets overlap.
    #[error("Tax table consistency failure for salary {salary}: {reason}")]
    ConsistencyFailure {
        /// The salary that was being resolved.
        salary: Decimal,
        /// Which way the table is broken.
        reason: String,
        /// Ids of every bracket that matched the salary.
        matching_ids: Vec<u64>,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A tax bracket record was invalid or contained inconsistent data.
    #[error("Invalid tax bracket field '{field}': {message}")]
    InvalidTaxBracket {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The requested month/year does not form a valid pay period.
    #[error("Invalid pay period {month}/{year}: {message}")]
    InvalidPayPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that indicate corrupt reference data rather
    /// than a bad request.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, EngineError::ConsistencyFailure { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tax_rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tax_rates.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound { id: 7 };
        assert_eq!(error.to_string(), "Employee not found: 7");
    }

    #[test]
    fn test_tax_bracket_not_found_displays_id() {
        let error = EngineError::TaxBracketNotFound { id: 3 };
        assert_eq!(error.to_string(), "Tax bracket not found: 3");
    }

    #[test]
    fn test_consistency_failure_displays_salary_and_reason() {
        let error = EngineError::ConsistencyFailure {
            salary: Decimal::new(60050, 0),
            reason: "multiple brackets cover salary".to_string(),
            matching_ids: vec![2, 3],
        };
        assert_eq!(
            error.to_string(),
            "Tax table consistency failure for salary 60050: multiple brackets cover salary"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "pension_rate".to_string(),
            message: "must be between 0 and 50".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'pension_rate': must be between 0 and 50"
        );
    }

    #[test]
    fn test_invalid_pay_period_displays_month_and_year() {
        let error = EngineError::InvalidPayPeriod {
            month: 13,
            year: 2024,
            message: "month must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period 13/2024: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_only_consistency_failure_is_data_integrity() {
        let consistency = EngineError::ConsistencyFailure {
            salary: Decimal::ZERO,
            reason: "no bracket covers salary".to_string(),
            matching_ids: vec![],
        };
        assert!(consistency.is_data_integrity());
        assert!(!EngineError::EmployeeNotFound { id: 1 }.is_data_integrity());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound { id: 1 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
