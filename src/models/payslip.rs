//! Payslip model.
//!
//! A [`Payslip`] is derived fresh on every request and never stored.

use serde::{Deserialize, Serialize};

/// The monthly payslip of one employee.
///
/// All monetary fields are whole currency units.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Payslip;
///
/// let payslip = Payslip {
///     pay_period: "March 01 to March 31, 2017".to_string(),
///     full_name: "David Rudd".to_string(),
///     gross_income: 5004,
///     income_tax: 922,
///     net_income: 4082,
///     pension_contribution: 450,
/// };
/// assert_eq!(payslip.net_income, payslip.gross_income - payslip.income_tax);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Human-readable label of the month, e.g. "March 01 to March 31, 2017".
    pub pay_period: String,
    /// First and last name of the employee.
    pub full_name: String,
    /// Monthly pre-tax pay.
    pub gross_income: i64,
    /// Monthly income tax.
    pub income_tax: i64,
    /// Gross income less income tax.
    pub net_income: i64,
    /// Monthly pension deduction.
    pub pension_contribution: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_payslip_uses_integers() {
        let payslip = Payslip {
            pay_period: "January 01 to January 31, 2017".to_string(),
            full_name: "Ryan Chen".to_string(),
            gross_income: 10000,
            income_tax: 2696,
            net_income: 7304,
            pension_contribution: 1000,
        };

        let json = serde_json::to_string(&payslip).unwrap();
        assert!(json.contains("\"gross_income\":10000"));
        assert!(json.contains("\"income_tax\":2696"));
        assert!(json.contains("\"net_income\":7304"));
        assert!(json.contains("\"pension_contribution\":1000"));
        assert!(json.contains("\"pay_period\":\"January 01 to January 31, 2017\""));
    }
}
