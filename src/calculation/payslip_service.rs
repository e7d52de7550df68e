//! Payslip computation against a record store.
//!
//! Wires the store lookups, the bracket resolver and the payslip calculator
//! together. A payslip is produced whole or not at all.

use tracing::{debug, error};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, Payslip};
use crate::store::RecordStore;

use super::bracket_resolver::resolve_bracket;
use super::payslip_calculator::calculate_payslip;

/// Computes the payslip of one employee for one month.
///
/// # Errors
///
/// - `EmployeeNotFound` if the store has no live employee with `employee_id`.
/// - `ConsistencyFailure` if the tax table covers the employee's salary zero
///   times or more than once. This is logged at error level since it means
///   the tax table itself needs fixing.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_payslip;
/// use payslip_engine::models::PayPeriod;
/// use payslip_engine::store::{InMemoryStore, NewEmployee, NewTaxBracket};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// store.create_tax_bracket(NewTaxBracket {
///     bottom_floor: Decimal::from(0),
///     top_floor: Decimal::from(18200),
///     tax_per_unit_over_bottom_floor: Decimal::ZERO,
///     cumulative_tax_up_to_bottom_floor: Decimal::ZERO,
/// }).unwrap();
/// let employee = store.create_employee(NewEmployee {
///     first_name: "June".to_string(),
///     last_name: "Symons".to_string(),
///     annual_salary: Decimal::from(14352),
///     pension_rate: 0,
///     hiring_date: NaiveDate::from_ymd_opt(2016, 12, 14).unwrap(),
/// });
///
/// let payslip = compute_payslip(&store, employee.id, PayPeriod::new(1, 2017).unwrap()).unwrap();
/// assert_eq!(payslip.gross_income, 1196);
/// assert_eq!(payslip.net_income, 1196);
/// ```
pub fn compute_payslip<S: RecordStore + ?Sized>(
    store: &S,
    employee_id: u64,
    period: PayPeriod,
) -> EngineResult<Payslip> {
    let employee = store
        .employee(employee_id)
        .ok_or(EngineError::EmployeeNotFound { id: employee_id })?;

    let brackets = store.tax_brackets();
    let bracket = resolve_bracket(employee.annual_salary, &brackets).inspect_err(|err| {
        error!(
            employee_id,
            salary = %employee.annual_salary,
            brackets = brackets.len(),
            error = %err,
            "Tax table does not resolve to a single bracket"
        );
    })?;

    debug!(
        employee_id,
        bracket_id = bracket.id,
        month = period.month(),
        year = period.year(),
        "Resolved tax bracket"
    );

    calculate_payslip(&employee, bracket, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, TaxBracket};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A fixed snapshot store, independent of the in-memory implementation.
    struct FixedStore {
        employees: HashMap<u64, Employee>,
        brackets: Vec<TaxBracket>,
    }

    impl RecordStore for FixedStore {
        fn employee(&self, id: u64) -> Option<Employee> {
            self.employees.get(&id).cloned()
        }

        fn tax_brackets(&self) -> Vec<TaxBracket> {
            self.brackets.clone()
        }
    }

    fn bracket(id: u64, bottom: &str, top: &str, rate: &str, cumulative: &str) -> TaxBracket {
        TaxBracket {
            id,
            bottom_floor: dec(bottom),
            top_floor: dec(top),
            tax_per_unit_over_bottom_floor: dec(rate),
            cumulative_tax_up_to_bottom_floor: dec(cumulative),
        }
    }

    fn fixed_store(brackets: Vec<TaxBracket>) -> FixedStore {
        let employee = Employee {
            id: 1,
            first_name: "Ryan".to_string(),
            last_name: "Chen".to_string(),
            annual_salary: dec("120000"),
            pension_rate: 10,
            hiring_date: NaiveDate::from_ymd_opt(2016, 11, 11).unwrap(),
        };
        FixedStore {
            employees: HashMap::from([(1, employee)]),
            brackets,
        }
    }

    fn standard_table() -> Vec<TaxBracket> {
        vec![
            bracket(1, "0", "18200", "0", "0"),
            bracket(2, "18201", "37000", "0.190", "0"),
            bracket(3, "37001", "80000", "0.325", "3572"),
            bracket(4, "80001", "180000", "0.370", "17547"),
            bracket(5, "180001", "999999.999", "0.450", "54547"),
        ]
    }

    fn january_2017() -> PayPeriod {
        PayPeriod::new(1, 2017).unwrap()
    }

    #[test]
    fn test_computes_payslip_from_store() {
        let store = fixed_store(standard_table());
        let payslip = compute_payslip(&store, 1, january_2017()).unwrap();

        assert_eq!(payslip.full_name, "Ryan Chen");
        assert_eq!(payslip.pay_period, "January 01 to January 31, 2017");
        assert_eq!(payslip.gross_income, 10000);
        assert_eq!(payslip.income_tax, 2696);
        assert_eq!(payslip.net_income, 7304);
        assert_eq!(payslip.pension_contribution, 1000);
    }

    #[test]
    fn test_unknown_employee_is_not_found() {
        let store = fixed_store(standard_table());
        match compute_payslip(&store, 2, january_2017()) {
            Err(EngineError::EmployeeNotFound { id }) => assert_eq!(id, 2),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_employee_is_checked_before_tax_table() {
        // An empty table would be a consistency failure, but the missing
        // employee is reported first.
        let store = fixed_store(vec![]);
        assert!(matches!(
            compute_payslip(&store, 2, january_2017()),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_overlapping_table_is_consistency_failure() {
        let mut table = standard_table();
        table.push(bracket(6, "100000", "150000", "0.400", "20000"));
        let store = fixed_store(table);

        match compute_payslip(&store, 1, january_2017()) {
            Err(EngineError::ConsistencyFailure { matching_ids, .. }) => {
                assert_eq!(matching_ids, vec![4, 6]);
            }
            other => panic!("Expected ConsistencyFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_uncovered_salary_is_consistency_failure() {
        let store = fixed_store(vec![bracket(1, "0", "18200", "0", "0")]);
        let err = compute_payslip(&store, 1, january_2017()).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_works_through_trait_object() {
        let store: Box<dyn RecordStore> = Box::new(fixed_store(standard_table()));
        let payslip = compute_payslip(store.as_ref(), 1, january_2017()).unwrap();
        assert_eq!(payslip.gross_income, 10000);
    }
}
