//! Monthly payslip calculation.
//!
//! This module derives a [`Payslip`] from an employee and the tax bracket that
//! covers the employee's annual salary. The figures are one twelfth of the
//! annual amounts regardless of which month is requested; the pay period only
//! labels the payslip.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, Payslip, TaxBracket};

use super::rounding::round_to_units;

const MONTHS_PER_YEAR: i64 = 12;

/// Calculates an employee's payslip for one month.
///
/// The steps, each rounded independently to whole units (half away from zero):
///
/// 1. `gross_income = round(annual_salary / 12)`
/// 2. `income_tax = round((cumulative_tax + (annual_salary - bottom_floor - 1) * rate) / 12)`
/// 3. `net_income = gross_income - income_tax` (not rounded again)
/// 4. `pension_contribution = round(gross_income * pension_rate / 100)`
///
/// A salary equal to the bottom floor gives an over-floor difference of -1,
/// which slightly reduces the tax. That difference is kept as is.
///
/// # Errors
///
/// Returns `CalculationError` if an intermediate amount overflows the
/// decimal range or a rounded amount does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_payslip;
/// use payslip_engine::models::{Employee, PayPeriod, TaxBracket};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: 1,
///     first_name: "David".to_string(),
///     last_name: "Rudd".to_string(),
///     annual_salary: Decimal::from(60050),
///     pension_rate: 9,
///     hiring_date: NaiveDate::from_ymd_opt(2016, 12, 10).unwrap(),
/// };
/// let bracket = TaxBracket {
///     id: 3,
///     bottom_floor: Decimal::from(37001),
///     top_floor: Decimal::from(80000),
///     tax_per_unit_over_bottom_floor: Decimal::from_str("0.325").unwrap(),
///     cumulative_tax_up_to_bottom_floor: Decimal::from(3572),
/// };
/// let period = PayPeriod::new(3, 2017).unwrap();
///
/// let payslip = calculate_payslip(&employee, &bracket, period).unwrap();
/// assert_eq!(payslip.pay_period, "March 01 to March 31, 2017");
/// assert_eq!(payslip.full_name, "David Rudd");
/// assert_eq!(payslip.gross_income, 5004);
/// assert_eq!(payslip.income_tax, 922);
/// assert_eq!(payslip.net_income, 4082);
/// assert_eq!(payslip.pension_contribution, 450);
/// ```
pub fn calculate_payslip(
    employee: &Employee,
    bracket: &TaxBracket,
    period: PayPeriod,
) -> EngineResult<Payslip> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let salary = employee.annual_salary;

    let gross_income = round_to_units(checked(salary.checked_div(months), "gross income")?)?;

    let over_bottom_difference = checked(
        salary
            .checked_sub(bracket.bottom_floor)
            .and_then(|d| d.checked_sub(Decimal::ONE)),
        "over bottom floor difference",
    )?;
    let tax_over_difference = checked(
        over_bottom_difference.checked_mul(bracket.tax_per_unit_over_bottom_floor),
        "tax over difference",
    )?;
    let annual_tax = checked(
        bracket
            .cumulative_tax_up_to_bottom_floor
            .checked_add(tax_over_difference),
        "annual income tax",
    )?;
    let income_tax = round_to_units(checked(annual_tax.checked_div(months), "income tax")?)?;

    let net_income = gross_income
        .checked_sub(income_tax)
        .ok_or_else(|| overflow("net income"))?;

    let pension_contribution = round_to_units(checked(
        Decimal::from(gross_income)
            .checked_mul(Decimal::from(employee.pension_rate))
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED)),
        "pension contribution",
    )?)?;

    Ok(Payslip {
        pay_period: period.label(),
        full_name: employee.full_name(),
        gross_income,
        income_tax,
        net_income,
        pension_contribution,
    })
}

fn checked(value: Option<Decimal>, step: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| overflow(step))
}

fn overflow(step: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{step} overflowed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(salary: &str, pension_rate: u8) -> Employee {
        Employee {
            id: 1,
            first_name: "Test".to_string(),
            last_name: "Employee".to_string(),
            annual_salary: dec(salary),
            pension_rate,
            hiring_date: NaiveDate::from_ymd_opt(2016, 12, 10).unwrap(),
        }
    }

    fn bracket(bottom: &str, top: &str, rate: &str, cumulative: &str) -> TaxBracket {
        TaxBracket {
            id: 1,
            bottom_floor: dec(bottom),
            top_floor: dec(top),
            tax_per_unit_over_bottom_floor: dec(rate),
            cumulative_tax_up_to_bottom_floor: dec(cumulative),
        }
    }

    fn march_2017() -> PayPeriod {
        PayPeriod::new(3, 2017).unwrap()
    }

    fn amounts(payslip: &Payslip) -> (i64, i64, i64, i64) {
        (
            payslip.gross_income,
            payslip.income_tax,
            payslip.net_income,
            payslip.pension_contribution,
        )
    }

    /// PS-001: 60050 at 9% in the 37001-80000 bracket
    #[test]
    fn test_middle_bracket_salary() {
        let payslip = calculate_payslip(
            &employee("60050", 9),
            &bracket("37001", "80000", "0.325", "3572"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(amounts(&payslip), (5004, 922, 4082, 450));
    }

    /// PS-002: 120000 at 10% in the 80001-180000 bracket
    #[test]
    fn test_upper_middle_bracket_salary() {
        let payslip = calculate_payslip(
            &employee("120000", 10),
            &bracket("80001", "180000", "0.370", "17547"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(amounts(&payslip), (10000, 2696, 7304, 1000));
    }

    /// PS-003: 22124 at 15% in the 18201-37000 bracket
    #[test]
    fn test_lowest_taxed_bracket_salary() {
        let payslip = calculate_payslip(
            &employee("22124", 15),
            &bracket("18201", "37000", "0.190", "0"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(amounts(&payslip), (1844, 62, 1782, 277));
    }

    /// PS-004: 406702 at 50% in the top bracket
    #[test]
    fn test_top_bracket_salary_with_maximum_pension() {
        let payslip = calculate_payslip(
            &employee("406702", 50),
            &bracket("180001", "999999.999", "0.450", "54547"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(amounts(&payslip), (33892, 13047, 20845, 16946));
    }

    /// PS-005: 14352 at 0% in the tax-free bracket
    #[test]
    fn test_tax_free_bracket_salary() {
        let payslip = calculate_payslip(
            &employee("14352", 0),
            &bracket("0", "18200", "0", "0"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(amounts(&payslip), (1196, 0, 1196, 0));
    }

    #[test]
    fn test_salary_at_bottom_floor_keeps_negative_difference() {
        // (6 + (-1 * 0.5)) / 12 = 0.458 -> 0. Clamping the difference to zero
        // would give 6 / 12 = 0.5 -> 1.
        let payslip = calculate_payslip(
            &employee("50000", 0),
            &bracket("50000", "60000", "0.5", "6"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(payslip.income_tax, 0);
    }

    #[test]
    fn test_net_income_is_not_rounded_independently() {
        let payslip = calculate_payslip(
            &employee("60050", 9),
            &bracket("37001", "80000", "0.325", "3572"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(payslip.net_income, payslip.gross_income - payslip.income_tax);
    }

    #[test]
    fn test_pension_uses_rounded_gross_income() {
        // 24006 / 12 = 2000.5 -> 2001; 2001 * 50% = 1000.5 -> 1001.
        let payslip = calculate_payslip(
            &employee("24006", 50),
            &bracket("18201", "37000", "0.190", "0"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(payslip.gross_income, 2001);
        assert_eq!(payslip.pension_contribution, 1001);
    }

    #[test]
    fn test_amounts_do_not_depend_on_month() {
        let emp = employee("120000", 10);
        let br = bracket("80001", "180000", "0.370", "17547");

        let february = calculate_payslip(&emp, &br, PayPeriod::new(2, 2024).unwrap()).unwrap();
        let december = calculate_payslip(&emp, &br, PayPeriod::new(12, 2017).unwrap()).unwrap();

        assert_eq!(amounts(&february), amounts(&december));
        assert_eq!(february.pay_period, "February 01 to February 29, 2024");
        assert_eq!(december.pay_period, "December 01 to December 31, 2017");
    }

    #[test]
    fn test_full_name_in_payslip() {
        let mut emp = employee("60050", 9);
        emp.first_name = "David".to_string();
        emp.last_name = "Rudd".to_string();
        let payslip = calculate_payslip(
            &emp,
            &bracket("37001", "80000", "0.325", "3572"),
            march_2017(),
        )
        .unwrap();
        assert_eq!(payslip.full_name, "David Rudd");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let emp = employee("60050", 9);
        let br = bracket("37001", "80000", "0.325", "3572");
        let (emp_before, br_before) = (emp.clone(), br.clone());

        let _ = calculate_payslip(&emp, &br, march_2017()).unwrap();

        assert_eq!(emp, emp_before);
        assert_eq!(br, br_before);
    }

    #[test]
    fn test_overflowing_cumulative_tax_is_calculation_error() {
        let mut br = bracket("0", "1000", "0.45", "0");
        br.top_floor = Decimal::MAX;
        br.cumulative_tax_up_to_bottom_floor = Decimal::MAX;

        let result = calculate_payslip(&employee("100", 0), &br, march_2017());

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_overflowing_floor_difference_is_calculation_error() {
        // 0 - MAX - 1 is below Decimal::MIN
        let mut br = bracket("0", "1000", "0.45", "0");
        br.bottom_floor = Decimal::MAX;
        br.top_floor = Decimal::MAX;

        let result = calculate_payslip(&employee("0", 0), &br, march_2017());

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    proptest! {
        #[test]
        fn prop_net_income_is_gross_minus_tax(
            salary_thousandths in 37_001_000i64..80_000_000i64,
            pension_rate in 0u8..=50,
        ) {
            let mut emp = employee("0", pension_rate);
            emp.annual_salary = Decimal::new(salary_thousandths, 3);
            let br = bracket("37001", "80000", "0.325", "3572");

            let payslip = calculate_payslip(&emp, &br, march_2017()).unwrap();

            prop_assert_eq!(payslip.net_income, payslip.gross_income - payslip.income_tax);
            prop_assert!(payslip.pension_contribution <= payslip.gross_income);
        }

        #[test]
        fn prop_calculation_is_deterministic(
            salary in 0i64..1_000_000i64,
            pension_rate in 0u8..=50,
            month in 1u32..=12,
            year in 1900i32..=2100,
        ) {
            let mut emp = employee("0", pension_rate);
            emp.annual_salary = Decimal::from(salary);
            let br = bracket("0", "999999.999", "0.450", "54547");
            let period = PayPeriod::new(month, year).unwrap();

            let first = calculate_payslip(&emp, &br, period).unwrap();
            let second = calculate_payslip(&emp, &br, period).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
