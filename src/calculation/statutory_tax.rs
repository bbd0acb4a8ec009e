//! Statutory payroll tax calculation.
//!
//! Computes the employee and employer shares of each payroll tax for one pay
//! period. Capped taxes (Social Security, FUTA, SUTA) only apply to wages
//! under the annual wage base remaining after year-to-date wages; uncapped
//! taxes (Medicare, FAMLI, flat state income tax) apply to every dollar.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRates;
use crate::models::TaxCalculation;

use super::round2;

/// Wages still subject to a capped tax this period.
///
/// `min(gross_wages, max(0, wage_base - ytd_wages_before))`.
pub fn taxable_wages_under_cap(
    gross_wages: Decimal,
    ytd_wages_before: Decimal,
    wage_base: Decimal,
) -> Decimal {
    let remaining_cap = (wage_base - ytd_wages_before).max(Decimal::ZERO);
    gross_wages.min(remaining_cap)
}

/// Tax on wages up to a wage base, rounded to cents.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::capped_tax;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
///
/// // Only 4,100 of the 5,000 remains under the 176,100 wage base
/// let tax = capped_tax(dec("5000"), dec("172000"), dec("176100"), dec("0.062"));
/// assert_eq!(tax, dec("254.20"));
/// ```
pub fn capped_tax(
    gross_wages: Decimal,
    ytd_wages_before: Decimal,
    wage_base: Decimal,
    rate: Decimal,
) -> Decimal {
    round2(taxable_wages_under_cap(gross_wages, ytd_wages_before, wage_base) * rate)
}

/// Tax on every dollar of wages, rounded to cents.
pub fn uncapped_tax(gross_wages: Decimal, rate: Decimal) -> Decimal {
    round2(gross_wages * rate)
}

/// Calculates all statutory taxes for one pay period.
///
/// Negative inputs are a caller contract violation; they are clamped to
/// zero rather than raising, so this function never fails.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::calculate_taxes;
/// use caregiver_payroll::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/colorado").unwrap();
/// let rates = &loader.tax_year(2025).unwrap().rates;
///
/// let taxes = calculate_taxes(Decimal::from_str("1000.00").unwrap(), Decimal::ZERO, rates);
/// assert_eq!(taxes.social_security_employee, Decimal::from_str("62.00").unwrap());
/// assert_eq!(taxes.medicare_employee, Decimal::from_str("14.50").unwrap());
/// ```
pub fn calculate_taxes(
    gross_wages: Decimal,
    ytd_wages_before: Decimal,
    rates: &TaxRates,
) -> TaxCalculation {
    let gross = gross_wages.max(Decimal::ZERO);
    let ytd = ytd_wages_before.max(Decimal::ZERO);

    let social_security_employee = capped_tax(
        gross,
        ytd,
        rates.social_security_wage_base,
        rates.social_security_employee_rate,
    );
    let social_security_employer = capped_tax(
        gross,
        ytd,
        rates.social_security_wage_base,
        rates.social_security_employer_rate,
    );
    let futa = capped_tax(gross, ytd, rates.futa_wage_base, rates.futa_rate);
    let suta = capped_tax(gross, ytd, rates.suta_wage_base, rates.suta_rate);

    let medicare_employee = uncapped_tax(gross, rates.medicare_employee_rate);
    let medicare_employer = uncapped_tax(gross, rates.medicare_employer_rate);
    let famli_employee = uncapped_tax(gross, rates.famli_employee_rate);
    let famli_employer = uncapped_tax(gross, rates.famli_employer_rate);
    let state_income_tax = uncapped_tax(gross, rates.state_income_tax_rate);

    let total_employee_withholdings =
        round2(social_security_employee + medicare_employee + famli_employee + state_income_tax);
    let total_employer_taxes = round2(
        social_security_employer + medicare_employer + futa + suta + famli_employer,
    );

    debug!(
        gross_wages = %gross,
        ytd_wages_before = %ytd,
        total_employee_withholdings = %total_employee_withholdings,
        total_employer_taxes = %total_employer_taxes,
        "Calculated statutory taxes"
    );

    TaxCalculation {
        social_security_employee,
        social_security_employer,
        medicare_employee,
        medicare_employer,
        futa,
        suta,
        famli_employee,
        famli_employer,
        state_income_tax,
        total_employee_withholdings,
        total_employer_taxes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> TaxRates {
        TaxRates {
            social_security_employee_rate: dec("0.062"),
            social_security_employer_rate: dec("0.062"),
            social_security_wage_base: dec("176100"),
            medicare_employee_rate: dec("0.0145"),
            medicare_employer_rate: dec("0.0145"),
            futa_rate: dec("0.006"),
            futa_wage_base: dec("7000"),
            suta_rate: dec("0.017"),
            suta_wage_base: dec("27200"),
            famli_employee_rate: dec("0.0045"),
            famli_employer_rate: dec("0.0045"),
            state_income_tax_rate: dec("0.044"),
        }
    }

    // ==========================================================================
    // ST-001: $1,000 with no prior wages
    // ==========================================================================
    #[test]
    fn test_st_001_first_paycheck_of_year() {
        let taxes = calculate_taxes(dec("1000"), Decimal::ZERO, &rates());

        assert_eq!(taxes.social_security_employee, dec("62.00"));
        assert_eq!(taxes.social_security_employer, dec("62.00"));
        assert_eq!(taxes.medicare_employee, dec("14.50"));
        assert_eq!(taxes.medicare_employer, dec("14.50"));
        assert_eq!(taxes.futa, dec("6.00"));
        assert_eq!(taxes.suta, dec("17.00"));
        assert_eq!(taxes.famli_employee, dec("4.50"));
        assert_eq!(taxes.famli_employer, dec("4.50"));
        assert_eq!(taxes.state_income_tax, dec("44.00"));
        // 62 + 14.50 + 4.50 + 44
        assert_eq!(taxes.total_employee_withholdings, dec("125.00"));
        // 62 + 14.50 + 6 + 17 + 4.50
        assert_eq!(taxes.total_employer_taxes, dec("104.00"));
    }

    // ==========================================================================
    // ST-002: Social Security crossing the wage base mid-period
    // ==========================================================================
    #[test]
    fn test_st_002_social_security_partially_capped() {
        let taxes = calculate_taxes(dec("5000"), dec("172000"), &rates());

        // min(5000, 176100 - 172000) = 4100 * 0.062
        assert_eq!(taxes.social_security_employee, dec("254.20"));
        assert_eq!(taxes.social_security_employer, dec("254.20"));
        // Medicare is uncapped
        assert_eq!(taxes.medicare_employee, dec("72.50"));
        // FUTA and SUTA bases long exhausted
        assert_eq!(taxes.futa, Decimal::ZERO);
        assert_eq!(taxes.suta, Decimal::ZERO);
    }

    // ==========================================================================
    // ST-003: exactly at the cap, capped taxes are zero
    // ==========================================================================
    #[test]
    fn test_st_003_exactly_at_wage_base() {
        let taxes = calculate_taxes(dec("800"), dec("176100"), &rates());

        assert_eq!(taxes.social_security_employee, Decimal::ZERO);
        assert_eq!(taxes.social_security_employer, Decimal::ZERO);
        assert_eq!(taxes.medicare_employee, dec("11.60"));
    }

    // ==========================================================================
    // ST-004: FUTA crossing its $7,000 base
    // ==========================================================================
    #[test]
    fn test_st_004_futa_partially_capped() {
        let taxes = calculate_taxes(dec("1200"), dec("6500"), &rates());

        // 500 * 0.006
        assert_eq!(taxes.futa, dec("3.00"));
        // SUTA base not reached: 1200 * 0.017
        assert_eq!(taxes.suta, dec("20.40"));
    }

    // ==========================================================================
    // ST-005: zero gross wages
    // ==========================================================================
    #[test]
    fn test_st_005_zero_gross_all_zero() {
        let taxes = calculate_taxes(Decimal::ZERO, dec("1000"), &rates());
        assert_eq!(taxes, TaxCalculation::default());
    }

    // ==========================================================================
    // ST-006: one cent of gross wages
    // ==========================================================================
    #[test]
    fn test_st_006_one_cent_rounds_to_zero() {
        let taxes = calculate_taxes(dec("0.01"), Decimal::ZERO, &rates());

        // 0.01 * 0.062 = 0.00062 -> 0.00
        assert_eq!(taxes.social_security_employee, Decimal::ZERO);
        assert_eq!(taxes.medicare_employee, Decimal::ZERO);
        assert_eq!(taxes.state_income_tax, Decimal::ZERO);
        assert_eq!(taxes.total_employee_withholdings, Decimal::ZERO);
        assert_eq!(taxes.total_employer_taxes, Decimal::ZERO);
    }

    #[test]
    fn test_aggregates_sum_rounded_components() {
        // 333.33 gross: SS 20.67, Medicare 4.83, FAMLI 1.50, state 14.67
        let taxes = calculate_taxes(dec("333.33"), Decimal::ZERO, &rates());

        assert_eq!(taxes.social_security_employee, dec("20.67"));
        assert_eq!(taxes.medicare_employee, dec("4.83"));
        assert_eq!(taxes.famli_employee, dec("1.50"));
        assert_eq!(taxes.state_income_tax, dec("14.67"));
        assert_eq!(taxes.total_employee_withholdings, dec("41.67"));
    }

    #[test]
    fn test_negative_inputs_clamped_to_zero() {
        let taxes = calculate_taxes(dec("-100"), Decimal::ZERO, &rates());
        assert_eq!(taxes, TaxCalculation::default());

        let clamped = calculate_taxes(dec("100"), dec("-5000"), &rates());
        let baseline = calculate_taxes(dec("100"), Decimal::ZERO, &rates());
        assert_eq!(clamped, baseline);
    }

    #[test]
    fn test_capped_tax_monotonic_in_ytd() {
        let mut previous = capped_tax(dec("3000"), Decimal::ZERO, dec("7000"), dec("0.006"));
        for ytd in ["1000", "4000", "5500", "6999.99", "7000", "9000"] {
            let tax = capped_tax(dec("3000"), dec(ytd), dec("7000"), dec("0.006"));
            assert!(tax <= previous, "tax increased at ytd {}", ytd);
            previous = tax;
        }
        assert_eq!(previous, Decimal::ZERO);
    }

    #[test]
    fn test_taxable_wages_under_cap() {
        assert_eq!(
            taxable_wages_under_cap(dec("5000"), dec("172000"), dec("176100")),
            dec("4100")
        );
        assert_eq!(
            taxable_wages_under_cap(dec("5000"), dec("180000"), dec("176100")),
            Decimal::ZERO
        );
        assert_eq!(
            taxable_wages_under_cap(dec("5000"), Decimal::ZERO, dec("176100")),
            dec("5000")
        );
    }
}
