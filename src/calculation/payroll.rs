//! Payroll orchestration.
//!
//! Composes hours classification, wage computation and statutory taxes into
//! a [`PayrollResult`] for one caregiver and one pay period, recording each
//! step in the result's audit trace.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};

use crate::config::{JurisdictionConfig, MinimumWageBasis, TaxYearConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, PayrollInput, PayrollResult};

use super::day_type::DayTypeLookup;
use super::hours_classifier::classify;
use super::statutory_tax::calculate_taxes;
use super::validation::validate_payroll_input;
use super::wages::compute_wages;
use super::round2;

/// Warning code raised when the effective hourly rate is below minimum wage.
pub const MINIMUM_WAGE_NOT_MET: &str = "MINIMUM_WAGE_NOT_MET";

/// Warning code raised when overtime hours were left out of the minimum wage
/// check's hour count.
pub const OVERTIME_EXCLUDED_FROM_RATE_CHECK: &str = "OVERTIME_EXCLUDED_FROM_RATE_CHECK";

/// Read-only configuration shared by every calculation in a pay run.
#[derive(Clone, Copy)]
pub struct PayrollContext<'a> {
    /// Minimum wage, overtime rules and policy switches.
    pub jurisdiction: &'a JurisdictionConfig,
    /// Tax rates and tables for the year being paid.
    pub tax_year: &'a TaxYearConfig,
    /// Holiday and weekend calendar.
    pub calendar: &'a dyn DayTypeLookup,
}

impl<'a> PayrollContext<'a> {
    /// Creates a context.
    pub fn new(
        jurisdiction: &'a JurisdictionConfig,
        tax_year: &'a TaxYearConfig,
        calendar: &'a dyn DayTypeLookup,
    ) -> Self {
        Self {
            jurisdiction,
            tax_year,
            calendar,
        }
    }
}

/// Calculates payroll for one caregiver and one pay period.
///
/// Federal income tax withholding is taken as supplied on the input (zero
/// when absent); this function never estimates it.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the input fails validation.
/// No calculation runs in that case.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::{calculate_payroll, HolidayCalendar, PayrollContext};
/// use caregiver_payroll::config::ConfigLoader;
/// use caregiver_payroll::models::{PayrollInput, TimeEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/colorado").unwrap();
/// let calendar = HolidayCalendar::new(loader.jurisdiction().holidays.clone());
/// let context = PayrollContext::new(
///     loader.jurisdiction(),
///     loader.tax_year(2025).unwrap(),
///     &calendar,
/// );
///
/// // Monday to Wednesday, 8 hours a day
/// let entries = (10..=12)
///     .map(|d| TimeEntry::new(NaiveDate::from_ymd_opt(2025, 3, d).unwrap(), Decimal::new(8, 0)))
///     .collect();
/// let input = PayrollInput::new(
///     "cg_001",
///     entries,
///     Decimal::new(20, 0),
///     Decimal::new(2, 0),
///     Decimal::from_str("1.5").unwrap(),
/// );
///
/// let result = calculate_payroll(&input, &context).unwrap();
/// assert_eq!(result.gross_wages, Decimal::from_str("480.00").unwrap());
/// assert_eq!(result.net_pay, Decimal::from_str("420.00").unwrap());
/// assert!(result.is_minimum_wage_compliant);
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    context: &PayrollContext<'_>,
) -> EngineResult<PayrollResult> {
    validate_payroll_input(input)?;

    let jurisdiction = context.jurisdiction;
    let tax_year = context.tax_year;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: classify hours
    let hours = classify(
        &input.time_entries,
        input.disable_overtime,
        &jurisdiction.overtime,
        context.calendar,
    );
    steps.push(AuditStep {
        step_number,
        rule_id: "hours_classification".to_string(),
        rule_name: "Hours Classification".to_string(),
        input: json!({
            "entry_count": input.time_entries.len(),
            "total_entry_hours": input.total_entry_hours(),
            "disable_overtime": input.disable_overtime,
            "daily_threshold_hours": jurisdiction.overtime.daily_threshold_hours,
            "weekly_threshold_hours": jurisdiction.overtime.weekly_threshold_hours,
        }),
        output: json!(hours),
        reasoning: if input.disable_overtime {
            "Overtime disabled; hours bucketed by day type only".to_string()
        } else {
            format!(
                "Bucketed by day type; {} overtime hours from daily and weekly thresholds",
                hours.overtime
            )
        },
    });
    step_number += 1;

    // Step 2: wage line items
    let wages = compute_wages(
        &hours,
        input.base_hourly_rate,
        input.holiday_multiplier,
        input.weekend_multiplier,
    );
    let gross_wages = wages.gross_wages();
    steps.push(AuditStep {
        step_number,
        rule_id: "wage_computation".to_string(),
        rule_name: "Differential Wages".to_string(),
        input: json!({
            "base_hourly_rate": input.base_hourly_rate,
            "holiday_multiplier": input.holiday_multiplier,
            "weekend_multiplier": input.weekend_multiplier,
        }),
        output: json!({
            "wages_by_type": wages,
            "gross_wages": gross_wages,
        }),
        reasoning: format!("Sum of rounded line subtotals = ${}", gross_wages),
    });
    step_number += 1;

    // Step 3: minimum wage check
    let total_hours = hours.straight_time();
    let rate_hours = match jurisdiction.minimum_wage_basis {
        MinimumWageBasis::ExcludeOvertimeHours => total_hours,
        MinimumWageBasis::IncludeOvertimeHours => hours.total(),
    };
    let effective_rate = if rate_hours > Decimal::ZERO {
        gross_wages / rate_hours
    } else {
        input.base_hourly_rate
    };
    let is_minimum_wage_compliant = effective_rate >= jurisdiction.minimum_hourly_wage;
    let effective_hourly_rate = round2(effective_rate);

    steps.push(AuditStep {
        step_number,
        rule_id: "minimum_wage_check".to_string(),
        rule_name: "Minimum Wage Compliance".to_string(),
        input: json!({
            "gross_wages": gross_wages,
            "hours": rate_hours,
            "basis": jurisdiction.minimum_wage_basis,
            "minimum_hourly_wage": jurisdiction.minimum_hourly_wage,
        }),
        output: json!({
            "effective_hourly_rate": effective_hourly_rate,
            "is_compliant": is_minimum_wage_compliant,
        }),
        reasoning: format!(
            "${}/hr effective vs ${}/hr minimum in {}",
            effective_hourly_rate, jurisdiction.minimum_hourly_wage, jurisdiction.code
        ),
    });
    step_number += 1;

    if !is_minimum_wage_compliant {
        warn!(
            caregiver_id = %input.caregiver_id,
            effective_hourly_rate = %effective_hourly_rate,
            minimum_hourly_wage = %jurisdiction.minimum_hourly_wage,
            "Effective hourly rate below minimum wage"
        );
        warnings.push(AuditWarning {
            code: MINIMUM_WAGE_NOT_MET.to_string(),
            message: format!(
                "Effective rate ${}/hr is below the {} minimum wage of ${}/hr",
                effective_hourly_rate, jurisdiction.name, jurisdiction.minimum_hourly_wage
            ),
            severity: "high".to_string(),
        });
    }
    if jurisdiction.minimum_wage_basis == MinimumWageBasis::ExcludeOvertimeHours
        && hours.overtime > Decimal::ZERO
    {
        warnings.push(AuditWarning {
            code: OVERTIME_EXCLUDED_FROM_RATE_CHECK.to_string(),
            message: format!(
                "{} overtime hours were excluded from the minimum wage hour count; \
                 the effective rate includes overtime pay",
                hours.overtime
            ),
            severity: "low".to_string(),
        });
    }

    // Step 4: statutory taxes
    let ytd_wages_before = input.ytd_wages_before.unwrap_or(Decimal::ZERO);
    let taxes = calculate_taxes(gross_wages, ytd_wages_before, &tax_year.rates);
    steps.push(AuditStep {
        step_number,
        rule_id: "statutory_taxes".to_string(),
        rule_name: "Statutory Payroll Taxes".to_string(),
        input: json!({
            "gross_wages": gross_wages,
            "ytd_wages_before": ytd_wages_before,
            "tax_year": tax_year.tax_year,
            "tax_table_version": tax_year.version,
        }),
        output: json!(taxes),
        reasoning: format!(
            "Employee withholdings ${}, employer taxes ${}",
            taxes.total_employee_withholdings, taxes.total_employer_taxes
        ),
    });
    step_number += 1;

    // Step 5: net pay
    let federal_withholding = input.federal_withholding_amount.unwrap_or(Decimal::ZERO);
    let net_pay = round2(gross_wages - taxes.total_employee_withholdings - federal_withholding);
    steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: json!({
            "gross_wages": gross_wages,
            "total_employee_withholdings": taxes.total_employee_withholdings,
            "federal_withholding": federal_withholding,
        }),
        output: json!({ "net_pay": net_pay }),
        reasoning: format!(
            "${} - ${} - ${} = ${}",
            gross_wages, taxes.total_employee_withholdings, federal_withholding, net_pay
        ),
    });

    let total_employer_cost = round2(gross_wages + taxes.total_employer_taxes);
    let ytd_wages_after = ytd_wages_before + gross_wages;

    info!(
        caregiver_id = %input.caregiver_id,
        gross_wages = %gross_wages,
        net_pay = %net_pay,
        is_minimum_wage_compliant,
        "Calculated payroll"
    );

    Ok(PayrollResult {
        caregiver_id: input.caregiver_id.clone(),
        total_hours,
        hours_by_type: hours,
        wages_by_type: wages,
        gross_wages,
        taxes,
        federal_withholding,
        net_pay,
        effective_hourly_rate,
        is_minimum_wage_compliant,
        total_employer_cost,
        ytd_wages_after,
        calculation_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_table_version: tax_year.version.clone(),
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Calculates payroll for several caregivers sharing one context.
///
/// Each input is calculated independently. The batch is all-or-nothing: the
/// first invalid input rejects it, with `inputs[i].` prefixed to the error's
/// field path.
pub fn calculate_multi_caregiver_payroll(
    inputs: &[PayrollInput],
    context: &PayrollContext<'_>,
) -> EngineResult<Vec<PayrollResult>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            calculate_payroll(input, context).map_err(|e| match e {
                EngineError::InvalidInput { field, message } => EngineError::InvalidInput {
                    field: format!("inputs[{}].{}", i, field),
                    message,
                },
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::HolidayCalendar;
    use crate::config::ConfigLoader;
    use crate::models::{DayType, TimeEntry};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn entry(date_str: &str, hours: &str) -> TimeEntry {
        TimeEntry::new(make_date(date_str), dec(hours))
    }

    fn input(entries: Vec<TimeEntry>) -> PayrollInput {
        PayrollInput::new("cg_001", entries, dec("20"), dec("2"), dec("1.5"))
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::load("config/colorado").unwrap()
    }

    fn run(loader: &ConfigLoader, input: &PayrollInput) -> EngineResult<PayrollResult> {
        let calendar = HolidayCalendar::new(loader.jurisdiction().holidays.clone());
        let context = PayrollContext::new(
            loader.jurisdiction(),
            loader.tax_year(2025).unwrap(),
            &calendar,
        );
        calculate_payroll(input, &context)
    }

    fn has_warning(result: &PayrollResult, code: &str) -> bool {
        result.audit_trace.warnings.iter().any(|w| w.code == code)
    }

    // ==========================================================================
    // PR-001: three weekdays, 8 hours each, $20/hr
    // ==========================================================================
    #[test]
    fn test_pr_001_regular_week() {
        let loader = loader();
        let result = run(
            &loader,
            &input(vec![
                entry("2025-03-10", "8"),
                entry("2025-03-11", "8"),
                entry("2025-03-12", "8"),
            ]),
        )
        .unwrap();

        assert_eq!(result.hours_by_type.regular, dec("24"));
        assert_eq!(result.hours_by_type.overtime, Decimal::ZERO);
        assert_eq!(result.total_hours, dec("24"));
        assert_eq!(result.gross_wages, dec("480.00"));
        // SS 29.76 + Medicare 6.96 + FAMLI 2.16 + state 21.12
        assert_eq!(result.taxes.total_employee_withholdings, dec("60.00"));
        assert_eq!(result.net_pay, dec("420.00"));
        // SS 29.76 + Medicare 6.96 + FUTA 2.88 + SUTA 8.16 + FAMLI 2.16
        assert_eq!(result.taxes.total_employer_taxes, dec("49.92"));
        assert_eq!(result.total_employer_cost, dec("529.92"));
        assert_eq!(result.effective_hourly_rate, dec("20.00"));
        assert!(result.is_minimum_wage_compliant);
        assert!(result.audit_trace.warnings.is_empty());
    }

    // ==========================================================================
    // PR-002: daily overtime is flagged as excluded from the rate check
    // ==========================================================================
    #[test]
    fn test_pr_002_overtime_excluded_from_effective_rate() {
        let loader = loader();
        let result = run(&loader, &input(vec![entry("2025-03-10", "13")])).unwrap();

        assert_eq!(result.hours_by_type.regular, dec("12"));
        assert_eq!(result.hours_by_type.overtime, dec("1"));
        // 240.00 + 30.00
        assert_eq!(result.gross_wages, dec("270.00"));
        assert_eq!(result.total_hours, dec("12"));
        // 270 / 12
        assert_eq!(result.effective_hourly_rate, dec("22.50"));
        assert!(has_warning(&result, OVERTIME_EXCLUDED_FROM_RATE_CHECK));
    }

    #[test]
    fn test_include_overtime_hours_basis() {
        let loader = loader();
        let calendar = HolidayCalendar::default();
        let mut jurisdiction = loader.jurisdiction().clone();
        jurisdiction.minimum_wage_basis = MinimumWageBasis::IncludeOvertimeHours;

        let context =
            PayrollContext::new(&jurisdiction, loader.tax_year(2025).unwrap(), &calendar);
        let result =
            calculate_payroll(&input(vec![entry("2025-03-10", "13")]), &context).unwrap();

        // 270 / 13 = 20.769...
        assert_eq!(result.effective_hourly_rate, dec("20.77"));
        assert_eq!(result.total_hours, dec("12"));
        assert!(!has_warning(&result, OVERTIME_EXCLUDED_FROM_RATE_CHECK));
    }

    // ==========================================================================
    // PR-003: below minimum wage
    // ==========================================================================
    #[test]
    fn test_pr_003_minimum_wage_not_met() {
        let loader = loader();
        let mut low = input(vec![entry("2025-03-10", "8")]);
        low.base_hourly_rate = dec("12");

        let result = run(&loader, &low).unwrap();

        assert_eq!(result.effective_hourly_rate, dec("12.00"));
        assert!(!result.is_minimum_wage_compliant);
        assert!(has_warning(&result, MINIMUM_WAGE_NOT_MET));
    }

    #[test]
    fn test_exactly_minimum_wage_is_compliant() {
        let loader = loader();
        let mut at_minimum = input(vec![entry("2025-03-10", "8")]);
        at_minimum.base_hourly_rate = dec("14.81");

        let result = run(&loader, &at_minimum).unwrap();
        assert!(result.is_minimum_wage_compliant);
    }

    // ==========================================================================
    // PR-004: no entries falls back to the base rate
    // ==========================================================================
    #[test]
    fn test_pr_004_no_entries() {
        let loader = loader();
        let result = run(&loader, &input(vec![])).unwrap();

        assert_eq!(result.total_hours, Decimal::ZERO);
        assert_eq!(result.gross_wages, Decimal::ZERO);
        assert_eq!(result.net_pay, Decimal::ZERO);
        assert_eq!(result.effective_hourly_rate, dec("20.00"));
        assert!(result.is_minimum_wage_compliant);
    }

    // ==========================================================================
    // PR-005: supplied federal withholding and year-to-date wages
    // ==========================================================================
    #[test]
    fn test_pr_005_federal_withholding_and_ytd() {
        let loader = loader();
        let mut with_fw = input(vec![
            entry("2025-03-10", "8"),
            entry("2025-03-11", "8"),
            entry("2025-03-12", "8"),
        ]);
        with_fw.federal_withholding_amount = Some(dec("50"));
        with_fw.ytd_wages_before = Some(dec("10000"));

        let result = run(&loader, &with_fw).unwrap();

        assert_eq!(result.federal_withholding, dec("50"));
        // FUTA base exhausted; SUTA base not yet
        assert_eq!(result.taxes.futa, Decimal::ZERO);
        assert_eq!(result.taxes.suta, dec("8.16"));
        assert_eq!(result.net_pay, dec("370.00"));
        assert_eq!(result.ytd_wages_after, dec("10480.00"));
    }

    // ==========================================================================
    // PR-006: holiday hours on Independence Day
    // ==========================================================================
    #[test]
    fn test_pr_006_holiday_rate_from_calendar() {
        let loader = loader();
        let result = run(&loader, &input(vec![entry("2025-07-04", "8")])).unwrap();

        assert_eq!(result.hours_by_type.holiday, dec("8"));
        assert_eq!(result.wages_by_type.holiday.rate, dec("40.00"));
        assert_eq!(result.gross_wages, dec("320.00"));
    }

    #[test]
    fn test_closure_calendar() {
        let loader = loader();
        let everything_holiday = |_: NaiveDate| DayType::Holiday;
        let context = PayrollContext::new(
            loader.jurisdiction(),
            loader.tax_year(2025).unwrap(),
            &everything_holiday,
        );

        let result = calculate_payroll(&input(vec![entry("2025-03-10", "2")]), &context).unwrap();
        assert_eq!(result.hours_by_type.holiday, dec("2"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let loader = loader();
        let result = run(&loader, &input(vec![entry("2025-03-10", "-4")]));

        match result {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "time_entries[0].hours")
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    // ==========================================================================
    // PR-008: out-of-range magnitudes are rejected before any arithmetic
    // ==========================================================================
    #[test]
    fn test_pr_008_huge_hours_and_rate_rejected() {
        let loader = loader();
        let mut huge = input(vec![entry("2025-03-10", "1000000000000000")]);
        huge.base_hourly_rate = dec("100000000000000");

        match run(&loader, &huge) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "time_entries[0].hours")
            }
            _ => panic!("Expected InvalidInput error"),
        }

        huge.time_entries[0].hours = dec("8");
        match run(&loader, &huge) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "base_hourly_rate"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_pr_008_ceilings_compute() {
        let loader = loader();
        let days: Vec<TimeEntry> = (10..24)
            .map(|day| entry(&format!("2025-03-{}", day), "24"))
            .collect();
        let mut input = PayrollInput::new(
            "cg_001",
            days,
            crate::calculation::MAX_HOURLY_RATE,
            crate::calculation::MAX_RATE_MULTIPLIER,
            crate::calculation::MAX_RATE_MULTIPLIER,
        );
        input.ytd_wages_before = Some(crate::calculation::MAX_AMOUNT);

        let result = run(&loader, &input).unwrap();
        assert_eq!(result.total_hours, dec("336"));
        assert!(result.gross_wages > Decimal::ZERO);
    }

    #[test]
    fn test_versions_recorded() {
        let loader = loader();
        let result = run(&loader, &input(vec![entry("2025-03-10", "8")])).unwrap();

        assert_eq!(result.calculation_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.tax_table_version, "2025.1");
    }

    #[test]
    fn test_audit_steps_sequential() {
        let loader = loader();
        let result = run(&loader, &input(vec![entry("2025-03-10", "8")])).unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "hours_classification",
                "wage_computation",
                "minimum_wage_check",
                "statutory_taxes",
                "net_pay"
            ]
        );
        for (i, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    // ==========================================================================
    // PR-007: batch payroll
    // ==========================================================================
    #[test]
    fn test_pr_007_batch_independent() {
        let loader = loader();
        let calendar = HolidayCalendar::new(loader.jurisdiction().holidays.clone());
        let context = PayrollContext::new(
            loader.jurisdiction(),
            loader.tax_year(2025).unwrap(),
            &calendar,
        );

        let first = input(vec![entry("2025-03-10", "8")]);
        let mut second = input(vec![entry("2025-03-15", "8")]);
        second.caregiver_id = "cg_002".to_string();

        let results = calculate_multi_caregiver_payroll(&[first.clone(), second], &context).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].caregiver_id, "cg_001");
        assert_eq!(results[0].gross_wages, dec("160.00"));
        assert_eq!(results[1].caregiver_id, "cg_002");
        assert_eq!(results[1].gross_wages, dec("240.00"));
        assert_eq!(results[0], calculate_payroll(&first, &context).unwrap());
    }

    #[test]
    fn test_batch_error_carries_index() {
        let loader = loader();
        let calendar = HolidayCalendar::default();
        let context = PayrollContext::new(
            loader.jurisdiction(),
            loader.tax_year(2025).unwrap(),
            &calendar,
        );

        let mut bad = input(vec![entry("2025-03-10", "8")]);
        bad.base_hourly_rate = dec("-1");

        let result = calculate_multi_caregiver_payroll(
            &[input(vec![entry("2025-03-10", "8")]), bad],
            &context,
        );

        match result {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "inputs[1].base_hourly_rate")
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_empty_batch() {
        let loader = loader();
        let calendar = HolidayCalendar::default();
        let context = PayrollContext::new(
            loader.jurisdiction(),
            loader.tax_year(2025).unwrap(),
            &calendar,
        );

        assert!(calculate_multi_caregiver_payroll(&[], &context).unwrap().is_empty());
    }
}
