//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures it is
//! built from: classified hours, wage line items, statutory taxes and the
//! audit trace recording how each figure was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round2;

/// Hours worked, split into pay categories.
///
/// Every worked hour lands in exactly one bucket, so the four totals always
/// sum to the hours on the time entries.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::HoursByType;
/// use rust_decimal::Decimal;
///
/// let hours = HoursByType {
///     regular: Decimal::new(40, 0),
///     weekend: Decimal::new(8, 0),
///     holiday: Decimal::ZERO,
///     overtime: Decimal::new(5, 0),
/// };
/// assert_eq!(hours.total(), Decimal::new(53, 0));
/// assert_eq!(hours.straight_time(), Decimal::new(48, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursByType {
    /// Straight-time hours on regular days.
    pub regular: Decimal,
    /// Straight-time hours on weekends.
    pub weekend: Decimal,
    /// Straight-time hours on holidays.
    pub holiday: Decimal,
    /// Daily and weekly overtime hours.
    pub overtime: Decimal,
}

impl HoursByType {
    /// Sum of all four buckets.
    pub fn total(&self) -> Decimal {
        self.regular + self.weekend + self.holiday + self.overtime
    }

    /// Regular, weekend and holiday hours; overtime is excluded.
    pub fn straight_time(&self) -> Decimal {
        self.regular + self.weekend + self.holiday
    }
}

/// One line on a paystub: hours in a category at that category's rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageLineItem {
    /// Hours paid on this line.
    pub hours: Decimal,
    /// Hourly rate for this line.
    pub rate: Decimal,
    /// `hours * rate`, rounded to cents.
    pub subtotal: Decimal,
}

impl WageLineItem {
    /// Builds a line item, rounding the subtotal to cents.
    pub fn new(hours: Decimal, rate: Decimal) -> Self {
        Self {
            hours,
            rate,
            subtotal: round2(hours * rate),
        }
    }
}

/// Wage line items for each pay category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagesByType {
    /// Regular hours at the base rate.
    pub regular: WageLineItem,
    /// Weekend hours at the weekend rate.
    pub weekend: WageLineItem,
    /// Holiday hours at the holiday rate.
    pub holiday: WageLineItem,
    /// Overtime hours at time-and-a-half.
    pub overtime: WageLineItem,
}

impl WagesByType {
    /// Gross wages: the sum of the already-rounded subtotals, rounded to cents.
    pub fn gross_wages(&self) -> Decimal {
        round2(
            self.regular.subtotal
                + self.weekend.subtotal
                + self.holiday.subtotal
                + self.overtime.subtotal,
        )
    }
}

/// Statutory taxes for one pay period.
///
/// Employee amounts are withheld from the caregiver's pay; employer amounts
/// are owed by the household employer on top of gross wages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    /// Employee share of Social Security.
    pub social_security_employee: Decimal,
    /// Employer share of Social Security.
    pub social_security_employer: Decimal,
    /// Employee share of Medicare.
    pub medicare_employee: Decimal,
    /// Employer share of Medicare.
    pub medicare_employer: Decimal,
    /// Federal unemployment tax (employer only).
    pub futa: Decimal,
    /// State unemployment tax (employer only).
    pub suta: Decimal,
    /// Employee share of the paid family and medical leave premium.
    pub famli_employee: Decimal,
    /// Employer share of the paid family and medical leave premium.
    pub famli_employer: Decimal,
    /// Flat state income tax withheld.
    pub state_income_tax: Decimal,
    /// Sum of all employee withholdings, rounded to cents.
    pub total_employee_withholdings: Decimal,
    /// Sum of all employer taxes, rounded to cents.
    pub total_employer_taxes: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that stakeholders should review but that do not
/// prevent the calculation from completing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of one caregiver's payroll for one pay period.
///
/// The version fields are opaque tags for audit traceability: the engine
/// version that produced the figures and the tax table version used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Identifier of the caregiver paid.
    pub caregiver_id: String,
    /// Regular, weekend and holiday hours. Overtime hours are not included.
    pub total_hours: Decimal,
    /// Classified hours.
    pub hours_by_type: HoursByType,
    /// Wage line items per category.
    pub wages_by_type: WagesByType,
    /// Gross wages for the period.
    pub gross_wages: Decimal,
    /// Statutory taxes on the gross wages.
    pub taxes: TaxCalculation,
    /// Federal income tax withheld (supplied by the caller).
    pub federal_withholding: Decimal,
    /// Gross wages less employee withholdings and federal withholding.
    pub net_pay: Decimal,
    /// Gross wages divided by the hours used for the minimum wage check.
    pub effective_hourly_rate: Decimal,
    /// Whether the effective hourly rate meets the jurisdiction minimum wage.
    pub is_minimum_wage_compliant: bool,
    /// Gross wages plus employer taxes.
    pub total_employer_cost: Decimal,
    /// Year-to-date wages including this period.
    pub ytd_wages_after: Decimal,
    /// Version of the calculation logic.
    pub calculation_version: String,
    /// Version tag of the tax tables used.
    pub tax_table_version: String,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}
