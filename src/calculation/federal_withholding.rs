//! Federal income tax withholding estimation.
//!
//! Estimates per-paycheck federal withholding with the annualized percentage
//! method: the period's pay is annualized, adjusted by the caregiver's W-4
//! elections, run through the progressive rate schedule for their filing
//! status and divided back into pay periods.
//!
//! This estimator is independent of the statutory tax calculation; the
//! payroll orchestrator does not call it. Callers wire its result into
//! [`PayrollInput::federal_withholding_amount`](crate::models::PayrollInput).
//!
//! ## Multiple jobs
//!
//! How the W-4 Step 2 "multiple jobs" box changes the calculation is a
//! policy decision, injected as a [`MultipleJobsPolicy`]. The default,
//! [`IgnoreMultipleJobs`], leaves the calculation unchanged.

use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{FederalWithholdingTable, TaxBracket, TaxRates, TaxYearConfig};
use crate::error::EngineResult;
use crate::models::{PayFrequency, W4Information, WithholdingResult};

use super::statutory_tax::{capped_tax, uncapped_tax};
use super::validation::{MAX_AMOUNT, ensure_within, validate_w4};
use super::round2;

/// Chooses the standard deduction and rate schedule for a W-4.
///
/// Implementations decide what the `multiple_jobs` election does.
pub trait MultipleJobsPolicy: Send + Sync {
    /// Short identifier recorded in logs.
    fn name(&self) -> &'static str;

    /// Annual standard deduction to subtract from adjusted wages.
    fn standard_deduction(&self, w4: &W4Information, table: &FederalWithholdingTable) -> Decimal;

    /// Rate schedule to apply to taxable income.
    fn schedule<'t>(
        &self,
        w4: &W4Information,
        table: &'t FederalWithholdingTable,
    ) -> Cow<'t, [TaxBracket]>;
}

/// Ignores the `multiple_jobs` election entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreMultipleJobs;

impl MultipleJobsPolicy for IgnoreMultipleJobs {
    fn name(&self) -> &'static str {
        "ignore_multiple_jobs"
    }

    fn standard_deduction(&self, w4: &W4Information, table: &FederalWithholdingTable) -> Decimal {
        table.standard_deduction(w4.filing_status)
    }

    fn schedule<'t>(
        &self,
        w4: &W4Information,
        table: &'t FederalWithholdingTable,
    ) -> Cow<'t, [TaxBracket]> {
        Cow::Borrowed(table.schedule(w4.filing_status))
    }
}

/// W-4 Step 2(c) checkbox schedule: when `multiple_jobs` is set, the
/// standard deduction and every bracket threshold are halved.
#[derive(Debug, Clone, Copy, Default)]
pub struct HigherWithholdingSchedule;

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

impl MultipleJobsPolicy for HigherWithholdingSchedule {
    fn name(&self) -> &'static str {
        "higher_withholding_schedule"
    }

    fn standard_deduction(&self, w4: &W4Information, table: &FederalWithholdingTable) -> Decimal {
        let deduction = table.standard_deduction(w4.filing_status);
        if w4.multiple_jobs {
            deduction * HALF
        } else {
            deduction
        }
    }

    fn schedule<'t>(
        &self,
        w4: &W4Information,
        table: &'t FederalWithholdingTable,
    ) -> Cow<'t, [TaxBracket]> {
        let schedule = table.schedule(w4.filing_status);
        if !w4.multiple_jobs {
            return Cow::Borrowed(schedule);
        }
        Cow::Owned(
            schedule
                .iter()
                .map(|b| TaxBracket {
                    lower: b.lower * HALF,
                    upper: b.upper.map(|u| u * HALF),
                    rate: b.rate,
                })
                .collect(),
        )
    }
}

/// Sums `bracket width * rate` for every bracket below `taxable_income`.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::progressive_tax;
/// use caregiver_payroll::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = [
///     TaxBracket { lower: Decimal::ZERO, upper: Some(Decimal::new(10000, 0)), rate: Decimal::new(10, 2) },
///     TaxBracket { lower: Decimal::new(10000, 0), upper: None, rate: Decimal::new(20, 2) },
/// ];
///
/// // 10,000 at 10% + 5,000 at 20%
/// assert_eq!(progressive_tax(Decimal::new(15000, 0), &brackets), Decimal::new(2000, 0));
/// ```
pub fn progressive_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    brackets
        .iter()
        .take_while(|b| taxable_income > b.lower)
        .map(|b| {
            let top = b.upper.map_or(taxable_income, |u| u.min(taxable_income));
            (top - b.lower) * b.rate
        })
        .sum()
}

/// Estimates federal withholding and employee FICA for a paycheck.
///
/// Holds only borrowed, immutable configuration, so one estimator can be
/// shared freely across calculations.
pub struct FederalWithholdingEstimator<'a> {
    table: &'a FederalWithholdingTable,
    rates: &'a TaxRates,
    multiple_jobs: &'a dyn MultipleJobsPolicy,
}

impl<'a> FederalWithholdingEstimator<'a> {
    /// Creates an estimator using [`IgnoreMultipleJobs`].
    pub fn new(table: &'a FederalWithholdingTable, rates: &'a TaxRates) -> Self {
        Self {
            table,
            rates,
            multiple_jobs: &IgnoreMultipleJobs,
        }
    }

    /// Creates an estimator from one tax year's tables.
    pub fn for_tax_year(tax_year: &'a TaxYearConfig) -> Self {
        Self::new(&tax_year.federal, &tax_year.rates)
    }

    /// Replaces the multiple jobs policy.
    pub fn with_multiple_jobs_policy(mut self, policy: &'a dyn MultipleJobsPolicy) -> Self {
        self.multiple_jobs = policy;
        self
    }

    /// Taxable income and annual tax for adjusted annual wages.
    fn annual_tax(&self, adjusted_annual_wages: Decimal, w4: &W4Information) -> (Decimal, Decimal) {
        let standard_deduction = self.multiple_jobs.standard_deduction(w4, self.table);
        let taxable_income = (adjusted_annual_wages - standard_deduction - w4.dependents_amount)
            .max(Decimal::ZERO);
        let schedule = self.multiple_jobs.schedule(w4, self.table);
        (taxable_income, progressive_tax(taxable_income, &schedule))
    }

    /// Calculates withholding for one paycheck.
    ///
    /// Social Security respects the annual wage base given `ytd_wages_before`;
    /// Medicare is uncapped.
    ///
    /// # Example
    ///
    /// ```
    /// use caregiver_payroll::calculation::FederalWithholdingEstimator;
    /// use caregiver_payroll::config::ConfigLoader;
    /// use caregiver_payroll::models::{FilingStatus, PayFrequency, W4Information};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let loader = ConfigLoader::load("config/colorado").unwrap();
    /// let estimator = FederalWithholdingEstimator::for_tax_year(loader.tax_year(2025).unwrap());
    ///
    /// let result = estimator
    ///     .calculate_withholding(
    ///         Decimal::new(2000, 0),
    ///         PayFrequency::Biweekly,
    ///         &W4Information::new(FilingStatus::Single),
    ///         Decimal::ZERO,
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(result.federal_withholding, Decimal::from_str("161.60").unwrap());
    /// assert_eq!(result.total_fica, Decimal::from_str("153.00").unwrap());
    /// assert_eq!(result.net_pay, Decimal::from_str("1685.40").unwrap());
    /// ```
    pub fn calculate_withholding(
        &self,
        gross_pay: Decimal,
        pay_frequency: PayFrequency,
        w4: &W4Information,
        ytd_wages_before: Decimal,
    ) -> EngineResult<WithholdingResult> {
        ensure_within("gross_pay", gross_pay, MAX_AMOUNT)?;
        ensure_within("ytd_wages_before", ytd_wages_before, MAX_AMOUNT)?;
        validate_w4(w4)?;

        let periods = Decimal::from(pay_frequency.periods_per_year());
        let annual_wages = gross_pay * periods;
        let adjusted_annual_wages = annual_wages + w4.other_income - w4.deductions;
        let (taxable_income, annual_tax) = self.annual_tax(adjusted_annual_wages, w4);

        let per_period_tax = if taxable_income.is_zero() {
            Decimal::ZERO
        } else {
            round2(annual_tax / periods)
        };
        let federal_withholding = (per_period_tax + w4.extra_withholding).max(Decimal::ZERO);

        let social_security_withholding = capped_tax(
            gross_pay,
            ytd_wages_before,
            self.rates.social_security_wage_base,
            self.rates.social_security_employee_rate,
        );
        let medicare_withholding = uncapped_tax(gross_pay, self.rates.medicare_employee_rate);
        let total_fica = social_security_withholding + medicare_withholding;
        let net_pay = round2(gross_pay - federal_withholding - total_fica);

        debug!(
            filing_status = %w4.filing_status,
            policy = self.multiple_jobs.name(),
            annual_wages = %annual_wages,
            taxable_income = %taxable_income,
            annual_tax = %annual_tax,
            federal_withholding = %federal_withholding,
            "Estimated federal withholding"
        );

        Ok(WithholdingResult {
            gross_pay,
            federal_withholding,
            social_security_withholding,
            medicare_withholding,
            total_fica,
            net_pay,
        })
    }

    /// Projects annual federal income tax for a year-end estimate.
    ///
    /// `gross_annual_wages` is used directly as the adjusted annual figure;
    /// no pay-period conversion happens.
    pub fn estimate_annual_tax(
        &self,
        gross_annual_wages: Decimal,
        w4: &W4Information,
    ) -> EngineResult<Decimal> {
        ensure_within("gross_annual_wages", gross_annual_wages, MAX_AMOUNT)?;
        validate_w4(w4)?;

        let (_, annual_tax) = self.annual_tax(gross_annual_wages, w4);
        Ok(round2(annual_tax))
    }
}
