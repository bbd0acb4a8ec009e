//! W-4 elections, pay frequency and withholding result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Federal filing status as elected on Form W-4.
///
/// `Single` also covers married-filing-separately, which shares the single
/// standard deduction and rate schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single or married filing separately.
    Single,
    /// Married filing jointly (or qualifying surviving spouse).
    Married,
    /// Head of household.
    HeadOfHousehold,
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::Single => write!(f, "single"),
            FilingStatus::Married => write!(f, "married"),
            FilingStatus::HeadOfHousehold => write!(f, "head_of_household"),
        }
    }
}

/// How often a caregiver is paid.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::PayFrequency;
///
/// assert_eq!(PayFrequency::Biweekly.periods_per_year(), 26);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    /// 52 pay periods per year.
    Weekly,
    /// 26 pay periods per year.
    Biweekly,
    /// 24 pay periods per year.
    Semimonthly,
    /// 12 pay periods per year.
    Monthly,
}

impl PayFrequency {
    /// Returns the number of pay periods in a year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Biweekly => 26,
            PayFrequency::Semimonthly => 24,
            PayFrequency::Monthly => 12,
        }
    }
}

/// Withholding elections from a caregiver's Form W-4.
///
/// All dollar amounts are annual except `extra_withholding`, which is
/// requested per paycheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct W4Information {
    /// Filing status (Step 1(c)).
    pub filing_status: FilingStatus,
    /// Multiple jobs or spouse works (Step 2).
    #[serde(default)]
    pub multiple_jobs: bool,
    /// Annual credit for dependents (Step 3).
    #[serde(default)]
    pub dependents_amount: Decimal,
    /// Annual other income not from jobs (Step 4(a)).
    #[serde(default)]
    pub other_income: Decimal,
    /// Annual deductions beyond the standard deduction (Step 4(b)).
    #[serde(default)]
    pub deductions: Decimal,
    /// Extra withholding per paycheck (Step 4(c)).
    #[serde(default)]
    pub extra_withholding: Decimal,
}

impl W4Information {
    /// Creates elections with only a filing status and no adjustments.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            multiple_jobs: false,
            dependents_amount: Decimal::ZERO,
            other_income: Decimal::ZERO,
            deductions: Decimal::ZERO,
            extra_withholding: Decimal::ZERO,
        }
    }
}

/// Per-paycheck withholding estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Federal income tax withheld, including any extra withholding.
    pub federal_withholding: Decimal,
    /// Employee Social Security withheld.
    pub social_security_withholding: Decimal,
    /// Employee Medicare withheld.
    pub medicare_withholding: Decimal,
    /// Social Security plus Medicare.
    pub total_fica: Decimal,
    /// Gross pay less federal withholding and FICA.
    pub net_pay: Decimal,
}
