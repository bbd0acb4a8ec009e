//! Configuration types for payroll and tax calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Tax numbers are data,
//! versioned by tax year, never constants in the calculation code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_WEEKLY_OVERTIME_THRESHOLD};
use crate::error::{EngineError, EngineResult};
use crate::models::{FilingStatus, Holiday};

/// Overtime thresholds for a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRules {
    /// Hours in a single day after which further hours are overtime.
    pub daily_threshold_hours: Decimal,
    /// Regular hours in a workweek after which further hours are overtime.
    pub weekly_threshold_hours: Decimal,
}

impl Default for OvertimeRules {
    fn default() -> Self {
        Self {
            daily_threshold_hours: DEFAULT_DAILY_OVERTIME_THRESHOLD,
            weekly_threshold_hours: DEFAULT_WEEKLY_OVERTIME_THRESHOLD,
        }
    }
}

impl OvertimeRules {
    /// Checks that neither threshold is negative.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, value) in [
            ("overtime.daily_threshold_hours", self.daily_threshold_hours),
            ("overtime.weekly_threshold_hours", self.weekly_threshold_hours),
        ] {
            if value.is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must not be negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Which hours divide gross wages in the minimum wage check.
///
/// `ExcludeOvertimeHours` divides overtime-inclusive gross wages by
/// straight-time hours only, which overstates the effective rate whenever
/// overtime was worked. It is the default because existing payroll records
/// were produced that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimumWageBasis {
    /// Regular, weekend and holiday hours.
    #[default]
    ExcludeOvertimeHours,
    /// Every hour worked, overtime included.
    IncludeOvertimeHours,
}

/// Jurisdiction-wide settings from `jurisdiction.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionConfig {
    /// Short code for the jurisdiction (e.g., "CO").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Minimum hourly wage caregivers must effectively earn.
    pub minimum_hourly_wage: Decimal,
    /// Daily and weekly overtime thresholds.
    #[serde(default)]
    pub overtime: OvertimeRules,
    /// Hours basis for the minimum wage check.
    #[serde(default)]
    pub minimum_wage_basis: MinimumWageBasis,
    /// Holidays recognised by the default calendar.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Statutory tax rates and wage bases for one jurisdiction and year.
///
/// Owned by the caller and read-only for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Employee Social Security rate (e.g., 0.062).
    pub social_security_employee_rate: Decimal,
    /// Employer Social Security rate.
    pub social_security_employer_rate: Decimal,
    /// Annual wage base for Social Security.
    pub social_security_wage_base: Decimal,
    /// Employee Medicare rate (e.g., 0.0145).
    pub medicare_employee_rate: Decimal,
    /// Employer Medicare rate.
    pub medicare_employer_rate: Decimal,
    /// Federal unemployment rate after state credit.
    pub futa_rate: Decimal,
    /// Annual wage base for FUTA.
    pub futa_wage_base: Decimal,
    /// State unemployment rate.
    pub suta_rate: Decimal,
    /// Annual wage base for SUTA.
    pub suta_wage_base: Decimal,
    /// Employee share of the paid leave premium.
    pub famli_employee_rate: Decimal,
    /// Employer share of the paid leave premium.
    pub famli_employer_rate: Decimal,
    /// Flat state income tax rate.
    pub state_income_tax_rate: Decimal,
}

impl TaxRates {
    fn named_rates(&self) -> [(&'static str, Decimal); 12] {
        [
            (
                "social_security_employee_rate",
                self.social_security_employee_rate,
            ),
            (
                "social_security_employer_rate",
                self.social_security_employer_rate,
            ),
            ("social_security_wage_base", self.social_security_wage_base),
            ("medicare_employee_rate", self.medicare_employee_rate),
            ("medicare_employer_rate", self.medicare_employer_rate),
            ("futa_rate", self.futa_rate),
            ("futa_wage_base", self.futa_wage_base),
            ("suta_rate", self.suta_rate),
            ("suta_wage_base", self.suta_wage_base),
            ("famli_employee_rate", self.famli_employee_rate),
            ("famli_employer_rate", self.famli_employer_rate),
            ("state_income_tax_rate", self.state_income_tax_rate),
        ]
    }

    /// Checks that no rate or wage base is negative.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, value) in self.named_rates() {
            if value.is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must not be negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// One marginal band of a progressive rate schedule.
///
/// Income from `lower` up to `upper` is taxed at `rate`. The top bracket
/// has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income at which this bracket starts.
    pub lower: Decimal,
    /// Income at which this bracket ends; `None` for the top bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Marginal rate within the bracket.
    pub rate: Decimal,
}

/// Annual standard deduction per filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductions {
    /// Single or married filing separately.
    pub single: Decimal,
    /// Married filing jointly.
    pub married: Decimal,
    /// Head of household.
    pub head_of_household: Decimal,
}

/// Rate schedules per filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedules {
    /// Single or married filing separately.
    pub single: Vec<TaxBracket>,
    /// Married filing jointly.
    pub married: Vec<TaxBracket>,
    /// Head of household.
    pub head_of_household: Vec<TaxBracket>,
}

/// Federal income tax withholding tables for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalWithholdingTable {
    /// Standard deduction by filing status.
    pub standard_deductions: StandardDeductions,
    /// Progressive rate schedules by filing status.
    pub brackets: BracketSchedules,
}

impl FederalWithholdingTable {
    /// Returns the standard deduction for a filing status.
    pub fn standard_deduction(&self, status: FilingStatus) -> Decimal {
        match status {
            FilingStatus::Single => self.standard_deductions.single,
            FilingStatus::Married => self.standard_deductions.married,
            FilingStatus::HeadOfHousehold => self.standard_deductions.head_of_household,
        }
    }

    /// Returns the rate schedule for a filing status.
    pub fn schedule(&self, status: FilingStatus) -> &[TaxBracket] {
        match status {
            FilingStatus::Single => &self.brackets.single,
            FilingStatus::Married => &self.brackets.married,
            FilingStatus::HeadOfHousehold => &self.brackets.head_of_household,
        }
    }

    /// Checks every schedule starts at zero, is contiguous and ends open.
    pub fn validate(&self) -> EngineResult<()> {
        for status in [
            FilingStatus::Single,
            FilingStatus::Married,
            FilingStatus::HeadOfHousehold,
        ] {
            validate_schedule(status, self.schedule(status))?;
            if self.standard_deduction(status).is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!("standard deduction for {} is negative", status),
                });
            }
        }
        Ok(())
    }
}

fn validate_schedule(status: FilingStatus, brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidConfig {
        message: format!("{} bracket schedule: {}", status, message),
    };

    let Some(first) = brackets.first() else {
        return Err(invalid("schedule is empty".to_string()));
    };
    if !first.lower.is_zero() {
        return Err(invalid(format!("first bracket starts at {}", first.lower)));
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate.is_sign_negative() {
            return Err(invalid(format!("bracket {} has a negative rate", i)));
        }
        let is_last = i + 1 == brackets.len();
        match (bracket.upper, is_last) {
            (None, true) => {}
            (None, false) => {
                return Err(invalid(format!("bracket {} is open-ended but not last", i)));
            }
            (Some(_), true) => {
                return Err(invalid("top bracket must have no upper bound".to_string()));
            }
            (Some(upper), false) => {
                if upper <= bracket.lower {
                    return Err(invalid(format!("bracket {} ends before it starts", i)));
                }
                if brackets[i + 1].lower != upper {
                    return Err(invalid(format!(
                        "gap between bracket {} ending at {} and the next",
                        i, upper
                    )));
                }
            }
        }
    }
    Ok(())
}

/// All tax tables for one tax year, from `tax_years/<year>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearConfig {
    /// The calendar tax year.
    pub tax_year: i32,
    /// Opaque version tag recorded on every payroll result.
    pub version: String,
    /// Statutory tax rates and wage bases.
    pub rates: TaxRates,
    /// Federal withholding tables.
    pub federal: FederalWithholdingTable,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction settings.
    jurisdiction: JurisdictionConfig,
    /// Tax tables by year (sorted oldest first).
    tax_years: Vec<TaxYearConfig>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(jurisdiction: JurisdictionConfig, tax_years: Vec<TaxYearConfig>) -> Self {
        let mut sorted_years = tax_years;
        sorted_years.sort_by_key(|y| y.tax_year);
        Self {
            jurisdiction,
            tax_years: sorted_years,
        }
    }

    /// Returns the jurisdiction settings.
    pub fn jurisdiction(&self) -> &JurisdictionConfig {
        &self.jurisdiction
    }

    /// Returns all loaded tax years.
    pub fn tax_years(&self) -> &[TaxYearConfig] {
        &self.tax_years
    }
}
