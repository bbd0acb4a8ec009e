//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! settings and per-year tax tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionConfig, PayrollConfig, TaxYearConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/colorado/
/// ├── jurisdiction.yaml   # Minimum wage, overtime rules, holidays
/// └── tax_years/
///     └── 2025.yaml       # Tax rates and federal withholding tables
/// ```
///
/// # Example
///
/// ```no_run
/// use caregiver_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/colorado")?;
/// let tables = loader.tax_year(2025)?;
/// println!("Social Security wage base: {}", tables.rates.social_security_wage_base);
/// # Ok::<(), caregiver_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or describes inconsistent data (negative amounts or thresholds,
    /// bracket schedules with gaps).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let jurisdiction = Self::load_yaml::<JurisdictionConfig>(&jurisdiction_path)?;
        if jurisdiction.minimum_hourly_wage.is_sign_negative() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "minimum_hourly_wage must not be negative, got {}",
                    jurisdiction.minimum_hourly_wage
                ),
            });
        }
        jurisdiction.overtime.validate()?;

        let tax_years = Self::load_tax_years(&path.join("tax_years"))?;

        info!(
            jurisdiction = %jurisdiction.code,
            tax_years = ?tax_years.iter().map(|y| y.tax_year).collect::<Vec<_>>(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(jurisdiction, tax_years),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all tax year files from the tax_years directory.
    fn load_tax_years(dir: &Path) -> EngineResult<Vec<TaxYearConfig>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tax_years: Vec<TaxYearConfig> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let tax_year = Self::load_yaml::<TaxYearConfig>(&path)?;
                tax_year.rates.validate()?;
                tax_year.federal.validate()?;

                if tax_years.iter().any(|y| y.tax_year == tax_year.tax_year) {
                    return Err(EngineError::InvalidConfig {
                        message: format!("tax year {} is defined twice", tax_year.tax_year),
                    });
                }
                tax_years.push(tax_year);
            }
        }

        if tax_years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax year files found)", dir_str),
            });
        }

        Ok(tax_years)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction settings.
    pub fn jurisdiction(&self) -> &JurisdictionConfig {
        self.config.jurisdiction()
    }

    /// Returns every loaded tax year, oldest first.
    pub fn tax_years(&self) -> &[TaxYearConfig] {
        self.config.tax_years()
    }

    /// Gets the tax tables for a calendar year.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use caregiver_payroll::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/colorado")?;
    /// let tables = loader.tax_year(2025)?;
    /// assert_eq!(tables.tax_year, 2025);
    /// # Ok::<(), caregiver_payroll::error::EngineError>(())
    /// ```
    pub fn tax_year(&self, year: i32) -> EngineResult<&TaxYearConfig> {
        self.config
            .tax_years()
            .iter()
            .find(|y| y.tax_year == year)
            .ok_or(EngineError::TaxYearNotFound { year })
    }

    /// Gets the most recent tax tables loaded.
    pub fn latest_tax_year(&self) -> EngineResult<&TaxYearConfig> {
        self.config
            .tax_years()
            .last()
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "no tax year configuration loaded".to_string(),
            })
    }
}
