//! Settings
//!
//! Pricing settings used at checkout, loaded from YAML:
//!
//! ```yaml
//! currency: GBP
//! tax_rate: "20%"
//! shipping: "4.99"
//! ```

use std::{fs, path::Path, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error reading the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid amount format
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),
}

/// Settings as written in YAML.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    currency: String,
    tax_rate: String,
    shipping: String,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            tax_rate: "10%".to_string(),
            shipping: "0".to_string(),
        }
    }
}

/// Checkout pricing settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Currency used to display amounts
    pub currency: &'static Currency,

    /// Tax charged on the subtotal, as a fraction
    pub tax_rate: Percentage,

    /// Flat shipping charge; zero is shown as free
    pub shipping: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: USD,
            tax_rate: Percentage::from(Decimal::new(1, 1)),
            shipping: Decimal::ZERO,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse settings from a YAML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the YAML is invalid or a value cannot be
    /// parsed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = if yaml.trim().is_empty() {
            SettingsFile::default()
        } else {
            serde_norway::from_str(yaml)?
        };

        Ok(Self {
            currency: parse_currency(&file.currency)?,
            tax_rate: parse_percentage(&file.tax_rate)?,
            shipping: parse_amount(&file.shipping)?,
        })
    }
}

/// Look up a supported ISO currency code.
///
/// # Errors
///
/// Returns [`SettingsError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, SettingsError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(SettingsError::UnknownCurrency(code.to_string())),
    }
}

/// Parse a percentage written as `"10%"` or as a fraction such as `"0.1"`.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidPercentage`] if the value cannot be parsed
/// or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, SettingsError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        Decimal::from_str(percent_str.trim())
            .map(|value| value / Decimal::ONE_HUNDRED)
            .map_err(|_err| SettingsError::InvalidPercentage(s.to_string()))?
    } else {
        Decimal::from_str(trimmed).map_err(|_err| SettingsError::InvalidPercentage(s.to_string()))?
    };

    if fraction < Decimal::ZERO {
        return Err(SettingsError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(fraction))
}

/// Parse a non-negative decimal amount such as `"4.99"`.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidAmount`] if the value cannot be parsed or
/// is negative.
pub fn parse_amount(s: &str) -> Result<Decimal, SettingsError> {
    let amount =
        Decimal::from_str(s.trim()).map_err(|_err| SettingsError::InvalidAmount(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(SettingsError::InvalidAmount(s.to_string()));
    }

    Ok(amount)
}
