//! Chart-of-accounts configuration.
//!
//! The accounts seeded at book provisioning time are defined as TOML: either
//! the built-in default chart below or an external file with the same shape.
//! Seeding itself lives in [`crate::core::account::seed_default_accounts`].

use crate::entities::{AccountType, BookType};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Built-in default chart, used when no external chart file is configured.
const DEFAULT_CHART_TOML: &str = r#"
[[personal]]
code = "1100"
name = "Cash"
account_type = "PAYMENT_METHOD"

[[personal]]
code = "1200"
name = "Bank"
account_type = "PAYMENT_METHOD"

[[personal]]
code = "1300"
name = "Debit Card"
account_type = "PAYMENT_METHOD"

[[personal]]
code = "1400"
name = "Credit Card"
account_type = "PAYMENT_METHOD"

[[personal]]
code = "4100"
name = "Salary"
account_type = "REVENUE"

[[personal]]
code = "4200"
name = "Allowance"
account_type = "REVENUE"

[[personal]]
code = "4300"
name = "Side Income"
account_type = "REVENUE"

[[personal]]
code = "4400"
name = "Interest Income"
account_type = "REVENUE"

[[personal]]
code = "4500"
name = "Dividend Income"
account_type = "REVENUE"

[[personal]]
code = "4900"
name = "Other Income"
account_type = "REVENUE"

[[personal]]
code = "5100"
name = "Food"
account_type = "EXPENSE"

[[personal]]
code = "5200"
name = "Transportation"
account_type = "EXPENSE"

[[personal]]
code = "5300"
name = "Leisure"
account_type = "EXPENSE"

[[personal]]
code = "5400"
name = "Shopping"
account_type = "EXPENSE"

[[personal]]
code = "5500"
name = "Medical"
account_type = "EXPENSE"

[[personal]]
code = "5600"
name = "Education"
account_type = "EXPENSE"

[[personal]]
code = "5700"
name = "Communication"
account_type = "EXPENSE"

[[personal]]
code = "5800"
name = "Rent & Maintenance"
account_type = "EXPENSE"

[[personal]]
code = "5850"
name = "Utilities"
account_type = "EXPENSE"

[[personal]]
code = "5900"
name = "Insurance"
account_type = "EXPENSE"

[[personal]]
code = "5950"
name = "Family Events"
account_type = "EXPENSE"

[[personal]]
code = "5999"
name = "Other Expenses"
account_type = "EXPENSE"

[[business]]
code = "2100"
name = "Cash"
account_type = "PAYMENT_METHOD"

[[business]]
code = "2200"
name = "Business Account"
account_type = "PAYMENT_METHOD"

[[business]]
code = "2300"
name = "Corporate Card"
account_type = "PAYMENT_METHOD"

[[business]]
code = "6100"
name = "Sales"
account_type = "REVENUE"

[[business]]
code = "6200"
name = "Service Revenue"
account_type = "REVENUE"

[[business]]
code = "6300"
name = "Fee Income"
account_type = "REVENUE"

[[business]]
code = "6400"
name = "Interest Income"
account_type = "REVENUE"

[[business]]
code = "6900"
name = "Other Revenue"
account_type = "REVENUE"

[[business]]
code = "7100"
name = "Outsourcing"
account_type = "EXPENSE"

[[business]]
code = "7150"
name = "Payroll"
account_type = "EXPENSE"

[[business]]
code = "7200"
name = "Materials"
account_type = "EXPENSE"

[[business]]
code = "7250"
name = "Utilities"
account_type = "EXPENSE"

[[business]]
code = "7300"
name = "Rent"
account_type = "EXPENSE"

[[business]]
code = "7350"
name = "Insurance"
account_type = "EXPENSE"

[[business]]
code = "7400"
name = "Advertising"
account_type = "EXPENSE"

[[business]]
code = "7500"
name = "Entertainment"
account_type = "EXPENSE"

[[business]]
code = "7600"
name = "Communication"
account_type = "EXPENSE"

[[business]]
code = "7650"
name = "Taxes & Dues"
account_type = "EXPENSE"

[[business]]
code = "7700"
name = "Supplies"
account_type = "EXPENSE"

[[business]]
code = "7750"
name = "Vehicle Maintenance"
account_type = "EXPENSE"

[[business]]
code = "7800"
name = "Shipping"
account_type = "EXPENSE"

[[business]]
code = "7850"
name = "Repairs"
account_type = "EXPENSE"

[[business]]
code = "7900"
name = "Other Expenses"
account_type = "EXPENSE"
"#;

/// Template for one account to seed at provisioning time.
#[derive(Debug, Deserialize, Clone)]
pub struct AccountTemplate {
    /// Account code, unique within the book-type scope
    pub code: String,
    /// Display name
    pub name: String,
    /// Accounting classification
    pub account_type: AccountType,
}

/// Configuration structure representing an entire chart file.
#[derive(Debug, Deserialize)]
pub struct ChartConfig {
    /// Accounts seeded for personal books
    pub personal: Vec<AccountTemplate>,
    /// Accounts seeded for business books
    pub business: Vec<AccountTemplate>,
}

impl ChartConfig {
    /// Returns the templates for one book-type scope.
    #[must_use]
    pub fn templates_for(&self, book_type: BookType) -> &[AccountTemplate] {
        match book_type {
            BookType::Personal => &self.personal,
            BookType::Business => &self.business,
        }
    }
}

/// Loads a chart of accounts from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_chart<P: AsRef<Path>>(path: P) -> Result<ChartConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read chart file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse chart file: {e}"),
    })
}

/// Returns the built-in default chart of accounts.
pub fn default_chart() -> Result<ChartConfig> {
    toml::from_str(DEFAULT_CHART_TOML).map_err(|e| Error::Config {
        message: format!("Failed to parse built-in chart: {e}"),
    })
}
