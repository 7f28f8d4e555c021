//! Account entity - The catalog of named, typed ledger accounts.
//!
//! Accounts are reference data: created at book-type provisioning time (from
//! the default chart) or ad hoc, immutable afterwards except for the
//! `is_active` flag, and never physically deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::book::BookType;

/// Accounting classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Asset account (balance = debits - credits)
    #[sea_orm(string_value = "ASSET")]
    Asset,
    /// Liability account (balance = credits - debits)
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    /// Equity account
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    /// Revenue category, the credit leg of an income transaction
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    /// Expense category, the debit leg of an expense transaction
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    /// Payment method (cash, bank, card), the counter-leg of every transaction
    #[sea_orm(string_value = "PAYMENT_METHOD")]
    PaymentMethod,
}

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short numeric code, unique per book type (e.g., "1100")
    pub code: String,
    /// Display name (e.g., "Checking", "Groceries")
    pub name: String,
    /// Accounting classification
    pub account_type: AccountType,
    /// Book-type scope this account belongs to
    pub book_type: BookType,
    /// Soft delete flag - deactivated accounts cannot take new postings
    pub is_active: bool,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account has many postings
    #[sea_orm(has_many = "super::transaction_detail::Entity")]
    TransactionDetails,
}

impl Related<super::transaction_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
