//! Transaction detail entity - A single posting (one debit or credit row).
//!
//! Exactly one of `debit_amount` / `credit_amount` is non-zero, matching
//! `detail_type`. Postings are immutable once written; they disappear from
//! queries only through their parent transaction's soft-delete flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Side of the ledger a posting lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue)
    #[sea_orm(string_value = "DEBIT")]
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue)
    #[sea_orm(string_value = "CREDIT")]
    Credit,
}

/// Posting database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_details")]
pub struct Model {
    /// Unique identifier for the posting
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning journal entry
    pub journal_entry_id: i64,
    /// ID of the account this posting hits
    pub account_id: i64,
    /// Whether this is the debit or the credit leg
    pub detail_type: DetailType,
    /// Debit amount; zero on the credit leg
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub debit_amount: Decimal,
    /// Credit amount; zero on the debit leg
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub credit_amount: Decimal,
}

impl Model {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }
}

/// Defines relationships between TransactionDetail and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each posting belongs to one journal entry
    #[sea_orm(
        belongs_to = "super::journal_entry::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entry::Column::Id"
    )]
    JournalEntry,
    /// Each posting hits one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntry.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
