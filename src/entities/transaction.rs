//! Transaction entity - The user-visible income or expense event.
//!
//! Each transaction owns exactly one journal entry, which in turn owns the
//! balanced debit/credit posting pair. "Deleting" a transaction flips
//! `is_active`; the rows stay on disk and every balance or statement query
//! excludes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a transaction from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming in: debits the payment method, credits a revenue category
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Money going out: debits an expense category, credits the payment method
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the book this transaction belongs to
    pub book_id: i64,
    /// Date the transaction occurred
    pub date: Date,
    /// Whether this is an income or an expense event
    pub transaction_type: TransactionType,
    /// Transaction amount, always positive; direction comes from the type
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    /// Free-form user note
    pub memo: Option<String>,
    /// Soft delete flag - inactive transactions are excluded from every
    /// balance and statement read but remain fetchable by id
    pub is_active: bool,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one book
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
    /// Each transaction owns one journal entry (1:1 in this system)
    #[sea_orm(has_many = "super::journal_entry::Entity")]
    JournalEntries,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
