//! Journal entry entity - The balanced posting set of one transaction.
//!
//! The entry date mirrors the transaction date and the description is a
//! generated human summary; both exist for display and ledger views, not for
//! balance computation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Unique identifier for the journal entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning transaction
    pub transaction_id: i64,
    /// Entry date, mirrors the transaction date
    pub date: Date,
    /// Auto-generated summary, e.g. "INCOME - Salary 500000.00"
    pub description: String,
}

/// Defines relationships between JournalEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each journal entry belongs to one transaction
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id"
    )]
    Transaction,
    /// One journal entry owns exactly two postings
    #[sea_orm(has_many = "super::transaction_detail::Entity")]
    TransactionDetails,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::transaction_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
