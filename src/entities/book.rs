//! Book entity - A named ledger scope that partitions accounts and transactions.
//!
//! Every transaction belongs to exactly one book, and every account is scoped
//! to a book type. Books are soft-deleted via `is_active`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scope of a book: personal finances or business finances.
///
/// Accounts are provisioned per book type, so a personal book and a business
/// book never share categories or payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookType {
    /// Personal household bookkeeping.
    #[sea_orm(string_value = "PERSONAL")]
    Personal,
    /// Business bookkeeping.
    #[sea_orm(string_value = "BUSINESS")]
    Business,
}

/// Book database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    /// Unique identifier for the book
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the book (e.g., "Household", "Studio LLC")
    pub name: String,
    /// Whether this is a personal or business book
    pub book_type: BookType,
    /// Soft delete flag - inactive books reject all ledger operations
    pub is_active: bool,
}

/// Defines relationships between Book and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One book has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
