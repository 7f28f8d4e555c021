//! Unified error types and result handling.
//!
//! Every failure in this crate is a local, synchronous error raised at the
//! point of detection; nothing is retried. Accounting-rule violations always
//! carry the specific rule that failed and the offending values.

use sea_orm::DbErr;
use thiserror::Error;

/// All failures the ledger core can raise.
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced book id does not resolve to an active row.
    #[error("Book not found: {id}")]
    BookNotFound { id: i64 },

    /// Referenced account id does not resolve to an active row.
    #[error("Account not found: {id}")]
    AccountNotFound { id: i64 },

    /// Transaction id does not resolve for the requested operation.
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: i64 },

    /// An accounting rule was violated: wrong account type, book-type
    /// mismatch, non-positive amount, or a balance invariant failure.
    #[error("Invalid transaction: {message}")]
    InvalidTransaction { message: String },

    /// An account with this code already exists in the book-type scope.
    #[error("Account code '{code}' already exists for {book_type:?}")]
    DuplicateAccountCode {
        code: String,
        book_type: crate::entities::BookType,
    },

    /// Configuration error (chart of accounts file, database URL).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Database error surfaced from the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
