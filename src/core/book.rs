//! Book business logic - provisioning and lookup of ledger scopes.
//!
//! Creating a book also provisions the default chart of accounts for its book
//! type, so the posting engine always finds categories and payment methods to
//! work with. Lookups of active books are shared by the posting engine and
//! both query engines.

use crate::{
    config::chart,
    entities::{Book, BookType, book},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Creates a book and seeds the default chart of accounts for its book type.
///
/// Seeding is idempotent: account codes already present in the book-type
/// scope are left untouched, so creating a second book of the same type does
/// not duplicate accounts.
pub async fn create_book(
    db: &DatabaseConnection,
    name: String,
    book_type: BookType,
) -> Result<book::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Book name cannot be empty".to_string(),
        });
    }

    let book = book::ActiveModel {
        name: Set(name.trim().to_string()),
        book_type: Set(book_type),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let chart = chart::default_chart()?;
    let seeded =
        crate::core::account::seed_default_accounts(db, book_type, chart.templates_for(book_type))
            .await?;

    info!(book_id = book.id, ?book_type, seeded, "created book");
    Ok(book)
}

/// Resolves an active book by id.
///
/// Returns [`Error::BookNotFound`] when the id is unknown or the book has
/// been deactivated. Accepts a plain connection or an open database
/// transaction.
pub async fn get_active_book<C>(db: &C, book_id: i64) -> Result<book::Model>
where
    C: ConnectionTrait,
{
    Book::find_by_id(book_id)
        .filter(book::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(Error::BookNotFound { id: book_id })
}

/// Lists all active books, ordered by name.
pub async fn list_active_books(db: &DatabaseConnection) -> Result<Vec<book::Model>> {
    Book::find()
        .filter(book::Column::IsActive.eq(true))
        .order_by_asc(book::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deactivates a book. Idempotent; the row is kept for history.
pub async fn deactivate_book(db: &DatabaseConnection, book_id: i64) -> Result<book::Model> {
    let book = Book::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or(Error::BookNotFound { id: book_id })?;

    if !book.is_active {
        return Ok(book);
    }

    let mut active: book::ActiveModel = book.into();
    active.is_active = Set(false);
    let updated = active.update(db).await?;

    info!(book_id, "deactivated book");
    Ok(updated)
}
