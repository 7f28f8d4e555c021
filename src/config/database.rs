//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`. Table
//! creation uses `Schema::create_table_from_entity` so the database schema is
//! generated from the entity definitions without hand-written SQL.

use crate::entities::{Account, Book, JournalEntry, Transaction, TransactionDetail};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pocketledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable
/// (loading a local .env file first if one exists) or returns the default
/// `SQLite` path.
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database resolved by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all ledger tables from the entity definitions.
///
/// Creates tables for books, accounts, transactions, journal entries and
/// transaction details.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let book_table = schema.create_table_from_entity(Book);
    let account_table = schema.create_table_from_entity(Account);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let journal_entry_table = schema.create_table_from_entity(JournalEntry);
    let detail_table = schema.create_table_from_entity(TransactionDetail);

    db.execute(builder.build(&book_table)).await?;
    db.execute(builder.build(&account_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&journal_entry_table)).await?;
    db.execute(builder.build(&detail_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        account::Model as AccountModel, book::Model as BookModel,
        journal_entry::Model as JournalEntryModel, transaction::Model as TransactionModel,
        transaction_detail::Model as TransactionDetailModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<BookModel> = Book::find().limit(1).all(&db).await?;
        let _: Vec<AccountModel> = Account::find().limit(1).all(&db).await?;
        let _: Vec<TransactionModel> = Transaction::find().limit(1).all(&db).await?;
        let _: Vec<JournalEntryModel> = JournalEntry::find().limit(1).all(&db).await?;
        let _: Vec<TransactionDetailModel> =
            TransactionDetail::find().limit(1).all(&db).await?;

        Ok(())
    }
}
