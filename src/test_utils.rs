//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test books, accounts and transactions with sensible defaults.

use crate::{
    core::{book, transaction},
    entities::{
        Account, Book, BookType, DetailType, JournalEntry, Transaction, TransactionDetail,
        TransactionType, account, journal_entry, transaction as transaction_entity,
        transaction_detail,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database with one personal book and its seeded default chart.
/// Returns (db, book) for common test scenarios.
pub async fn setup_with_personal_book()
-> Result<(DatabaseConnection, crate::entities::book::Model)> {
    let db = setup_test_db().await?;
    let book = book::create_book(&db, "Test Book".to_string(), BookType::Personal).await?;
    Ok((db, book))
}

/// Shorthand for `NaiveDate` literals in tests.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Resolves a seeded account by its chart code within a book-type scope.
pub async fn account_by_code(
    db: &DatabaseConnection,
    book_type: BookType,
    code: &str,
) -> Result<account::Model> {
    Account::find()
        .filter(account::Column::Code.eq(code))
        .filter(account::Column::BookType.eq(book_type))
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: 0 })
}

/// Creates an income transaction, resolving category and payment accounts by
/// their chart codes in the book's scope.
pub async fn create_income(
    db: &DatabaseConnection,
    book_id: i64,
    on: NaiveDate,
    amount: Decimal,
    category_code: &str,
    payment_code: &str,
) -> Result<transaction_entity::Model> {
    create_with_type(
        db,
        book_id,
        on,
        TransactionType::Income,
        amount,
        category_code,
        payment_code,
    )
    .await
}

/// Creates an expense transaction, resolving category and payment accounts by
/// their chart codes in the book's scope.
pub async fn create_expense(
    db: &DatabaseConnection,
    book_id: i64,
    on: NaiveDate,
    amount: Decimal,
    category_code: &str,
    payment_code: &str,
) -> Result<transaction_entity::Model> {
    create_with_type(
        db,
        book_id,
        on,
        TransactionType::Expense,
        amount,
        category_code,
        payment_code,
    )
    .await
}

async fn create_with_type(
    db: &DatabaseConnection,
    book_id: i64,
    on: NaiveDate,
    transaction_type: TransactionType,
    amount: Decimal,
    category_code: &str,
    payment_code: &str,
) -> Result<transaction_entity::Model> {
    let book = Book::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or(Error::BookNotFound { id: book_id })?;

    let category = account_by_code(db, book.book_type, category_code).await?;
    let payment = account_by_code(db, book.book_type, payment_code).await?;

    transaction::create_transaction(
        db,
        book_id,
        on,
        transaction_type,
        amount,
        category.id,
        payment.id,
        None,
    )
    .await
}

/// Writes a balanced debit/credit pair directly against two arbitrary
/// accounts, bypassing the posting engine's category rules. Used to put
/// postings on asset/liability accounts for balance-sheet tests.
pub async fn post_pair(
    db: &DatabaseConnection,
    book_id: i64,
    on: NaiveDate,
    debit_account_id: i64,
    credit_account_id: i64,
    amount: Decimal,
) -> Result<i64> {
    let transaction = transaction_entity::ActiveModel {
        book_id: Set(book_id),
        date: Set(on),
        transaction_type: Set(TransactionType::Income),
        amount: Set(amount),
        memo: Set(None),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let entry = journal_entry::ActiveModel {
        transaction_id: Set(transaction.id),
        date: Set(on),
        description: Set("Manual entry".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    transaction_detail::ActiveModel {
        journal_entry_id: Set(entry.id),
        account_id: Set(debit_account_id),
        detail_type: Set(DetailType::Debit),
        debit_amount: Set(amount),
        credit_amount: Set(Decimal::ZERO),
        ..Default::default()
    }
    .insert(db)
    .await?;

    transaction_detail::ActiveModel {
        journal_entry_id: Set(entry.id),
        account_id: Set(credit_account_id),
        detail_type: Set(DetailType::Credit),
        debit_amount: Set(Decimal::ZERO),
        credit_amount: Set(amount),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(transaction.id)
}

/// Asserts that no transaction, journal entry or posting rows exist, used to
/// verify that failed validations left nothing behind.
pub async fn assert_no_rows_written(db: &DatabaseConnection) -> Result<()> {
    assert_eq!(Transaction::find().all(db).await?.len(), 0);
    assert_eq!(JournalEntry::find().all(db).await?.len(), 0);
    assert_eq!(TransactionDetail::find().all(db).await?.len(), 0);
    Ok(())
}
