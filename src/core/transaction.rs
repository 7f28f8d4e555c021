//! Posting engine - turns one income/expense event into a balanced
//! debit/credit posting pair.
//!
//! `create_transaction` is the only multi-row write in the crate. It runs
//! inside a single database transaction covering the transaction row, the
//! journal entry and both postings, so concurrent readers either see the
//! whole posting set or none of it. The derivation rule is fixed by domain
//! convention and is not configurable.

use crate::{
    entities::{
        AccountType, DetailType, JournalEntry, Transaction, TransactionDetail, TransactionType,
        account, book, journal_entry, transaction, transaction_detail,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Creates a transaction and its balanced double-entry postings.
///
/// Validation is fail-fast with no partial writes: the amount must be
/// positive, book and both accounts must resolve to active rows, the category
/// account type must match the transaction type (`INCOME` → `REVENUE`,
/// `EXPENSE` → `EXPENSE`), the payment leg must be a `PAYMENT_METHOD`
/// account, and both accounts must belong to the book's scope. After the
/// postings are written the entry is re-read and checked for balance before
/// the unit of work commits.
///
/// # Arguments
/// * `book_id` - The book to post into
/// * `date` - Date the event occurred
/// * `transaction_type` - Income or expense
/// * `amount` - Event amount, strictly positive
/// * `category_id` - Revenue/expense category account
/// * `payment_method_id` - Payment-method account
/// * `memo` - Optional free-form note
#[allow(clippy::too_many_arguments)]
pub async fn create_transaction(
    db: &DatabaseConnection,
    book_id: i64,
    date: NaiveDate,
    transaction_type: TransactionType,
    amount: Decimal,
    category_id: i64,
    payment_method_id: i64,
    memo: Option<String>,
) -> Result<transaction::Model> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidTransaction {
            message: format!("transaction amount must be positive, got {amount}"),
        });
    }

    // One unit of work for all four row writes
    let txn = db.begin().await?;

    let book = crate::core::book::get_active_book(&txn, book_id).await?;
    let category = crate::core::account::get_active_account(&txn, category_id).await?;
    let payment_method =
        crate::core::account::get_active_account(&txn, payment_method_id).await?;

    validate_account_types(transaction_type, &category, &payment_method)?;
    validate_book_types(&book, &category, &payment_method)?;

    let transaction = transaction::ActiveModel {
        book_id: Set(book_id),
        date: Set(date),
        transaction_type: Set(transaction_type),
        amount: Set(amount),
        memo: Set(memo),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let entry = journal_entry::ActiveModel {
        transaction_id: Set(transaction.id),
        date: Set(date),
        description: Set(generate_description(transaction_type, &category.name, amount)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // INCOME debits the payment method and credits the revenue category;
    // EXPENSE debits the expense category and credits the payment method.
    let (debit_account, credit_account) = match transaction_type {
        TransactionType::Income => (&payment_method, &category),
        TransactionType::Expense => (&category, &payment_method),
    };

    TransactionDetail::insert_many([
        posting(entry.id, debit_account.id, DetailType::Debit, amount),
        posting(entry.id, credit_account.id, DetailType::Credit, amount),
    ])
    .exec(&txn)
    .await?;

    // Internal consistency check: the derivation above balances by
    // construction, but a violated invariant must never reach the store.
    verify_double_entry(&txn, entry.id).await?;

    txn.commit().await?;

    info!(
        transaction_id = transaction.id,
        book_id,
        ?transaction_type,
        %amount,
        "created transaction"
    );
    Ok(transaction)
}

/// Updates the memo of an active transaction.
///
/// Amounts and accounts are immutable after creation, so no accounting rule
/// needs re-validation here. Inactive transactions are frozen history and
/// are reported as not found.
pub async fn update_memo(
    db: &DatabaseConnection,
    transaction_id: i64,
    memo: Option<String>,
) -> Result<transaction::Model> {
    let transaction = Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    let mut active: transaction::ActiveModel = transaction.into();
    active.memo = Set(memo);
    let updated = active.update(db).await?;

    info!(transaction_id, "updated transaction memo");
    Ok(updated)
}

/// Soft-deletes a transaction.
///
/// Idempotent. The transaction and its postings stay stored and fetchable by
/// id, but every balance and statement read excludes them from then on.
pub async fn deactivate(db: &DatabaseConnection, transaction_id: i64) -> Result<()> {
    let transaction = Transaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    if !transaction.is_active {
        return Ok(());
    }

    let mut active: transaction::ActiveModel = transaction.into();
    active.is_active = Set(false);
    active.update(db).await?;

    info!(transaction_id, "deactivated transaction");
    Ok(())
}

/// Fetches a transaction by id, including soft-deleted ones (history views).
pub async fn get_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<transaction::Model> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })
}

/// Fetches a transaction together with its journal entry and both postings.
pub async fn get_transaction_with_postings(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<(
    transaction::Model,
    journal_entry::Model,
    Vec<transaction_detail::Model>,
)> {
    let transaction = get_transaction(db, transaction_id).await?;

    let entry = JournalEntry::find()
        .filter(journal_entry::Column::TransactionId.eq(transaction_id))
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    let details = TransactionDetail::find()
        .filter(transaction_detail::Column::JournalEntryId.eq(entry.id))
        .order_by_asc(transaction_detail::Column::Id)
        .all(db)
        .await?;

    Ok((transaction, entry, details))
}

/// Lists active transactions of a book, newest first, with optional type and
/// date-range filters.
pub async fn list_transactions(
    db: &DatabaseConnection,
    book_id: i64,
    transaction_type: Option<TransactionType>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<transaction::Model>> {
    debug!(book_id, ?transaction_type, ?start_date, ?end_date, "listing transactions");

    crate::core::book::get_active_book(db, book_id).await?;

    let mut query = Transaction::find()
        .filter(transaction::Column::BookId.eq(book_id))
        .filter(transaction::Column::IsActive.eq(true));

    if let Some(transaction_type) = transaction_type {
        query = query.filter(transaction::Column::TransactionType.eq(transaction_type));
    }
    if let Some(start_date) = start_date {
        query = query.filter(transaction::Column::Date.gte(start_date));
    }
    if let Some(end_date) = end_date {
        query = query.filter(transaction::Column::Date.lte(end_date));
    }

    query
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

// === Derivation helpers ===

fn validate_account_types(
    transaction_type: TransactionType,
    category: &account::Model,
    payment_method: &account::Model,
) -> Result<()> {
    let expected = match transaction_type {
        TransactionType::Income => AccountType::Revenue,
        TransactionType::Expense => AccountType::Expense,
    };

    if category.account_type != expected {
        return Err(Error::InvalidTransaction {
            message: format!(
                "{transaction_type:?} transaction requires a {expected:?} category account, \
                 but '{}' is {:?}",
                category.name, category.account_type
            ),
        });
    }

    if payment_method.account_type != AccountType::PaymentMethod {
        return Err(Error::InvalidTransaction {
            message: format!(
                "payment leg requires a PaymentMethod account, but '{}' is {:?}",
                payment_method.name, payment_method.account_type
            ),
        });
    }

    Ok(())
}

fn validate_book_types(
    book: &book::Model,
    category: &account::Model,
    payment_method: &account::Model,
) -> Result<()> {
    if category.book_type != book.book_type {
        return Err(Error::InvalidTransaction {
            message: format!(
                "book type {:?} does not match category account '{}' of type {:?}",
                book.book_type, category.name, category.book_type
            ),
        });
    }

    if payment_method.book_type != book.book_type {
        return Err(Error::InvalidTransaction {
            message: format!(
                "book type {:?} does not match payment account '{}' of type {:?}",
                book.book_type, payment_method.name, payment_method.book_type
            ),
        });
    }

    Ok(())
}

fn posting(
    journal_entry_id: i64,
    account_id: i64,
    detail_type: DetailType,
    amount: Decimal,
) -> transaction_detail::ActiveModel {
    let (debit_amount, credit_amount) = match detail_type {
        DetailType::Debit => (amount, Decimal::ZERO),
        DetailType::Credit => (Decimal::ZERO, amount),
    };

    transaction_detail::ActiveModel {
        journal_entry_id: Set(journal_entry_id),
        account_id: Set(account_id),
        detail_type: Set(detail_type),
        debit_amount: Set(debit_amount),
        credit_amount: Set(credit_amount),
        ..Default::default()
    }
}

async fn verify_double_entry<C>(db: &C, journal_entry_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let details = TransactionDetail::find()
        .filter(transaction_detail::Column::JournalEntryId.eq(journal_entry_id))
        .all(db)
        .await?;

    let debit_total: Decimal = details.iter().map(|d| d.debit_amount).sum();
    let credit_total: Decimal = details.iter().map(|d| d.credit_amount).sum();

    if debit_total != credit_total {
        return Err(Error::InvalidTransaction {
            message: format!(
                "journal entry {journal_entry_id} does not balance: \
                 debits {debit_total}, credits {credit_total}"
            ),
        });
    }

    Ok(())
}

fn generate_description(
    transaction_type: TransactionType,
    category_name: &str,
    amount: Decimal,
) -> String {
    let label = match transaction_type {
        TransactionType::Income => "INCOME",
        TransactionType::Expense => "EXPENSE",
    };
    format!("{label} - {category_name} {amount}")
}
