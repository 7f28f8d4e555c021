//! Ledger query engine - balances and balance trails reconstructed from
//! stored postings.
//!
//! Nothing here is cached: every call recomputes from the posting store, and
//! every read goes through [`active_postings`], the single place the
//! soft-delete predicate and the posting/entry/transaction join are spelled.

use crate::{
    entities::{
        TransactionDetail, account, journal_entry, transaction, transaction_detail,
    },
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    DatabaseConnection, FromQueryResult, JoinType, QueryOrder, QuerySelect, RelationTrait, Select,
    prelude::*,
};
use tracing::debug;

/// One row of an account ledger: a posting with its running balance.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// Transaction date
    pub date: NaiveDate,
    /// Transaction memo when present, else the generated entry description
    pub description: String,
    /// Debit amount of this posting (zero on credit legs)
    pub debit: Decimal,
    /// Credit amount of this posting (zero on debit legs)
    pub credit: Decimal,
    /// Cumulative signed balance up to and including this posting
    pub balance: Decimal,
}

/// Balance trail of one account over a date range.
#[derive(Debug, Clone)]
pub struct AccountLedger {
    /// The account being reported on
    pub account: account::Model,
    /// Signed balance accumulated strictly before the range
    pub opening_balance: Decimal,
    /// Postings within the range, date ascending, with running balances
    pub entries: Vec<LedgerEntry>,
    /// Balance after the last entry; equals the opening balance for an
    /// empty range
    pub closing_balance: Decimal,
}

/// Current balance of one payment-method account.
#[derive(Debug, Clone)]
pub struct AccountBalance {
    /// The account
    pub account: account::Model,
    /// Signed balance over all active postings
    pub balance: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct LedgerRow {
    date: NaiveDate,
    memo: Option<String>,
    description: String,
    debit: Decimal,
    credit: Decimal,
}

/// Base query for a book's postings: details joined through journal entries
/// to transactions, restricted to active (non-soft-deleted) transactions.
///
/// Every balance and statement read in this crate builds on this query so
/// the soft-delete filter cannot drift between call sites.
pub(crate) fn active_postings(book_id: i64) -> Select<TransactionDetail> {
    TransactionDetail::find()
        .join(
            JoinType::InnerJoin,
            transaction_detail::Relation::JournalEntry.def(),
        )
        .join(JoinType::InnerJoin, journal_entry::Relation::Transaction.def())
        .filter(transaction::Column::BookId.eq(book_id))
        .filter(transaction::Column::IsActive.eq(true))
}

/// Signed balance of an account accumulated strictly before a date.
///
/// Defined as `sum of (debit - credit)` over all active postings with
/// `transaction.date < as_of_exclusive`; zero when no postings exist.
pub async fn opening_balance(
    db: &DatabaseConnection,
    book_id: i64,
    account_id: i64,
    as_of_exclusive: NaiveDate,
) -> Result<Decimal> {
    let postings = active_postings(book_id)
        .filter(transaction_detail::Column::AccountId.eq(account_id))
        .filter(transaction::Column::Date.lt(as_of_exclusive))
        .all(db)
        .await?;

    Ok(postings.iter().map(transaction_detail::Model::signed_amount).sum())
}

/// Current signed balance of an account over all active postings.
pub async fn account_balance(
    db: &DatabaseConnection,
    book_id: i64,
    account_id: i64,
) -> Result<Decimal> {
    let postings = active_postings(book_id)
        .filter(transaction_detail::Column::AccountId.eq(account_id))
        .all(db)
        .await?;

    Ok(postings.iter().map(transaction_detail::Model::signed_amount).sum())
}

/// Reconstructs the balance trail of one account over `[start_date, end_date]`.
///
/// The running balance recurrence seeds with the opening balance and adds
/// `debit - credit` per posting, ordered by transaction date ascending with
/// insertion order as the stable tie-break.
pub async fn account_ledger(
    db: &DatabaseConnection,
    book_id: i64,
    account_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<AccountLedger> {
    debug!(book_id, account_id, %start_date, %end_date, "building account ledger");

    crate::core::book::get_active_book(db, book_id).await?;
    let account = crate::core::account::get_account(db, account_id).await?;

    let opening = opening_balance(db, book_id, account_id, start_date).await?;

    let rows: Vec<LedgerRow> = active_postings(book_id)
        .filter(transaction_detail::Column::AccountId.eq(account_id))
        .filter(transaction::Column::Date.between(start_date, end_date))
        .select_only()
        .column_as(transaction::Column::Date, "date")
        .column_as(transaction::Column::Memo, "memo")
        .column_as(journal_entry::Column::Description, "description")
        .column_as(transaction_detail::Column::DebitAmount, "debit")
        .column_as(transaction_detail::Column::CreditAmount, "credit")
        .order_by_asc(transaction::Column::Date)
        .order_by_asc(transaction_detail::Column::Id)
        .into_model::<LedgerRow>()
        .all(db)
        .await?;

    let mut running = opening;
    let entries: Vec<LedgerEntry> = rows
        .into_iter()
        .map(|row| {
            running = running + row.debit - row.credit;
            LedgerEntry {
                date: row.date,
                description: row
                    .memo
                    .filter(|memo| !memo.is_empty())
                    .unwrap_or(row.description),
                debit: row.debit,
                credit: row.credit,
                balance: running,
            }
        })
        .collect();

    Ok(AccountLedger {
        account,
        opening_balance: opening,
        entries,
        closing_balance: running,
    })
}

/// Current balance per active payment-method account of the book's scope.
///
/// Accounts without postings report zero; the result is ordered by account
/// code like the registry listings.
pub async fn payment_method_balances(
    db: &DatabaseConnection,
    book_id: i64,
) -> Result<Vec<AccountBalance>> {
    let book = crate::core::book::get_active_book(db, book_id).await?;
    let accounts = crate::core::account::payment_methods(db, book.book_type).await?;

    let mut results = Vec::with_capacity(accounts.len());
    for account in accounts {
        let balance = account_balance(db, book_id, account.id).await?;
        results.push(AccountBalance { account, balance });
    }

    Ok(results)
}
