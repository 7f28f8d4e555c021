//! Statement aggregator - income statement, balance sheet, category
//! breakdowns and monthly trend summaries.
//!
//! All aggregations read the same posting store as the ledger engine through
//! [`crate::core::ledger::active_postings`], grouped and ordered per report.
//! Ratios round half-up to two decimal places and fall back to zero instead
//! of dividing by zero.

use std::collections::HashMap;

use crate::{
    core::ledger::active_postings,
    entities::{AccountType, TransactionType, account, transaction, transaction_detail},
    errors::{Error, Result},
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    DatabaseConnection, FromQueryResult, JoinType, QuerySelect, RelationTrait, prelude::*,
};
use tracing::debug;

/// Revenue and expense totals over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    /// Sum of credit amounts on revenue accounts
    pub total_income: Decimal,
    /// Sum of debit amounts on expense accounts
    pub total_expense: Decimal,
    /// `total_income - total_expense`
    pub net_profit: Decimal,
    /// `net_profit / total_income * 100`, half-up to 2 decimals; zero when
    /// there is no income
    pub profit_rate: Decimal,
}

/// Asset and liability totals as of a date.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    /// `sum of (debit - credit)` over asset accounts
    pub total_assets: Decimal,
    /// `sum of (credit - debit)` over liability accounts
    pub total_liabilities: Decimal,
    /// Derived: `total_assets - total_liabilities`
    pub total_equity: Decimal,
}

/// One category's share of a breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// Category account id
    pub account_id: i64,
    /// Category account name
    pub name: String,
    /// Total posted to this category in the range
    pub amount: Decimal,
    /// Share of the full group total, half-up to 2 decimals
    pub percentage: Decimal,
}

/// Income, expense and net balance of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Month key, `"YYYY-MM"`
    pub year_month: String,
    /// Revenue credited during the month
    pub income: Decimal,
    /// Expenses debited during the month
    pub expense: Decimal,
    /// `income - expense`
    pub balance: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct TypedRow {
    account_type: AccountType,
    debit: Decimal,
    credit: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct DatedTypedRow {
    date: NaiveDate,
    account_type: AccountType,
    debit: Decimal,
    credit: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    account_id: i64,
    name: String,
    debit: Decimal,
    credit: Decimal,
}

/// Computes the income statement for `[start_date, end_date]`.
pub async fn income_statement(
    db: &DatabaseConnection,
    book_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<IncomeStatement> {
    debug!(book_id, %start_date, %end_date, "computing income statement");

    crate::core::book::get_active_book(db, book_id).await?;

    let rows: Vec<TypedRow> = active_postings(book_id)
        .join(JoinType::InnerJoin, transaction_detail::Relation::Account.def())
        .filter(
            account::Column::AccountType
                .is_in([AccountType::Revenue, AccountType::Expense]),
        )
        .filter(transaction::Column::Date.between(start_date, end_date))
        .select_only()
        .column_as(account::Column::AccountType, "account_type")
        .column_as(transaction_detail::Column::DebitAmount, "debit")
        .column_as(transaction_detail::Column::CreditAmount, "credit")
        .into_model::<TypedRow>()
        .all(db)
        .await?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for row in rows {
        match row.account_type {
            AccountType::Revenue => total_income += row.credit,
            AccountType::Expense => total_expense += row.debit,
            _ => {}
        }
    }

    let net_profit = total_income - total_expense;
    let profit_rate = ratio_percent(net_profit, total_income);

    Ok(IncomeStatement {
        total_income,
        total_expense,
        net_profit,
        profit_rate,
    })
}

/// Computes the balance sheet as of a date (inclusive).
pub async fn balance_sheet(
    db: &DatabaseConnection,
    book_id: i64,
    as_of_date: NaiveDate,
) -> Result<BalanceSheet> {
    debug!(book_id, %as_of_date, "computing balance sheet");

    crate::core::book::get_active_book(db, book_id).await?;

    let rows: Vec<TypedRow> = active_postings(book_id)
        .join(JoinType::InnerJoin, transaction_detail::Relation::Account.def())
        .filter(
            account::Column::AccountType
                .is_in([AccountType::Asset, AccountType::Liability]),
        )
        .filter(transaction::Column::Date.lte(as_of_date))
        .select_only()
        .column_as(account::Column::AccountType, "account_type")
        .column_as(transaction_detail::Column::DebitAmount, "debit")
        .column_as(transaction_detail::Column::CreditAmount, "credit")
        .into_model::<TypedRow>()
        .all(db)
        .await?;

    let mut total_assets = Decimal::ZERO;
    let mut total_liabilities = Decimal::ZERO;
    for row in rows {
        match row.account_type {
            AccountType::Asset => total_assets += row.debit - row.credit,
            AccountType::Liability => total_liabilities += row.credit - row.debit,
            _ => {}
        }
    }

    Ok(BalanceSheet {
        total_assets,
        total_liabilities,
        total_equity: total_assets - total_liabilities,
    })
}

/// Per-category totals and percentage shares for one transaction type over
/// `[start_date, end_date]`.
///
/// Percentages are relative to the full group total; an optional top-N
/// `limit` truncates only after sorting and percentage computation.
pub async fn category_breakdown(
    db: &DatabaseConnection,
    book_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    transaction_type: TransactionType,
    limit: Option<usize>,
) -> Result<Vec<CategoryShare>> {
    debug!(book_id, ?transaction_type, %start_date, %end_date, "computing category breakdown");

    crate::core::book::get_active_book(db, book_id).await?;

    let category_type = match transaction_type {
        TransactionType::Income => AccountType::Revenue,
        TransactionType::Expense => AccountType::Expense,
    };

    let rows: Vec<CategoryRow> = active_postings(book_id)
        .join(JoinType::InnerJoin, transaction_detail::Relation::Account.def())
        .filter(account::Column::AccountType.eq(category_type))
        .filter(transaction::Column::Date.between(start_date, end_date))
        .select_only()
        .column_as(account::Column::Id, "account_id")
        .column_as(account::Column::Name, "name")
        .column_as(transaction_detail::Column::DebitAmount, "debit")
        .column_as(transaction_detail::Column::CreditAmount, "credit")
        .into_model::<CategoryRow>()
        .all(db)
        .await?;

    let mut groups: HashMap<i64, (String, Decimal)> = HashMap::new();
    for row in rows {
        let entry = groups
            .entry(row.account_id)
            .or_insert_with(|| (row.name.clone(), Decimal::ZERO));
        entry.1 += row.debit + row.credit;
    }

    let total: Decimal = groups.values().map(|(_, amount)| *amount).sum();

    let mut shares: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(account_id, (name, amount))| CategoryShare {
            account_id,
            name,
            amount,
            percentage: ratio_percent(amount, total),
        })
        .collect();

    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));

    if let Some(limit) = limit {
        shares.truncate(limit);
    }

    Ok(shares)
}

/// Monthly income/expense trend for the `months_back` calendar months ending
/// in the current month.
pub async fn monthly_summary(
    db: &DatabaseConnection,
    book_id: i64,
    months_back: u32,
) -> Result<Vec<MonthlySummary>> {
    monthly_summary_as_of(db, book_id, months_back, Utc::now().date_naive()).await
}

/// Deterministic variant of [`monthly_summary`] with an explicit "today".
///
/// Returns exactly `months_back` rows, oldest month first; months without
/// postings yield all-zero rows so callers can rely on a fixed-length result.
pub async fn monthly_summary_as_of(
    db: &DatabaseConnection,
    book_id: i64,
    months_back: u32,
    today: NaiveDate,
) -> Result<Vec<MonthlySummary>> {
    debug!(book_id, months_back, %today, "computing monthly summary");

    crate::core::book::get_active_book(db, book_id).await?;

    if months_back == 0 {
        return Ok(Vec::new());
    }

    let mut summaries: Vec<MonthlySummary> = Vec::with_capacity(months_back as usize);
    for back in (0..months_back).rev() {
        let (year, month) = shift_months(today.year(), today.month(), back);
        summaries.push(MonthlySummary {
            year_month: format!("{year:04}-{month:02}"),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            balance: Decimal::ZERO,
        });
    }

    let index: HashMap<String, usize> = summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| (summary.year_month.clone(), i))
        .collect();

    let (start_year, start_month) = shift_months(today.year(), today.month(), months_back - 1);
    let start_date = first_of_month(start_year, start_month)?;
    let end_date = last_of_month(today.year(), today.month())?;

    let rows: Vec<DatedTypedRow> = active_postings(book_id)
        .join(JoinType::InnerJoin, transaction_detail::Relation::Account.def())
        .filter(
            account::Column::AccountType
                .is_in([AccountType::Revenue, AccountType::Expense]),
        )
        .filter(transaction::Column::Date.between(start_date, end_date))
        .select_only()
        .column_as(transaction::Column::Date, "date")
        .column_as(account::Column::AccountType, "account_type")
        .column_as(transaction_detail::Column::DebitAmount, "debit")
        .column_as(transaction_detail::Column::CreditAmount, "credit")
        .into_model::<DatedTypedRow>()
        .all(db)
        .await?;

    for row in rows {
        let key = format!("{:04}-{:02}", row.date.year(), row.date.month());
        if let Some(&i) = index.get(&key) {
            match row.account_type {
                AccountType::Revenue => summaries[i].income += row.credit,
                AccountType::Expense => summaries[i].expense += row.debit,
                _ => {}
            }
        }
    }

    for summary in &mut summaries {
        summary.balance = summary.income - summary.expense;
    }

    Ok(summaries)
}

// === Calendar and rounding helpers ===

/// `part / whole * 100`, half-up to two decimals; zero when `whole` is not
/// positive.
fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The calendar month `back` months before `(year, month)`.
fn shift_months(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::Config {
        message: format!("invalid calendar month {year:04}-{month:02}"),
    })
}

fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Ok(first_of_month(next_year, next_month)? - Duration::days(1))
}
