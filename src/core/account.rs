//! Account registry business logic.
//!
//! Accounts are reference data consumed by the posting engine and the
//! statement aggregator. They are created at provisioning time (from the
//! chart templates) or ad hoc, are immutable afterwards except for the
//! activation flag, and are never physically deleted.

use std::collections::HashSet;

use crate::{
    config::chart::AccountTemplate,
    entities::{Account, AccountType, BookType, account},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Creates an account in a book-type scope.
///
/// Rejects a `(code, book_type)` pair that already exists, active or not;
/// codes stay unique for the lifetime of the scope.
pub async fn create_account(
    db: &DatabaseConnection,
    code: String,
    name: String,
    account_type: AccountType,
    book_type: BookType,
) -> Result<account::Model> {
    let existing = Account::find()
        .filter(account::Column::Code.eq(&code))
        .filter(account::Column::BookType.eq(book_type))
        .one(db)
        .await?;

    if existing.is_some() {
        return Err(Error::DuplicateAccountCode { code, book_type });
    }

    let account = account::ActiveModel {
        code: Set(code),
        name: Set(name),
        account_type: Set(account_type),
        book_type: Set(book_type),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(account_id = account.id, code = %account.code, ?account_type, "created account");
    Ok(account)
}

/// Resolves an account by id, regardless of activation state.
pub async fn get_account<C>(db: &C, account_id: i64) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })
}

/// Resolves an account that must be active, as required for new postings.
///
/// A deactivated account is reported the same way as a missing one.
pub async fn get_active_account<C>(db: &C, account_id: i64) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    let account = get_account(db, account_id).await?;
    if !account.is_active {
        return Err(Error::AccountNotFound { id: account_id });
    }
    Ok(account)
}

/// Active revenue categories for a book-type scope, ordered by code.
pub async fn income_categories(
    db: &DatabaseConnection,
    book_type: BookType,
) -> Result<Vec<account::Model>> {
    accounts_of_type(db, book_type, Some(AccountType::Revenue)).await
}

/// Active expense categories for a book-type scope, ordered by code.
pub async fn expense_categories(
    db: &DatabaseConnection,
    book_type: BookType,
) -> Result<Vec<account::Model>> {
    accounts_of_type(db, book_type, Some(AccountType::Expense)).await
}

/// Active payment methods for a book-type scope, ordered by code.
pub async fn payment_methods(
    db: &DatabaseConnection,
    book_type: BookType,
) -> Result<Vec<account::Model>> {
    accounts_of_type(db, book_type, Some(AccountType::PaymentMethod)).await
}

/// All active accounts of a book-type scope, ordered by code.
pub async fn all_accounts(
    db: &DatabaseConnection,
    book_type: BookType,
) -> Result<Vec<account::Model>> {
    accounts_of_type(db, book_type, None).await
}

async fn accounts_of_type(
    db: &DatabaseConnection,
    book_type: BookType,
    account_type: Option<AccountType>,
) -> Result<Vec<account::Model>> {
    debug!(?book_type, ?account_type, "listing accounts");

    let mut query = Account::find()
        .filter(account::Column::BookType.eq(book_type))
        .filter(account::Column::IsActive.eq(true));

    if let Some(account_type) = account_type {
        query = query.filter(account::Column::AccountType.eq(account_type));
    }

    query
        .order_by_asc(account::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deactivates an account. Idempotent; postings referencing it stay valid.
pub async fn deactivate_account(
    db: &DatabaseConnection,
    account_id: i64,
) -> Result<account::Model> {
    let account = get_account(db, account_id).await?;

    if !account.is_active {
        return Ok(account);
    }

    let mut active: account::ActiveModel = account.into();
    active.is_active = Set(false);
    let updated = active.update(db).await?;

    info!(account_id, "deactivated account");
    Ok(updated)
}

/// Seeds the chart templates into a book-type scope.
///
/// Templates whose code already exists in the scope are skipped, which makes
/// the call safe to repeat on every book creation. Returns the number of
/// accounts actually inserted.
pub async fn seed_default_accounts(
    db: &DatabaseConnection,
    book_type: BookType,
    templates: &[AccountTemplate],
) -> Result<usize> {
    let existing_codes: HashSet<String> = Account::find()
        .filter(account::Column::BookType.eq(book_type))
        .all(db)
        .await?
        .into_iter()
        .map(|a| a.code)
        .collect();

    let mut inserted = 0;
    for template in templates {
        if existing_codes.contains(&template.code) {
            continue;
        }

        account::ActiveModel {
            code: Set(template.code.clone()),
            name: Set(template.name.clone()),
            account_type: Set(template.account_type),
            book_type: Set(book_type),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::chart;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_account_rejects_duplicate_code() -> Result<()> {
        let db = setup_test_db().await?;

        create_account(
            &db,
            "9000".to_string(),
            "Petty Cash".to_string(),
            AccountType::PaymentMethod,
            BookType::Personal,
        )
        .await?;

        let result = create_account(
            &db,
            "9000".to_string(),
            "Another".to_string(),
            AccountType::Revenue,
            BookType::Personal,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateAccountCode { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_same_code_allowed_across_book_types() -> Result<()> {
        let db = setup_test_db().await?;

        create_account(
            &db,
            "9000".to_string(),
            "Petty Cash".to_string(),
            AccountType::PaymentMethod,
            BookType::Personal,
        )
        .await?;

        let business = create_account(
            &db,
            "9000".to_string(),
            "Petty Cash".to_string(),
            AccountType::PaymentMethod,
            BookType::Business,
        )
        .await?;
        assert_eq!(business.book_type, BookType::Business);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_default_accounts_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let templates = chart::default_chart()?.personal;

        let first = seed_default_accounts(&db, BookType::Personal, &templates).await?;
        assert_eq!(first, templates.len());

        let second = seed_default_accounts(&db, BookType::Personal, &templates).await?;
        assert_eq!(second, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_filters_by_account_type() -> Result<()> {
        let (db, _book) = setup_with_personal_book().await?;

        let incomes = income_categories(&db, BookType::Personal).await?;
        assert!(!incomes.is_empty());
        assert!(incomes.iter().all(|a| a.account_type == AccountType::Revenue));

        let expenses = expense_categories(&db, BookType::Personal).await?;
        assert!(!expenses.is_empty());
        assert!(expenses.iter().all(|a| a.account_type == AccountType::Expense));

        let methods = payment_methods(&db, BookType::Personal).await?;
        assert!(!methods.is_empty());
        assert!(
            methods
                .iter()
                .all(|a| a.account_type == AccountType::PaymentMethod)
        );

        let all = all_accounts(&db, BookType::Personal).await?;
        assert_eq!(all.len(), incomes.len() + expenses.len() + methods.len());

        // Ordered by code
        let codes: Vec<&str> = all.iter().map(|a| a.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivated_account_hidden_from_listings() -> Result<()> {
        let (db, _book) = setup_with_personal_book().await?;

        let checking = account_by_code(&db, BookType::Personal, "1200").await?;
        deactivate_account(&db, checking.id).await?;

        let methods = payment_methods(&db, BookType::Personal).await?;
        assert!(methods.iter().all(|a| a.id != checking.id));

        // Still resolvable by id for history views
        let fetched = get_account(&db, checking.id).await?;
        assert!(!fetched.is_active);

        // But not usable for new postings
        let result = get_active_account(&db, checking.id).await;
        assert!(matches!(result.unwrap_err(), Error::AccountNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_account_unknown_id() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_account(&db, 424242).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AccountNotFound { id: 424242 }
        ));

        Ok(())
    }
}
