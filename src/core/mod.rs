/// Account registry - creation, lookup, listing and seeding of accounts
pub mod account;

/// Book provisioning and active-book lookup
pub mod book;

/// Ledger query engine - balances and balance trails
pub mod ledger;

/// Statement aggregator - income statement, balance sheet, breakdowns
pub mod report;

/// Posting engine - balanced double-entry writes
pub mod transaction;
