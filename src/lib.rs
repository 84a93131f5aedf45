pub mod database;
pub mod error;
pub mod ledger;
pub mod query;
pub mod store;
