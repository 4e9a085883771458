//! The transaction ledger: domain types, persistence, the monthly table page
//! and its mutation endpoints.

mod add_endpoint;
mod clear_month_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod transactions_page;
mod update_endpoint;

pub use add_endpoint::add_transaction_endpoint;
pub use clear_month_endpoint::clear_month_endpoint;
pub use db::transactions_for_month;
pub use delete_endpoint::delete_transaction_endpoint;
pub use domain::{MonthKey, grand_total};
pub use transactions_page::{current_local_month, get_transactions_page};
pub(crate) use transactions_page::truncate_label;
pub use update_endpoint::update_transaction_endpoint;

#[cfg(test)]
pub use db::{add_transaction, load_transactions};
#[cfg(test)]
pub use domain::Transaction;
