//! The menu item catalog: domain types, persistence and CRUD pages.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_item_endpoint, get_new_item_page};
pub use db::{get_menu_item, seed_catalog_if_empty};
pub use delete::delete_item_endpoint;
pub use domain::MenuItem;
pub use edit::{get_edit_item_page, update_item_endpoint};
pub use list::get_menu_page;

#[cfg(test)]
pub use db::{create_menu_item, load_menu_items};
#[cfg(test)]
pub use domain::ItemName;
