//! Store operations for the menu item catalog.
//!
//! The catalog is persisted as one JSON array under a single key. Every
//! mutation loads the whole collection, applies the change in memory, and
//! writes the whole collection back.

use rusqlite::Connection;

use crate::{
    Error,
    menu_item::domain::{DEFAULT_ITEMS, ItemName, MenuItem},
    new_id,
    store::{MENU_ITEMS_KEY, get_value, set_value},
};

/// Load the menu item catalog in storage order.
///
/// A missing or corrupt stored collection degrades to an empty catalog.
pub fn load_menu_items(connection: &Connection) -> Vec<MenuItem> {
    get_value(MENU_ITEMS_KEY, Vec::new(), connection)
}

/// Overwrite the persisted menu item catalog.
pub fn save_menu_items(items: &[MenuItem], connection: &Connection) -> Result<(), Error> {
    set_value(MENU_ITEMS_KEY, &items, connection)
}

/// Retrieve a single menu item by ID.
pub fn get_menu_item(item_id: &str, connection: &Connection) -> Result<MenuItem, Error> {
    load_menu_items(connection)
        .into_iter()
        .find(|item| item.id == item_id)
        .ok_or(Error::NotFound)
}

/// Append a new menu item with a freshly generated ID and return it.
pub fn create_menu_item(
    name: ItemName,
    amount: f64,
    image: String,
    connection: &Connection,
) -> Result<MenuItem, Error> {
    let item = MenuItem {
        id: new_id(),
        name,
        amount,
        image,
    };

    let mut items = load_menu_items(connection);
    items.push(item.clone());
    save_menu_items(&items, connection)?;

    Ok(item)
}

/// Replace the fields of an existing menu item in place, preserving its ID.
pub fn update_menu_item(
    item_id: &str,
    name: ItemName,
    amount: f64,
    image: String,
    connection: &Connection,
) -> Result<(), Error> {
    let mut items = load_menu_items(connection);

    let Some(item) = items.iter_mut().find(|item| item.id == item_id) else {
        return Err(Error::UpdateMissingItem);
    };

    item.name = name;
    item.amount = amount;
    item.image = image;

    save_menu_items(&items, connection)
}

/// Delete a menu item by ID.
///
/// Existing transactions created from the item are intentionally left
/// untouched.
pub fn delete_menu_item(item_id: &str, connection: &Connection) -> Result<(), Error> {
    let mut items = load_menu_items(connection);
    let count_before = items.len();

    items.retain(|item| item.id != item_id);

    if items.len() == count_before {
        return Err(Error::DeleteMissingItem);
    }

    save_menu_items(&items, connection)
}

/// Initialize the catalog with the built-in sample items when no catalog has
/// been stored yet (or the stored catalog is empty).
pub fn seed_catalog_if_empty(connection: &Connection) -> Result<(), Error> {
    if !load_menu_items(connection).is_empty() {
        return Ok(());
    }

    let items: Vec<MenuItem> = DEFAULT_ITEMS
        .iter()
        .map(|(name, amount, image)| MenuItem {
            id: new_id(),
            name: ItemName::new_unchecked(name),
            amount: *amount,
            image: (*image).to_string(),
        })
        .collect();

    save_menu_items(&items, connection)
}
