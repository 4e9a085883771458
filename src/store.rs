//! Whole-value key/value persistence backed by SQLite.
//!
//! The application persists each collection (menu items, transactions) and
//! the theme preference as a single JSON document under a fixed key. Every
//! mutation overwrites the whole value; there are no partial updates.
//!
//! Reads never fail: a missing or corrupt entry silently degrades to the
//! caller's fallback so that bad persisted data can never take the app down.

use rusqlite::{Connection, OptionalExtension};
use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// The storage key for the menu item collection.
pub const MENU_ITEMS_KEY: &str = "menuItems";
/// The storage key for the transaction collection.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// The storage key for the persisted theme preference.
pub const THEME_KEY: &str = "themePref";

/// Initialize the key/value table.
pub fn create_store_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `fallback` if the entry is missing or
/// does not parse.
pub fn get_value<T: DeserializeOwned>(key: &str, fallback: T, connection: &Connection) -> T {
    let raw: Option<String> = match connection
        .prepare("SELECT value FROM kv WHERE key = :key;")
        .and_then(|mut statement| {
            statement
                .query_row(&[(":key", key)], |row| row.get(0))
                .optional()
        }) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!("could not read stored value for key {key:?}: {error}");
            return fallback;
        }
    };

    match raw {
        Some(text) => serde_json::from_str(&text).unwrap_or_else(|error| {
            tracing::warn!("discarding corrupt stored value for key {key:?}: {error}");
            fallback
        }),
        None => fallback,
    }
}

/// Serialize `value` as JSON and store it under `key`, overwriting any prior
/// value.
pub fn set_value<T: Serialize>(key: &str, value: &T, connection: &Connection) -> Result<(), Error> {
    let text = serde_json::to_string(value)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    connection.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
        ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
        (key, &text),
    )?;

    Ok(())
}
