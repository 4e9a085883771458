//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, menu_item::seed_catalog_if_empty, store::create_store_table};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// Transaction dates are truncated to months in this timezone.
    pub local_timezone: String,

    /// The connection to the key/value store holding the persisted
    /// collections.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite-backed key/value store.
    ///
    /// This function will initialize the store and, on first run, seed the
    /// menu item catalog with the built-in sample items.
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an error if the store cannot be initialized or if
    /// `local_timezone` is not a known timezone.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        create_store_table(&db_connection)?;
        seed_catalog_if_empty(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

/// Get the current UTC offset for a canonical timezone name.
pub fn local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}
