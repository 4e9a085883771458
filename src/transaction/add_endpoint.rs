//! Endpoint for creating a transaction from a menu item.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    app_state::local_offset,
    endpoints,
    menu_item::get_menu_item,
    transaction::db::add_transaction,
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct AddTransactionEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to timestamp the new transaction.
    pub local_timezone: String,
}

impl FromRef<AppState> for AddTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Handle adding a menu item to the transaction list.
///
/// The new transaction copies the item's name and amount at this moment and
/// is dated with the current local time, then the client is redirected to the
/// transactions page for the month it landed in.
pub async fn add_transaction_endpoint(
    Path(item_id): Path<String>,
    State(state): State<AddTransactionEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let item = match get_menu_item(&item_id, &connection) {
        Ok(item) => item,
        Err(Error::NotFound) => return Error::MissingSourceItem.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while loading menu item {item_id}: {error}");
            return error.into_alert_response();
        }
    };

    let now = match local_offset(&state.local_timezone) {
        Some(offset) => OffsetDateTime::now_utc().to_offset(offset),
        None => OffsetDateTime::now_utc(),
    };

    match add_transaction(&item, now, &connection) {
        Ok(transaction) => {
            let destination = format!(
                "{}?month={}",
                endpoints::TRANSACTIONS_VIEW,
                transaction.month_key
            );

            (HxRedirect(destination), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while adding a transaction for item {item_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
