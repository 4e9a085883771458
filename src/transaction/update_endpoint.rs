//! Endpoint for editing a transaction's quantity.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    transaction::db::update_quantity,
    transaction::domain::clamp_quantity,
};

/// The state needed for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for a quantity update.
///
/// The quantity arrives as raw text so that out-of-range and non-numeric
/// submissions can be coerced instead of rejected.
#[derive(Debug, Deserialize)]
pub struct QuantityFormData {
    /// The submitted quantity.
    pub qty: String,
}

/// Handle a quantity edit on a transaction row.
///
/// Only the quantity changes; the copied name, amount and date are immutable.
/// The submitted value is coerced to a whole number of at least 1, and the
/// client refreshes the page so the row and grand total pick up the stored
/// value.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<String>,
    State(state): State<UpdateTransactionEndpointState>,
    Form(form_data): Form<QuantityFormData>,
) -> Response {
    let qty = clamp_quantity(&form_data.qty);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match update_quantity(&transaction_id, qty, &connection) {
        Ok(_) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(Error::UpdateMissingTransaction) => {
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
