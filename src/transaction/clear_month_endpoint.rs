//! Endpoint for clearing every transaction of a month.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{db::clear_month, domain::MonthKey},
};

/// The state needed for clearing a month.
#[derive(Debug, Clone)]
pub struct ClearMonthEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ClearMonthEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle clearing a whole month of transactions.
///
/// The client prompts for confirmation before this endpoint is called. Only
/// the named month is affected; transactions of every other month survive.
pub async fn clear_month_endpoint(
    Path(month): Path<String>,
    State(state): State<ClearMonthEndpointState>,
) -> Response {
    let month = match MonthKey::new(&month) {
        Ok(month) => month,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match clear_month(&month, &connection) {
        Ok(removed) => {
            tracing::info!("cleared {removed} transaction(s) for {month}");
            (HxRefresh(true), StatusCode::OK).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while clearing {month}: {error}");
            error.into_alert_response()
        }
    }
}
