//! Menu item deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, menu_item::db::delete_menu_item};

/// The state needed for deleting a menu item.
#[derive(Debug, Clone)]
pub struct DeleteItemEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteItemEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle menu item deletion.
///
/// The client prompts for confirmation before this endpoint is called.
/// Deleting an item never cascades to the transaction collection: existing
/// transactions are historical records.
pub async fn delete_item_endpoint(
    Path(item_id): Path<String>,
    State(state): State<DeleteItemEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match delete_menu_item(&item_id, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::MENU_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::DeleteMissingItem) => Error::DeleteMissingItem.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting menu item {item_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
