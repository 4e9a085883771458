//! Khata is a small self-hosted web app for tracking day-to-day expenses.
//!
//! Users keep a catalog of purchasable menu items (name, price, image), add
//! them as dated transactions, browse and edit transactions by month, and
//! export a monthly report as an HTML page or a downloadable PDF.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod menu_item;
mod navigation;
mod not_found;
mod report;
mod routing;
mod store;
mod theme;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// Generate an opaque identifier for a menu item or transaction.
///
/// Identifiers are generated once at creation time and never reassigned or
/// reused.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for a menu item name.
    #[error("item name cannot be empty")]
    EmptyItemName,

    /// A menu item amount did not parse as a number greater than or equal to
    /// zero.
    #[error("\"{0}\" is not a number greater than or equal to zero")]
    InvalidAmount(String),

    /// A string that is not a zero-padded "YYYY-MM" month was used where a
    /// month key was expected.
    #[error("\"{0}\" is not a valid YYYY-MM month key")]
    InvalidMonthKey(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to edit a menu item that is not in the catalog.
    #[error("tried to update a menu item that is not in the catalog")]
    UpdateMissingItem,

    /// Tried to delete a menu item that is not in the catalog.
    #[error("tried to delete a menu item that is not in the catalog")]
    DeleteMissingItem,

    /// Tried to create a transaction from a menu item that is not in the
    /// catalog.
    #[error("tried to add a transaction for a menu item that is not in the catalog")]
    MissingSourceItem,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the ledger")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,

    /// Could not acquire the store lock.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// A collection could not be serialized as JSON for persistence.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The PDF writer failed to produce a document.
    #[error("could not generate the PDF report: {0}")]
    PdfGenerationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl Error {
    /// Render the error as an HTML fragment targeting the alert container.
    ///
    /// This is intended for endpoints called via HTMX where a full error page
    /// would be swapped into the wrong place.
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyItemName => Alert::error(
                StatusCode::BAD_REQUEST,
                "Invalid item name",
                "The item name cannot be empty.",
            )
            .into_response(),
            Error::InvalidAmount(raw) => Alert::error(
                StatusCode::BAD_REQUEST,
                "Invalid amount",
                &format!("\"{raw}\" is not a number greater than or equal to zero."),
            )
            .into_response(),
            Error::InvalidMonthKey(raw) => Alert::error(
                StatusCode::BAD_REQUEST,
                "Invalid month",
                &format!("\"{raw}\" is not a valid YYYY-MM month."),
            )
            .into_response(),
            Error::UpdateMissingItem => Alert::error(
                StatusCode::NOT_FOUND,
                "Could not update menu item",
                "The menu item could not be found.",
            )
            .into_response(),
            Error::DeleteMissingItem => Alert::error(
                StatusCode::NOT_FOUND,
                "Could not delete menu item",
                "The menu item could not be found. \
                Try refreshing the page to see if the item has already been deleted.",
            )
            .into_response(),
            Error::MissingSourceItem => Alert::error(
                StatusCode::NOT_FOUND,
                "Could not add transaction",
                "The menu item could not be found. \
                Try refreshing the page to see if the item has been deleted.",
            )
            .into_response(),
            Error::UpdateMissingTransaction => Alert::error(
                StatusCode::NOT_FOUND,
                "Could not update transaction",
                "The transaction could not be found.",
            )
            .into_response(),
            Error::DeleteMissingTransaction => Alert::error(
                StatusCode::NOT_FOUND,
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            )
            .into_response(),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            )
            .into_response(),
            _ => Alert::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            ),
            Error::StoreLockError => render_internal_server_error(
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs",
                )
            }
        }
    }
}

#[cfg(test)]
mod new_id_tests {
    use super::new_id;

    #[test]
    fn ids_are_unique() {
        let first = new_id();
        let second = new_id();

        assert_ne!(first, second);
    }

    #[test]
    fn ids_are_not_empty() {
        assert!(!new_id().is_empty());
    }
}
