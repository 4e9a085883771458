//! The persisted dark/light theme preference.
//!
//! The preference is absent until the user first toggles the theme; until
//! then pages defer to the browser's `prefers-color-scheme` hint. Because the
//! effective theme may therefore come from the client, the toggle endpoint
//! receives the currently applied theme from the page and persists its
//! opposite.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    store::{THEME_KEY, get_value, set_value},
};

/// The colour theme applied to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark backgrounds with light text.
    Dark,
    /// Light backgrounds with dark text.
    Light,
}

impl Theme {
    /// The theme the toggle switches to from `self`.
    pub fn opposite(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Get the persisted theme preference, if the user has chosen one.
pub fn load_theme(connection: &Connection) -> Option<Theme> {
    get_value(THEME_KEY, None, connection)
}

/// Persist the theme preference, overwriting any prior choice.
pub fn save_theme(theme: Theme, connection: &Connection) -> Result<(), Error> {
    set_value(THEME_KEY, &Some(theme), connection)
}

/// The form data for the theme toggle.
///
/// `current` is the theme the client currently has applied, which may come
/// from the OS hint rather than a stored preference.
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeToggleForm {
    /// The currently applied theme.
    pub current: Theme,
}

/// The state needed for toggling the theme.
#[derive(Debug, Clone)]
pub struct ToggleThemeEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ToggleThemeEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Persist the opposite of the client's current theme and refresh the page.
pub async fn toggle_theme_endpoint(
    State(state): State<ToggleThemeEndpointState>,
    Form(form_data): Form<ThemeToggleForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let next = form_data.current.opposite();

    match save_theme(next, &connection) {
        Ok(()) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while saving the theme: {error}");
            error.into_alert_response()
        }
    }
}
