//! Menu item editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    menu_item::{
        create::validate_item_form,
        db::{get_menu_item, update_menu_item},
        domain::ItemFormData,
        form::{FormAction, item_form_view},
    },
    navigation::NavBar,
    theme::load_theme,
};

/// The state needed for the edit item page.
#[derive(Debug, Clone)]
pub struct EditItemPageState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditItemPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a menu item.
#[derive(Debug, Clone)]
pub struct UpdateItemEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateItemEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the item editing page with all fields pre-filled from the item.
pub async fn get_edit_item_page(
    Path(item_id): Path<String>,
    State(state): State<EditItemPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let theme = load_theme(&connection);
    let item = get_menu_item(&item_id, &connection)?;

    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_ITEM, &item_id);
    let amount = if item.amount == item.amount.trunc() {
        format!("{}", item.amount as i64)
    } else {
        format!("{}", item.amount)
    };
    let form = item_form_view(
        &FormAction::Update(update_endpoint),
        item.name.as_ref(),
        &amount,
        &item.image,
        "",
    );

    let nav_bar = NavBar::new(endpoints::MENU_VIEW).into_html();
    let content = maud::html! {
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold py-4" { "Edit Menu Item" }

            (form)
        }
    };

    Ok(base("Edit Menu Item", theme, &content).into_response())
}

/// Handle item update form submission.
///
/// The item keeps its ID; name, amount and image are overwritten. Existing
/// transactions created from the item are unaffected, since they copied the
/// name and amount at creation time.
pub async fn update_item_endpoint(
    Path(item_id): Path<String>,
    State(state): State<UpdateItemEndpointState>,
    Form(form_data): Form<ItemFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_ITEM, &item_id);

    let (name, amount) =
        match validate_item_form(&FormAction::Update(update_endpoint), &form_data) {
            Ok(fields) => fields,
            Err(form_with_error) => return form_with_error.into_response(),
        };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match update_menu_item(
        &item_id,
        name,
        amount,
        form_data.image.trim().to_owned(),
        &connection,
    ) {
        Ok(()) => (
            HxRedirect(endpoints::MENU_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingItem) => Error::UpdateMissingItem.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating menu item {item_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
