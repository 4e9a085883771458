//! Menu item creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    menu_item::{
        db::create_menu_item,
        domain::{ItemFormData, ItemName, parse_amount},
        form::{FormAction, item_form_view},
    },
    navigation::NavBar,
    theme::load_theme,
};

/// The state needed for the new item page.
#[derive(Debug, Clone)]
pub struct NewItemPageState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewItemPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for creating a menu item.
#[derive(Debug, Clone)]
pub struct CreateItemEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateItemEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the item creation page with an empty form.
pub async fn get_new_item_page(State(state): State<NewItemPageState>) -> Response {
    let theme = match state.db_connection.lock() {
        Ok(connection) => load_theme(&connection),
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    let nav_bar = NavBar::new(endpoints::NEW_ITEM_VIEW).into_html();
    let form = item_form_view(&FormAction::Create, "", "", "", "");

    let content = maud::html! {
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold py-4" { "Add Menu Item" }

            (form)
        }
    };

    base("Add Menu Item", theme, &content).into_response()
}

/// Handle item creation form submission.
///
/// On a validation failure the form is re-rendered with an inline error and
/// the submitted values, and the catalog is left unchanged.
pub async fn create_item_endpoint(
    State(state): State<CreateItemEndpointState>,
    Form(form_data): Form<ItemFormData>,
) -> Response {
    let (name, amount) = match validate_item_form(&FormAction::Create, &form_data) {
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

    match create_menu_item(name, amount, form_data.image.trim().to_owned(), &connection) {
        Ok(_) => (
            HxRedirect(endpoints::MENU_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a menu item: {error}");
            error.into_alert_response()
        }
    }
}

/// Validate the name and amount of a submitted item form.
///
/// On failure, returns the re-rendered form with the inline error message.
pub(crate) fn validate_item_form(
    action: &FormAction,
    form_data: &ItemFormData,
) -> Result<(ItemName, f64), Markup> {
    let name = ItemName::new(&form_data.name).map_err(|error| {
        item_form_view(
            action,
            &form_data.name,
            &form_data.amount,
            &form_data.image,
            &format!("Error: {error}"),
        )
    })?;

    let amount = parse_amount(&form_data.amount).map_err(|error| {
        item_form_view(
            action,
            &form_data.name,
            &form_data.amount,
            &form_data.image,
            &format!("Error: {error}"),
        )
    })?;

    Ok((name, amount))
}


#[cfg(test)]
mod create_item_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        endpoints,
        menu_item::{db::load_menu_items, domain::ItemFormData},
        store::create_store_table,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    use super::{CreateItemEndpointState, create_item_endpoint};

    fn get_create_item_state() -> CreateItemEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_store_table(&connection).expect("Could not create kv table");

        CreateItemEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_item() {
        let state = get_create_item_state();
        let db_connection = state.db_connection.clone();

        let response = create_item_endpoint(
            State(state),
            Form(ItemFormData {
                name: "Coffee".to_owned(),
                amount: "120".to_owned(),
                image: String::new(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::MENU_VIEW);

        let items = load_menu_items(&db_connection.lock().unwrap());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_ref(), "Coffee");
        assert_eq!(items[0].amount, 120.0);
    }

    #[tokio::test]
    async fn negative_amount_leaves_catalog_unchanged_and_keeps_form_open() {
        let state = get_create_item_state();
        let db_connection = state.db_connection.clone();

        let response = create_item_endpoint(
            State(state),
            Form(ItemFormData {
                name: "Coffee".to_owned(),
                amount: "-1".to_owned(),
                image: String::new(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(
            &form,
            "Error: \"-1\" is not a number greater than or equal to zero",
        );

        assert!(load_menu_items(&db_connection.lock().unwrap()).is_empty());
    }

    #[tokio::test]
    async fn empty_name_leaves_catalog_unchanged_and_keeps_form_open() {
        let state = get_create_item_state();
        let db_connection = state.db_connection.clone();

        let response = create_item_endpoint(
            State(state),
            Form(ItemFormData {
                name: "   ".to_owned(),
                amount: "10".to_owned(),
                image: String::new(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: item name cannot be empty");

        assert!(load_menu_items(&db_connection.lock().unwrap()).is_empty());
    }
}
