//! The menu page, displaying the item catalog as cards.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        PAGE_CONTAINER_STYLE, base, format_currency,
    },
    menu_item::{
        db::load_menu_items,
        domain::{MenuItem, PLACEHOLDER_IMAGE_URL},
    },
    navigation::NavBar,
    theme::{Theme, load_theme},
};

/// The state needed for the menu page.
#[derive(Debug, Clone)]
pub struct MenuPageState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MenuPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the menu page.
///
/// Every call is a full rebuild of all cards from the current catalog, in
/// storage order.
pub async fn get_menu_page(State(state): State<MenuPageState>) -> Response {
    let (items, theme) = match state.db_connection.lock() {
        Ok(connection) => (load_menu_items(&connection), load_theme(&connection)),
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    menu_view(&items, theme).into_response()
}

fn menu_view(items: &[MenuItem], theme: Option<Theme>) -> Markup {
    let nav_bar = NavBar::new(endpoints::MENU_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Menu" }

                    a
                        href=(endpoints::NEW_ITEM_VIEW)
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Add Menu Item"
                    }
                }

                div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3"
                {
                    @for item in items {
                        (item_card(item))
                    }
                }
            }
        }
    };

    base("Menu", theme, &content)
}

fn item_card(item: &MenuItem) -> Markup {
    let add_endpoint = endpoints::format_endpoint(endpoints::ADD_TRANSACTION, &item.id);
    let edit_page = endpoints::format_endpoint(endpoints::EDIT_ITEM_VIEW, &item.id);
    let delete_endpoint = endpoints::format_endpoint(endpoints::DELETE_ITEM, &item.id);
    let image_fallback = format!("this.onerror=null;this.src='{PLACEHOLDER_IMAGE_URL}'");

    html! {
        div class=(CARD_STYLE)
        {
            img
                src=(item.image_or_placeholder())
                alt=(item.name)
                onerror=(image_fallback)
                class="w-full h-40 object-cover";

            div class="p-4 flex flex-col gap-3 flex-1"
            {
                div class="flex justify-between items-baseline gap-2"
                {
                    h3 class="font-semibold" { (item.name) }

                    span class="font-bold whitespace-nowrap" { (format_currency(item.amount)) }
                }

                div class="flex flex-wrap gap-2 mt-auto"
                {
                    button
                        class=(BUTTON_PRIMARY_STYLE)
                        hx-post=(add_endpoint)
                        hx-target-error="#alert-container"
                    {
                        "Add to Transactions"
                    }

                    a href=(edit_page) class=(BUTTON_SECONDARY_STYLE) { "Edit" }

                    button
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(delete_endpoint)
                        hx-confirm="Delete this menu item? This does not remove existing transactions."
                        hx-target-error="#alert-container"
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}
