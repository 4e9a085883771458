//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    menu_item::{
        create_item_endpoint, delete_item_endpoint, get_edit_item_page, get_menu_page,
        get_new_item_page, update_item_endpoint,
    },
    not_found::get_404_not_found,
    report::{get_report_page, get_report_pdf},
    theme::toggle_theme_endpoint,
    transaction::{
        add_transaction_endpoint, clear_month_endpoint, delete_transaction_endpoint,
        get_transactions_page, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::MENU_VIEW, get(get_menu_page))
        .route(endpoints::NEW_ITEM_VIEW, get(get_new_item_page))
        .route(endpoints::EDIT_ITEM_VIEW, get(get_edit_item_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::REPORT_VIEW, get(get_report_page))
        .route(endpoints::REPORT_PDF, get(get_report_pdf))
        .route(endpoints::POST_ITEM, post(create_item_endpoint))
        .route(
            endpoints::PUT_ITEM,
            put(update_item_endpoint).delete(delete_item_endpoint),
        )
        .route(endpoints::ADD_TRANSACTION, post(add_transaction_endpoint))
        .route(
            endpoints::PUT_TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::CLEAR_MONTH, delete(clear_month_endpoint))
        .route(endpoints::TOGGLE_THEME, post(toggle_theme_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the menu page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::MENU_VIEW)
}
