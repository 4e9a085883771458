//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/items/{item_id}/edit', use
//! [format_endpoint].

/// The root route which redirects to the menu page.
pub const ROOT: &str = "/";
/// The page displaying the menu item catalog as cards.
pub const MENU_VIEW: &str = "/menu";
/// The page for creating a new menu item.
pub const NEW_ITEM_VIEW: &str = "/items/new";
/// The page for editing an existing menu item.
pub const EDIT_ITEM_VIEW: &str = "/items/{item_id}/edit";
/// The page displaying the transactions of a month as a table.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The read-only HTML report for a month.
pub const REPORT_VIEW: &str = "/report";
/// The downloadable PDF report for a month.
pub const REPORT_PDF: &str = "/report/pdf";

/// The route to create a menu item.
pub const POST_ITEM: &str = "/api/items";
/// The route to update a menu item.
pub const PUT_ITEM: &str = "/api/items/{item_id}";
/// The route to delete a menu item.
pub const DELETE_ITEM: &str = "/api/items/{item_id}";
/// The route to create a transaction from a menu item.
pub const ADD_TRANSACTION: &str = "/api/transactions/from/{item_id}";
/// The route to update a transaction's quantity.
pub const PUT_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to delete every transaction of a month.
pub const CLEAR_MONTH: &str = "/api/transactions/month/{month}";
/// The route to flip and persist the theme preference.
pub const TOGGLE_THEME: &str = "/api/theme";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/items/{item_id}/edit', '{item_id}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let Some(param_end) = endpoint_path[param_start..].find('}') else {
        return endpoint_path.to_owned();
    };

    let mut formatted = String::with_capacity(endpoint_path.len() + id.len());
    formatted.push_str(&endpoint_path[..param_start]);
    formatted.push_str(id);
    formatted.push_str(&endpoint_path[param_start + param_end + 1..]);

    formatted
}
