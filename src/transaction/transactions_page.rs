//! The transactions page: a month's expenses as an editable table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    app_state::local_offset,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, format_date,
    },
    navigation::NavBar,
    theme::{Theme, load_theme},
    transaction::{
        db::transactions_for_month,
        domain::{MonthKey, Transaction, grand_total},
    },
};

/// How many grapheme clusters of an item name are shown in table rows before
/// the name is cut off.
const MAX_LABEL_GRAPHEMES: usize = 32;

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to resolve the current month.
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the transactions page.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// The month to display as "YYYY-MM". Defaults to the current month.
    pub month: Option<String>,
}

/// The month currently in progress in `timezone`, falling back to UTC if the
/// timezone cannot be resolved.
pub fn current_local_month(timezone: &str) -> MonthKey {
    let now = match local_offset(timezone) {
        Some(offset) => OffsetDateTime::now_utc().to_offset(offset),
        None => OffsetDateTime::now_utc(),
    };

    MonthKey::from_date(now.date())
}

/// Render the transactions page for the queried month.
///
/// An absent or malformed month query falls back to the current month rather
/// than erroring, so stale links always land somewhere sensible.
pub async fn get_transactions_page(
    Query(query): Query<TransactionsQuery>,
    State(state): State<TransactionsPageState>,
) -> Response {
    let month = query
        .month
        .as_deref()
        .and_then(|raw| MonthKey::new(raw).ok())
        .unwrap_or_else(|| current_local_month(&state.local_timezone));

    let (transactions, theme) = match state.db_connection.lock() {
        Ok(connection) => (
            transactions_for_month(&month, &connection),
            load_theme(&connection),
        ),
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    transactions_view(&month, &transactions, theme).into_response()
}

fn transactions_view(
    month: &MonthKey,
    transactions: &[Transaction],
    theme: Option<Theme>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let report_link = format!("{}?month={month}", endpoints::REPORT_VIEW);
    let pdf_link = format!("{}?month={month}", endpoints::REPORT_PDF);
    let clear_endpoint = endpoints::format_endpoint(endpoints::CLEAR_MONTH, month.as_str());

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end gap-2"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    input
                        type="month"
                        name="month"
                        value=(month)
                        class=(FORM_TEXT_INPUT_STYLE)
                        style="width: auto;"
                        hx-get=(endpoints::TRANSACTIONS_VIEW)
                        hx-trigger="change"
                        hx-target="body"
                        hx-push-url="true";
                }

                @if transactions.is_empty() {
                    p class="py-8 text-center text-gray-500 dark:text-gray-400"
                    {
                        "No transactions for this month."
                    }
                } @else {
                    div class="relative overflow-x-auto shadow-md rounded"
                    {
                        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th class=(TABLE_CELL_STYLE) { "#" }
                                    th class=(TABLE_CELL_STYLE) { "Item" }
                                    th class=(TABLE_CELL_STYLE) { "Unit Price" }
                                    th class=(TABLE_CELL_STYLE) { "Qty" }
                                    th class=(TABLE_CELL_STYLE) { "Total" }
                                    th class=(TABLE_CELL_STYLE) { "Date" }
                                    th class=(TABLE_CELL_STYLE) { "" }
                                }
                            }

                            tbody
                            {
                                @for (index, transaction) in transactions.iter().enumerate() {
                                    (transaction_row(index + 1, transaction))
                                }
                            }

                            tfoot
                            {
                                tr class="font-semibold text-gray-900 dark:text-white"
                                {
                                    th class=(TABLE_CELL_STYLE) colspan="4" { "Grand Total" }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (format_currency(grand_total(transactions)))
                                    }
                                    td class=(TABLE_CELL_STYLE) colspan="2" {}
                                }
                            }
                        }
                    }
                }

                footer class="flex flex-wrap gap-2"
                {
                    a href=(report_link) class=(BUTTON_SECONDARY_STYLE) { "View Report" }

                    a href=(pdf_link) class=(BUTTON_SECONDARY_STYLE) download { "Download PDF" }

                    @if !transactions.is_empty() {
                        button
                            class=(BUTTON_DELETE_STYLE)
                            hx-delete=(clear_endpoint)
                            hx-confirm="Remove every transaction of this month? This cannot be undone."
                            hx-target-error="#alert-container"
                        {
                            "Clear Month"
                        }
                    }
                }
            }
        }
    };

    base("Transactions", theme, &content)
}

fn transaction_row(index: usize, transaction: &Transaction) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_TRANSACTION, &transaction.id);
    let delete_endpoint =
        endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (index) }

            td
                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                title=(transaction.name)
            {
                (truncate_label(&transaction.name))
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }

            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="number"
                    name="qty"
                    value=(transaction.qty)
                    min="1"
                    step="1"
                    class={(FORM_TEXT_INPUT_STYLE) " w-20"}
                    hx-put=(update_endpoint)
                    hx-trigger="change"
                    hx-swap="none"
                    hx-target-error="#alert-container";
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.line_total())) }

            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    class=(LINK_STYLE)
                    hx-delete=(delete_endpoint)
                    hx-confirm="Remove this transaction?"
                    hx-target-error="#alert-container"
                {
                    "Remove"
                }
            }
        }
    }
}

/// Cut a display label off at a fixed number of grapheme clusters, appending
/// an ellipsis when anything was dropped.
pub(crate) fn truncate_label(name: &str) -> String {
    let mut graphemes = name.graphemes(true);
    let mut truncated: String = graphemes.by_ref().take(MAX_LABEL_GRAPHEMES).collect();

    if graphemes.next().is_some() {
        truncated.push('…');
    }

    truncated
}
