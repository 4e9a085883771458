//! The read-only HTML report for a month.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency, format_date, format_date_time,
    },
    navigation::NavBar,
    report::summary::MonthSummary,
    theme::{Theme, load_theme},
    transaction::{MonthKey, current_local_month},
};

/// The state needed for the report page.
#[derive(Debug, Clone)]
pub struct ReportPageState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to resolve the current month and to timestamp the
    /// report.
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the report page and the PDF endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// The month to report on as "YYYY-MM". Defaults to the current month.
    pub month: Option<String>,
}

impl ReportQuery {
    /// The queried month, falling back to the current month in `timezone`
    /// when the query is absent or malformed.
    pub fn resolve_month(&self, timezone: &str) -> MonthKey {
        self.month
            .as_deref()
            .and_then(|raw| MonthKey::new(raw).ok())
            .unwrap_or_else(|| current_local_month(timezone))
    }
}

/// Render the report page: the same rows and total as the transactions table,
/// but read-only and timestamped.
pub async fn get_report_page(
    Query(query): Query<ReportQuery>,
    State(state): State<ReportPageState>,
) -> Response {
    let month = query.resolve_month(&state.local_timezone);
    let generated_at = crate::report::local_now(&state.local_timezone);

    let (summary, theme) = match state.db_connection.lock() {
        Ok(connection) => (
            MonthSummary::build(month, generated_at, &connection),
            load_theme(&connection),
        ),
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    report_view(&summary, theme).into_response()
}

fn report_view(summary: &MonthSummary, theme: Option<Theme>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let pdf_link = format!("{}?month={}", endpoints::REPORT_PDF, summary.month);
    let back_link = format!("{}?month={}", endpoints::TRANSACTIONS_VIEW, summary.month);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Expense Report " (summary.month) }

                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Generated " (format_date_time(summary.generated_at))
                    }
                }

                @if summary.rows.is_empty() {
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
                                }
                            }

                            tbody
                            {
                                @for row in &summary.rows {
                                    tr class=(TABLE_ROW_STYLE)
                                    {
                                        td class=(TABLE_CELL_STYLE) { (row.index) }
                                        td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                        {
                                            (row.name)
                                        }
                                        td class=(TABLE_CELL_STYLE) { (format_currency(row.amount)) }
                                        td class=(TABLE_CELL_STYLE) { (row.qty) }
                                        td class=(TABLE_CELL_STYLE) { (format_currency(row.line_total)) }
                                        td class=(TABLE_CELL_STYLE) { (format_date(row.date)) }
                                    }
                                }
                            }

                            tfoot
                            {
                                tr class="font-semibold text-gray-900 dark:text-white"
                                {
                                    th class=(TABLE_CELL_STYLE) colspan="4" { "Grand Total" }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (format_currency(summary.grand_total))
                                    }
                                    td class=(TABLE_CELL_STYLE) {}
                                }
                            }
                        }
                    }
                }

                footer class="flex flex-wrap gap-2"
                {
                    a href=(back_link) class=(BUTTON_SECONDARY_STYLE) { "Back to Transactions" }

                    a href=(pdf_link) class=(BUTTON_SECONDARY_STYLE) download { "Download PDF" }
                }
            }
        }
    };

    base("Expense Report", theme, &content)
}
