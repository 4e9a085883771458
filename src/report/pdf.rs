//! PDF rendering and download endpoint for the monthly report.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    html::{format_currency, format_date, format_date_time},
    report::{
        page::ReportQuery,
        summary::{MonthSummary, SummaryRow},
    },
    transaction::truncate_label,
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const ROW_HEIGHT_MM: f32 = 6.0;

// Column x positions, shared by the header and every row.
const X_INDEX: f32 = MARGIN_MM;
const X_NAME: f32 = 27.0;
const X_UNIT: f32 = 105.0;
const X_QTY: f32 = 135.0;
const X_TOTAL: f32 = 150.0;
const X_DATE: f32 = 178.0;

/// The state needed for the PDF download endpoint.
#[derive(Debug, Clone)]
pub struct ReportPdfEndpointState {
    /// The connection to the key/value store.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to resolve the current month and to timestamp the
    /// report.
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportPdfEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Handle the PDF download for a month.
///
/// The response carries the document as an attachment named after the month,
/// e.g. "expenses-2025-06.pdf".
pub async fn get_report_pdf(
    Query(query): Query<ReportQuery>,
    State(state): State<ReportPdfEndpointState>,
) -> Result<Response, Error> {
    let month = query.resolve_month(&state.local_timezone);
    let generated_at = crate::report::local_now(&state.local_timezone);

    let summary = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        MonthSummary::build(month, generated_at, &connection)
    };

    let bytes = render_month_pdf(&summary)?;
    let disposition = format!("attachment; filename=\"{}\"", summary.pdf_file_name());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Render a month summary as a single A4 portrait PDF document.
///
/// Rows that do not fit on a page continue on a fresh page with a repeated
/// table header.
pub fn render_month_pdf(summary: &MonthSummary) -> Result<Vec<u8>, Error> {
    let title = format!("Expense Report {}", summary.month);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| Error::PdfGenerationError(error.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| Error::PdfGenerationError(error.to_string()))?;

    let mut y: f32 = PAGE_HEIGHT_MM - 17.0;

    layer.use_text(title.as_str(), 16.0, Mm(MARGIN_MM), Mm(y), &font_bold);
    y -= 7.0;
    layer.use_text(
        format!("Generated {}", format_date_time(summary.generated_at)),
        10.0,
        Mm(MARGIN_MM),
        Mm(y),
        &font,
    );
    y -= 8.0;

    if summary.rows.is_empty() {
        layer.use_text(
            "No transactions for this month.",
            11.0,
            Mm(MARGIN_MM),
            Mm(y),
            &font,
        );
    } else {
        draw_table_header(&layer, &font_bold, &mut y);

        for row in &summary.rows {
            if y < 25.0 {
                let (page, page_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = PAGE_HEIGHT_MM - 17.0;
                draw_table_header(&layer, &font_bold, &mut y);
            }

            draw_row(&layer, &font, row, y);
            y -= ROW_HEIGHT_MM;
        }

        y -= 2.0;
        draw_divider(&layer, y + ROW_HEIGHT_MM - 2.0);

        layer.use_text("Grand Total", 12.0, Mm(X_QTY), Mm(y), &font_bold);
        layer.use_text(
            format_currency(summary.grand_total),
            12.0,
            Mm(X_TOTAL),
            Mm(y),
            &font_bold,
        );
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|error| Error::PdfGenerationError(error.to_string()))?;

    writer
        .into_inner()
        .map_err(|error| Error::PdfGenerationError(error.to_string()))
}

fn draw_table_header(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y: &mut f32) {
    layer.use_text("#", 10.0, Mm(X_INDEX), Mm(*y), font_bold);
    layer.use_text("Item", 10.0, Mm(X_NAME), Mm(*y), font_bold);
    layer.use_text("Unit Price", 10.0, Mm(X_UNIT), Mm(*y), font_bold);
    layer.use_text("Qty", 10.0, Mm(X_QTY), Mm(*y), font_bold);
    layer.use_text("Total", 10.0, Mm(X_TOTAL), Mm(*y), font_bold);
    layer.use_text("Date", 10.0, Mm(X_DATE), Mm(*y), font_bold);

    *y -= 3.5;
    draw_divider(layer, *y);
    *y -= ROW_HEIGHT_MM;
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, row: &SummaryRow, y: f32) {
    layer.use_text(row.index.to_string(), 10.0, Mm(X_INDEX), Mm(y), font);
    layer.use_text(truncate_label(&row.name), 10.0, Mm(X_NAME), Mm(y), font);
    layer.use_text(format_currency(row.amount), 10.0, Mm(X_UNIT), Mm(y), font);
    layer.use_text(row.qty.to_string(), 10.0, Mm(X_QTY), Mm(y), font);
    layer.use_text(format_currency(row.line_total), 10.0, Mm(X_TOTAL), Mm(y), font);
    layer.use_text(format_date(row.date), 10.0, Mm(X_DATE), Mm(y), font);
}

fn draw_divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (
                printpdf::Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)),
                false,
            ),
        ],
        is_closed: false,
    });
}


#[cfg(test)]
mod get_report_pdf_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        menu_item::{ItemName, create_menu_item},
        report::page::ReportQuery,
        store::create_store_table,
        test_utils::get_header,
        transaction::add_transaction,
    };

    use super::{ReportPdfEndpointState, get_report_pdf};

    fn get_report_pdf_state() -> ReportPdfEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_store_table(&connection).expect("Could not create kv table");

        ReportPdfEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Asia/Kolkata".to_owned(),
        }
    }

    #[tokio::test]
    async fn download_is_named_after_the_month() {
        let state = get_report_pdf_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let item = create_menu_item(
                ItemName::new_unchecked("Watercan"),
                80.0,
                String::new(),
                &connection,
            )
            .unwrap();
            add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        }

        let response = get_report_pdf(
            Query(ReportQuery {
                month: Some("2025-06".to_owned()),
            }),
            State(state),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "content-type"), "application/pdf");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"expenses-2025-06.pdf\""
        );
    }

    #[tokio::test]
    async fn empty_month_still_downloads() {
        let state = get_report_pdf_state();

        let response = get_report_pdf(
            Query(ReportQuery {
                month: Some("2030-01".to_owned()),
            }),
            State(state),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
