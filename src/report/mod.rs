//! Monthly reporting: the shared aggregate, the HTML report page and the PDF
//! download.

mod page;
mod pdf;
mod summary;

use time::OffsetDateTime;

use crate::app_state::local_offset;

pub use page::get_report_page;
pub use pdf::get_report_pdf;

/// The current time in `timezone`, falling back to UTC if the timezone cannot
/// be resolved.
pub(crate) fn local_now(timezone: &str) -> OffsetDateTime {
    match local_offset(timezone) {
        Some(offset) => OffsetDateTime::now_utc().to_offset(offset),
        None => OffsetDateTime::now_utc(),
    }
}
