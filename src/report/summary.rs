//! The shared monthly aggregate behind the report surfaces.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::transaction::{MonthKey, transactions_for_month};

/// One line of a monthly report.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// The 1-based position of the row within the month.
    pub index: usize,
    /// The item name copied into the transaction at creation time.
    pub name: String,
    /// The unit price in rupees.
    pub amount: f64,
    /// The purchased quantity.
    pub qty: u32,
    /// The unit price times the quantity.
    pub line_total: f64,
    /// When the transaction was created.
    pub date: OffsetDateTime,
}

/// A month's transactions aggregated for reporting.
///
/// The HTML report and the PDF are both rendered from this one struct, which
/// is itself built on the same month filter as the transactions table. The
/// three surfaces therefore always show the same rows and the same total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    /// The reported month.
    pub month: MonthKey,
    /// The month's transactions in storage order.
    pub rows: Vec<SummaryRow>,
    /// The sum of every row's line total.
    pub grand_total: f64,
    /// When the report was generated.
    pub generated_at: OffsetDateTime,
}

impl MonthSummary {
    /// Build the summary of `month` from the stored transactions.
    pub fn build(month: MonthKey, generated_at: OffsetDateTime, connection: &Connection) -> Self {
        let transactions = transactions_for_month(&month, connection);
        let grand_total = crate::transaction::grand_total(&transactions);

        let rows = transactions
            .into_iter()
            .enumerate()
            .map(|(index, transaction)| SummaryRow {
                index: index + 1,
                name: transaction.name.clone(),
                amount: transaction.amount,
                qty: transaction.qty,
                line_total: transaction.line_total(),
                date: transaction.date,
            })
            .collect();

        Self {
            month,
            rows,
            grand_total,
            generated_at,
        }
    }

    /// The download filename for this month's PDF, e.g. "expenses-2025-06.pdf".
    pub fn pdf_file_name(&self) -> String {
        format!("expenses-{}.pdf", self.month)
    }
}

#[cfg(test)]
mod month_summary_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        menu_item::{ItemName, create_menu_item},
        store::create_store_table,
        transaction::{MonthKey, add_transaction},
    };

    use super::MonthSummary;

    fn get_test_store() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_store_table(&connection).expect("Could not create kv table");
        connection
    }

    #[test]
    fn summary_matches_the_month_filter() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Maintenance payment"),
            4537.0,
            String::new(),
            &connection,
        )
        .unwrap();
        add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        add_transaction(&item, datetime!(2025-06-04 10:00 +5:30), &connection).unwrap();
        add_transaction(&item, datetime!(2025-07-01 10:00 +5:30), &connection).unwrap();

        let summary = MonthSummary::build(
            MonthKey::new("2025-06").unwrap(),
            datetime!(2025-06-30 18:00 +5:30),
            &connection,
        );

        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.grand_total, 9074.0);
        assert_eq!(summary.rows[0].index, 1);
        assert_eq!(summary.rows[1].index, 2);
        assert_eq!(summary.rows[0].name, "Maintenance payment");
        assert_eq!(summary.rows[0].line_total, 4537.0);
    }

    #[test]
    fn empty_month_has_a_zero_total() {
        let connection = get_test_store();

        let summary = MonthSummary::build(
            MonthKey::new("2030-01").unwrap(),
            datetime!(2030-01-15 12:00 +5:30),
            &connection,
        );

        assert!(summary.rows.is_empty());
        assert_eq!(summary.grand_total, 0.0);
    }

    #[test]
    fn pdf_file_name_embeds_the_month() {
        let connection = get_test_store();

        let summary = MonthSummary::build(
            MonthKey::new("2025-06").unwrap(),
            datetime!(2025-06-30 18:00 +5:30),
            &connection,
        );

        assert_eq!(summary.pdf_file_name(), "expenses-2025-06.pdf");
    }
}
