//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, menu_item::MenuItem, new_id};

/// A zero-padded "YYYY-MM" month, used to bucket transactions for monthly
/// views and reports.
///
/// Month keys are compared by plain string equality; there is no range logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse a "YYYY-MM" string as a month key.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidMonthKey] if `raw` is not a zero-padded
    /// year-month with a month between 01 and 12.
    pub fn new(raw: &str) -> Result<Self, Error> {
        let bytes = raw.as_bytes();

        let well_formed = bytes.len() == 7
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5..].iter().all(u8::is_ascii_digit)
            && matches!(raw[5..].parse::<u8>(), Ok(1..=12));

        if well_formed {
            Ok(Self(raw.to_owned()))
        } else {
            Err(Error::InvalidMonthKey(raw.to_owned()))
        }
    }

    /// The zero-padded local-calendar year-month of `date`.
    pub fn from_date(date: Date) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month() as u8))
    }

    /// The month key as a "YYYY-MM" string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        MonthKey::new(&raw)
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.0
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthKey::new(s)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A historical expense record instantiated from a menu item.
///
/// The name and amount are copied from the item at creation time and never
/// re-resolved, so later edits or deletion of the item leave the record
/// unchanged. Only the quantity is editable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The opaque identifier of the transaction.
    pub id: String,
    /// The ID of the menu item this transaction was created from.
    pub item_id: String,
    /// The item name at the time of creation.
    pub name: String,
    /// The unit price at the time of creation, in rupees.
    pub amount: f64,
    /// How many units were purchased. Always at least 1.
    pub qty: u32,
    /// When the transaction was created, in the configured local timezone.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The month bucket of `date`, computed once at creation.
    ///
    /// Stored as a query convenience; it is never recomputed on read and
    /// never mutated independently of `date`.
    pub month_key: MonthKey,
}

impl Transaction {
    /// Create a transaction from a menu item, copying the item's current name
    /// and amount, with a quantity of 1.
    ///
    /// `date` should already be in the local timezone; the month key is
    /// derived from it here and nowhere else.
    pub fn from_item(item: &MenuItem, date: OffsetDateTime) -> Self {
        Self {
            id: new_id(),
            item_id: item.id.clone(),
            name: item.name.to_string(),
            amount: item.amount,
            qty: 1,
            date,
            month_key: MonthKey::from_date(date.date()),
        }
    }

    /// The amount spent on this transaction: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.amount * f64::from(self.qty)
    }
}

/// Sum the line totals of a filtered transaction list.
///
/// Every surface that displays a grand total (the live table, the HTML
/// report, the PDF) derives it from this one function so they can never
/// disagree.
pub fn grand_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(Transaction::line_total)
        .sum()
}

/// Coerce a submitted quantity to a positive integer.
///
/// Values below 1 and non-numeric input coerce to 1; fractional values round
/// down to a whole quantity.
pub fn clamp_quantity(raw: &str) -> u32 {
    let value = raw.trim().parse::<f64>().unwrap_or(1.0);

    if value.is_finite() && value >= 1.0 {
        value.floor() as u32
    } else {
        1
    }
}


#[cfg(test)]
mod transaction_tests {
    use time::macros::datetime;

    use crate::menu_item::{ItemName, MenuItem};

    use super::{MonthKey, Transaction, grand_total};

    fn watercan() -> MenuItem {
        MenuItem {
            id: "item-1".to_owned(),
            name: ItemName::new_unchecked("Watercan"),
            amount: 80.0,
            image: String::new(),
        }
    }

    #[test]
    fn from_item_copies_name_and_amount() {
        let item = watercan();

        let transaction = Transaction::from_item(&item, datetime!(2025-06-03 14:30 +5:30));

        assert_eq!(transaction.item_id, "item-1");
        assert_eq!(transaction.name, "Watercan");
        assert_eq!(transaction.amount, 80.0);
        assert_eq!(transaction.qty, 1);
    }

    #[test]
    fn month_key_is_derived_from_the_date() {
        let transaction = Transaction::from_item(&watercan(), datetime!(2025-06-03 14:30 +5:30));

        assert_eq!(
            transaction.month_key,
            MonthKey::from_date(transaction.date.date())
        );
        assert_eq!(transaction.month_key.as_str(), "2025-06");
    }

    #[test]
    fn a_later_item_edit_does_not_change_the_transaction() {
        let mut item = watercan();
        let transaction = Transaction::from_item(&item, datetime!(2025-06-03 14:30 +5:30));

        item.name = ItemName::new_unchecked("Watercan XL");
        item.amount = 120.0;

        assert_eq!(transaction.name, "Watercan");
        assert_eq!(transaction.amount, 80.0);
    }

    #[test]
    fn line_total_is_amount_times_quantity() {
        let mut transaction = Transaction::from_item(&watercan(), datetime!(2025-06-03 14:30 +5:30));
        transaction.qty = 3;

        assert_eq!(transaction.line_total(), 240.0);
    }

    #[test]
    fn grand_total_is_order_independent() {
        let first = Transaction::from_item(&watercan(), datetime!(2025-06-03 14:30 +5:30));
        let mut second = Transaction::from_item(&watercan(), datetime!(2025-06-04 10:00 +5:30));
        second.qty = 3;

        let forwards = grand_total(&[first.clone(), second.clone()]);
        let backwards = grand_total(&[second, first]);

        assert_eq!(forwards, backwards);
        assert_eq!(forwards, 80.0 * 1.0 + 80.0 * 3.0);
    }
}

#[cfg(test)]
mod clamp_quantity_tests {
    use super::clamp_quantity;

    #[test]
    fn keeps_positive_integers() {
        assert_eq!(clamp_quantity("3"), 3);
    }

    #[test]
    fn zero_coerces_to_one() {
        assert_eq!(clamp_quantity("0"), 1);
    }

    #[test]
    fn negative_values_coerce_to_one() {
        assert_eq!(clamp_quantity("-4"), 1);
    }

    #[test]
    fn non_numeric_input_coerces_to_one() {
        assert_eq!(clamp_quantity("many"), 1);
    }

    #[test]
    fn empty_input_coerces_to_one() {
        assert_eq!(clamp_quantity(""), 1);
    }

    #[test]
    fn fractional_quantities_round_down() {
        assert_eq!(clamp_quantity("2.7"), 2);
    }

    #[test]
    fn fractions_below_one_coerce_to_one() {
        assert_eq!(clamp_quantity("0.4"), 1);
    }
}
