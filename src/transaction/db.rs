//! Store operations for the transaction collection.
//!
//! Like the menu item catalog, the whole collection is persisted as one JSON
//! array under a single key. Every mutation loads the collection, applies the
//! change in memory and writes the collection back.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    menu_item::MenuItem,
    store::{TRANSACTIONS_KEY, get_value, set_value},
    transaction::domain::{MonthKey, Transaction},
};

/// Load all transactions in storage (creation) order.
///
/// A missing or corrupt stored collection degrades to an empty list.
pub fn load_transactions(connection: &Connection) -> Vec<Transaction> {
    get_value(TRANSACTIONS_KEY, Vec::new(), connection)
}

/// Overwrite the persisted transaction collection.
pub fn save_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<(), Error> {
    set_value(TRANSACTIONS_KEY, &transactions, connection)
}

/// The transactions of a single month, in storage order.
///
/// This filter is the one source for the transactions table, the HTML report
/// and the PDF, so the three surfaces always agree on a month's contents.
pub fn transactions_for_month(month: &MonthKey, connection: &Connection) -> Vec<Transaction> {
    load_transactions(connection)
        .into_iter()
        .filter(|transaction| &transaction.month_key == month)
        .collect()
}

/// Append a new transaction created from `item` at `date` and return it.
///
/// The transaction copies the item's current name and amount and starts with
/// a quantity of 1.
pub fn add_transaction(
    item: &MenuItem,
    date: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = Transaction::from_item(item, date);

    let mut transactions = load_transactions(connection);
    transactions.push(transaction.clone());
    save_transactions(&transactions, connection)?;

    Ok(transaction)
}

/// Set the quantity of an existing transaction, leaving every other field
/// untouched.
pub fn update_quantity(
    transaction_id: &str,
    qty: u32,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut transactions = load_transactions(connection);

    let Some(transaction) = transactions
        .iter_mut()
        .find(|transaction| transaction.id == transaction_id)
    else {
        return Err(Error::UpdateMissingTransaction);
    };

    transaction.qty = qty;
    let updated = transaction.clone();

    save_transactions(&transactions, connection)?;

    Ok(updated)
}

/// Delete a single transaction by ID.
pub fn delete_transaction(transaction_id: &str, connection: &Connection) -> Result<(), Error> {
    let mut transactions = load_transactions(connection);
    let count_before = transactions.len();

    transactions.retain(|transaction| transaction.id != transaction_id);

    if transactions.len() == count_before {
        return Err(Error::DeleteMissingTransaction);
    }

    save_transactions(&transactions, connection)
}

/// Delete every transaction of `month` and return how many were removed.
///
/// Transactions of other months are untouched. Clearing a month with no
/// transactions is a no-op, not an error.
pub fn clear_month(month: &MonthKey, connection: &Connection) -> Result<usize, Error> {
    let mut transactions = load_transactions(connection);
    let count_before = transactions.len();

    transactions.retain(|transaction| &transaction.month_key != month);
    let removed = count_before - transactions.len();

    save_transactions(&transactions, connection)?;

    Ok(removed)
}

#[cfg(test)]
mod transaction_store_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        menu_item::{ItemName, create_menu_item},
        store::create_store_table,
        transaction::domain::{MonthKey, grand_total},
    };

    use super::{
        add_transaction, clear_month, delete_transaction, load_transactions,
        transactions_for_month, update_quantity,
    };

    fn get_test_store() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_store_table(&connection).expect("Could not create kv table");
        connection
    }

    #[test]
    fn adding_the_same_item_twice_creates_two_rows() {
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

        let transactions = load_transactions(&connection);
        assert_eq!(transactions.len(), 2);
        assert_ne!(transactions[0].id, transactions[1].id);
        assert_eq!(transactions[0].item_id, item.id);
        assert_eq!(transactions[1].item_id, item.id);
    }

    #[test]
    fn new_transaction_starts_with_quantity_one() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Maintenance payment"),
            4537.0,
            String::new(),
            &connection,
        )
        .unwrap();

        add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();

        let month = MonthKey::new("2025-06").unwrap();
        let transactions = transactions_for_month(&month, &connection);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].qty, 1);
        assert_eq!(grand_total(&transactions), 4537.0);
    }

    #[test]
    fn quantity_update_changes_the_grand_total() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Maintenance payment"),
            4537.0,
            String::new(),
            &connection,
        )
        .unwrap();
        add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        let second = add_transaction(&item, datetime!(2025-06-04 10:00 +5:30), &connection).unwrap();

        update_quantity(&second.id, 3, &connection).expect("Could not update quantity");

        let month = MonthKey::new("2025-06").unwrap();
        assert_eq!(
            grand_total(&transactions_for_month(&month, &connection)),
            18148.0
        );
    }

    #[test]
    fn quantity_update_leaves_other_fields_untouched() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Watercan"),
            80.0,
            String::new(),
            &connection,
        )
        .unwrap();
        let created = add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();

        let updated = update_quantity(&created.id, 5, &connection).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.amount, created.amount);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.month_key, created.month_key);
        assert_eq!(updated.qty, 5);
    }

    #[test]
    fn updating_missing_transaction_fails() {
        let connection = get_test_store();

        assert_eq!(
            update_quantity("no-such-id", 2, &connection),
            Err(Error::UpdateMissingTransaction)
        );
    }

    #[test]
    fn delete_removes_only_the_given_transaction() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Watercan"),
            80.0,
            String::new(),
            &connection,
        )
        .unwrap();
        let keep = add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        let remove = add_transaction(&item, datetime!(2025-06-04 10:00 +5:30), &connection).unwrap();

        delete_transaction(&remove.id, &connection).expect("Could not delete transaction");

        let transactions = load_transactions(&connection);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, keep.id);
    }

    #[test]
    fn deleting_missing_transaction_fails() {
        let connection = get_test_store();

        assert_eq!(
            delete_transaction("no-such-id", &connection),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn clearing_a_month_spares_other_months() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Watercan"),
            80.0,
            String::new(),
            &connection,
        )
        .unwrap();
        add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        add_transaction(&item, datetime!(2025-06-20 10:00 +5:30), &connection).unwrap();
        let july = add_transaction(&item, datetime!(2025-07-01 10:00 +5:30), &connection).unwrap();

        let removed = clear_month(&MonthKey::new("2025-06").unwrap(), &connection)
            .expect("Could not clear month");

        assert_eq!(removed, 2);
        let remaining = load_transactions(&connection);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, july.id);
    }

    #[test]
    fn clearing_an_empty_month_is_a_no_op() {
        let connection = get_test_store();

        let removed = clear_month(&MonthKey::new("2030-01").unwrap(), &connection).unwrap();

        assert_eq!(removed, 0);
        assert!(load_transactions(&connection).is_empty());
    }

    #[test]
    fn month_filter_only_returns_matching_transactions() {
        let connection = get_test_store();
        let item = create_menu_item(
            ItemName::new_unchecked("Watercan"),
            80.0,
            String::new(),
            &connection,
        )
        .unwrap();
        let june = add_transaction(&item, datetime!(2025-06-03 10:00 +5:30), &connection).unwrap();
        add_transaction(&item, datetime!(2025-07-01 10:00 +5:30), &connection).unwrap();

        let transactions =
            transactions_for_month(&MonthKey::new("2025-06").unwrap(), &connection);

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, june.id);
    }
}
