//! Core menu item domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The image shown for items without an image URL, and substituted by the
/// client when an image URL fails to load.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1520975930463-3b3c5d1036d3?w=1200&q=80&auto=format&fit=crop";

/// A validated, non-empty menu item name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ItemName(String);

impl ItemName {
    /// Create an item name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyItemName] if `name` is empty
    /// after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyItemName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an item name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemName::new(s)
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a menu item amount submitted through the item form.
///
/// # Errors
///
/// Returns an [Error::InvalidAmount] if `raw` is not a finite number greater
/// than or equal to zero.
pub fn parse_amount(raw: &str) -> Result<f64, Error> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| Error::InvalidAmount(raw.to_owned()))
}

/// A reusable purchasable template from which transactions are instantiated.
///
/// Deleting a menu item never touches existing transactions: a transaction is
/// a historical record, not a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// The opaque identifier of the item, generated once at creation.
    pub id: String,
    /// The display name of the item.
    pub name: ItemName,
    /// The unit price of the item in rupees.
    pub amount: f64,
    /// The image URL for the item's card. Empty means "use the placeholder".
    pub image: String,
}

impl MenuItem {
    /// The image URL to render for this item.
    pub fn image_or_placeholder(&self) -> &str {
        if self.image.is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.image
        }
    }
}

/// Form data for menu item creation and editing.
///
/// The amount is kept as a string so that validation failures can be reported
/// with the submitted text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemFormData {
    /// The submitted item name.
    pub name: String,
    /// The submitted unit price.
    pub amount: String,
    /// The submitted image URL, possibly empty.
    #[serde(default)]
    pub image: String,
}

/// The sample catalog the app is seeded with on first run.
pub const DEFAULT_ITEMS: [(&str, f64, &str); 6] = [
    (
        "Maintenance payment",
        4537.0,
        "https://images.unsplash.com/photo-1553729459-efe14ef6055d?w=1200&q=80&auto=format&fit=crop",
    ),
    (
        "Watercan",
        80.0,
        "https://images.unsplash.com/photo-1528909514045-2fa4ac7a08ba?w=1200&q=80&auto=format&fit=crop",
    ),
    (
        "Mobile Recharge",
        549.0,
        "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=1200&q=80&auto=format&fit=crop",
    ),
    (
        "Groceries",
        0.0,
        "https://images.unsplash.com/photo-1542838132-92c53300491e?w=1200&q=80&auto=format&fit=crop",
    ),
    (
        "Petrol",
        0.0,
        "https://images.unsplash.com/photo-1542367597-8849eb47a1ac?w=1200&q=80&auto=format&fit=crop",
    ),
    (
        "Iron",
        0.0,
        "https://images.unsplash.com/photo-1505751172876-fa1923c5c528?w=1200&q=80&auto=format&fit=crop",
    ),
];

#[cfg(test)]
mod item_name_tests {
    use crate::Error;

    use super::ItemName;

    #[test]
    fn new_fails_on_empty_string() {
        let item_name = ItemName::new("");

        assert_eq!(item_name, Err(Error::EmptyItemName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let item_name = ItemName::new("\n\t \r");

        assert_eq!(item_name, Err(Error::EmptyItemName));
    }

    #[test]
    fn new_trims_whitespace() {
        let item_name = ItemName::new("  Groceries  ").unwrap();

        assert_eq!(item_name.as_ref(), "Groceries");
    }
}

#[cfg(test)]
mod parse_amount_tests {
    use crate::Error;

    use super::parse_amount;

    #[test]
    fn accepts_zero() {
        assert_eq!(parse_amount("0"), Ok(0.0));
    }

    #[test]
    fn accepts_positive_numbers() {
        assert_eq!(parse_amount("4537"), Ok(4537.0));
    }

    #[test]
    fn rejects_negative_numbers() {
        assert_eq!(
            parse_amount("-1"),
            Err(Error::InvalidAmount("-1".to_owned()))
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(
            parse_amount("lots"),
            Err(Error::InvalidAmount("lots".to_owned()))
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(parse_amount("NaN").is_err());
    }
}
