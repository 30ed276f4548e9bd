// ── Draft form controller ──
//
// Holds the field values typed for a create or edit operation, as raw
// text. Validation checks presence first, then parses the numeric
// fields; a validated draft becomes an `ItemWriteRequest`.

use thiserror::Error;

use crate::command::ItemWriteRequest;
use crate::model::Item;

/// A draft-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A required field was left blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// Quantity is not a non-negative integer.
    #[error("quantity must be a whole number of 0 or more, got {0:?}")]
    InvalidQuantity(String),

    /// Price is not a non-negative number.
    #[error("price must be a number of 0 or more, got {0:?}")]
    InvalidPrice(String),
}

/// Draft record for create and edit.
///
/// All fields are held as entered text; `validate()` produces the typed
/// request. On a failed submit the caller leaves the draft untouched so
/// the user can correct and retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub quantity: String,
    pub price: String,
    pub category: String,
}

impl ItemForm {
    /// A blank draft for the create path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing item for the edit path.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            price: item.price.to_string(),
            category: item.category.clone(),
        }
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is blank.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.quantity.trim().is_empty()
            && self.price.trim().is_empty()
            && self.category.trim().is_empty()
    }

    /// Check all four fields are present and the numeric ones parse.
    ///
    /// Presence is checked field by field in display order, so the first
    /// missing field is the one reported.
    pub fn validate(&self) -> Result<ItemWriteRequest, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::Missing("name"));
        }
        let quantity_raw = self.quantity.trim();
        if quantity_raw.is_empty() {
            return Err(DraftError::Missing("quantity"));
        }
        let price_raw = self.price.trim();
        if price_raw.is_empty() {
            return Err(DraftError::Missing("price"));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::Missing("category"));
        }

        let quantity: u32 = quantity_raw
            .parse()
            .map_err(|_| DraftError::InvalidQuantity(quantity_raw.to_owned()))?;

        let price: f64 = price_raw
            .parse()
            .map_err(|_| DraftError::InvalidPrice(price_raw.to_owned()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(DraftError::InvalidPrice(price_raw.to_owned()));
        }

        Ok(ItemWriteRequest {
            name: name.to_owned(),
            quantity,
            price,
            category: category.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ItemForm {
        ItemForm {
            name: "Bolt".into(),
            quantity: "10".into(),
            price: "0.5".into(),
            category: "Hardware".into(),
        }
    }

    #[test]
    fn blank_draft_reports_first_missing_field() {
        let form = ItemForm::new();
        assert_eq!(form.validate().unwrap_err(), DraftError::Missing("name"));
    }

    #[test]
    fn each_field_is_required() {
        for (field, blank) in [
            ("name", ItemForm { name: String::new(), ..filled() }),
            ("quantity", ItemForm { quantity: String::new(), ..filled() }),
            ("price", ItemForm { price: String::new(), ..filled() }),
            ("category", ItemForm { category: String::new(), ..filled() }),
        ] {
            assert_eq!(blank.validate().unwrap_err(), DraftError::Missing(field));
        }
    }

    #[test]
    fn valid_draft_produces_request() {
        let req = filled().validate().unwrap();
        assert_eq!(req.name, "Bolt");
        assert_eq!(req.quantity, 10);
        assert!((req.price - 0.5).abs() < f64::EPSILON);
        assert_eq!(req.category, "Hardware");
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let form = ItemForm { name: "   ".into(), ..filled() };
        assert_eq!(form.validate().unwrap_err(), DraftError::Missing("name"));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let form = ItemForm { quantity: "-3".into(), ..filled() };
        assert!(matches!(
            form.validate().unwrap_err(),
            DraftError::InvalidQuantity(_)
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let form = ItemForm { price: "-0.5".into(), ..filled() };
        assert!(matches!(
            form.validate().unwrap_err(),
            DraftError::InvalidPrice(_)
        ));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let form = ItemForm { price: "cheap".into(), ..filled() };
        assert!(matches!(
            form.validate().unwrap_err(),
            DraftError::InvalidPrice(_)
        ));
    }

    #[test]
    fn from_item_round_trips_through_validate() {
        let item = Item {
            id: 7,
            name: "Nut".into(),
            quantity: 100,
            price: 0.1,
            category: "Hardware".into(),
        };
        let req = ItemForm::from_item(&item).validate().unwrap();
        assert_eq!(req.name, "Nut");
        assert_eq!(req.quantity, 100);
        assert_eq!(req.category, "Hardware");
    }

    #[test]
    fn clear_resets_to_blank() {
        let mut form = filled();
        form.clear();
        assert!(form.is_blank());
    }
}
