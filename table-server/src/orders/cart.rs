//! Cart line merging
//!
//! Incoming lines are merged one at a time, in array order, against the
//! live line list: a line whose merge key (item identity + special
//! instructions) matches an existing one increments that line's quantity,
//! anything else appends. Because each incoming line is matched against
//! the list as it mutates, a duplicate pair inside one call collapses
//! into a single incremented line through two sequential matches.
//!
//! An incoming line may be a bare reference (id or name plus quantity):
//! enough to bump an existing line. Name and price become mandatory only
//! when the line does not match anything and must be appended.

use crate::db::models::OrderItem;
use crate::utils::{AppError, AppResult};

/// Client-supplied cart line after normalization, possibly partial
#[derive(Debug, Clone)]
pub struct IncomingLine {
    /// Stable menu item id, when the client sent one
    pub item_id: Option<String>,
    /// Trimmed display name; optional for a bare re-add by id
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: i64,
    pub special_instructions: String,
}

impl IncomingLine {
    /// Merge identity, same shape as [`OrderItem::merge_key`].
    ///
    /// Normalization guarantees at least one of id/name is present.
    pub fn merge_key(&self) -> (&str, &str) {
        (
            self.item_id
                .as_deref()
                .or(self.name.as_deref())
                .unwrap_or_default(),
            &self.special_instructions,
        )
    }

    /// Promote to a stored line; a partial payload cannot open a new line
    pub fn into_item(self) -> AppResult<OrderItem> {
        let (name, price) = match (self.name, self.price) {
            (Some(name), Some(price)) => (name, price),
            (Some(name), None) => {
                return Err(AppError::validation(format!(
                    "'{name}' is not in the cart; a price is required to add it"
                )));
            }
            (None, _) => {
                let key = self.item_id.as_deref().unwrap_or_default();
                return Err(AppError::validation(format!(
                    "'{key}' is not in the cart; a name is required to add it"
                )));
            }
        };
        Ok(OrderItem {
            item_id: self.item_id,
            name,
            price,
            quantity: self.quantity,
            special_instructions: self.special_instructions,
        })
    }
}

/// Merge `incoming` into `lines` using the canonical merge key
pub fn merge_lines(
    lines: &mut Vec<OrderItem>,
    incoming: impl IntoIterator<Item = IncomingLine>,
) -> AppResult<()> {
    for item in incoming {
        match lines
            .iter_mut()
            .find(|line| line.merge_key() == item.merge_key())
        {
            Some(line) => line.quantity += item.quantity,
            None => lines.push(item.into_item()?),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(item_id: Option<&str>, name: &str, quantity: i64, instructions: &str) -> OrderItem {
        OrderItem {
            item_id: item_id.map(Into::into),
            name: name.into(),
            price: 250.0,
            quantity,
            special_instructions: instructions.into(),
        }
    }

    fn full(item_id: Option<&str>, name: &str, quantity: i64, instructions: &str) -> IncomingLine {
        IncomingLine {
            item_id: item_id.map(Into::into),
            name: Some(name.into()),
            price: Some(250.0),
            quantity,
            special_instructions: instructions.into(),
        }
    }

    fn bare(item_id: &str, quantity: i64, instructions: &str) -> IncomingLine {
        IncomingLine {
            item_id: Some(item_id.into()),
            name: None,
            price: None,
            quantity,
            special_instructions: instructions.into(),
        }
    }

    #[test]
    fn same_item_same_instructions_increments_quantity() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 2, "less spicy")];
        merge_lines(&mut lines, [full(Some("x1"), "Paneer Tikka", 1, "less spicy")]).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn bare_reference_bumps_an_existing_line() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 2, "less spicy")];
        merge_lines(&mut lines, [bare("x1", 1, "less spicy")]).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, 250.0);
    }

    #[test]
    fn bare_reference_without_a_matching_line_is_rejected() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 1, "")];
        let err = merge_lines(&mut lines, [bare("x9", 1, "")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn different_instructions_create_distinct_lines() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 1, "less spicy")];
        merge_lines(&mut lines, [full(Some("x1"), "Paneer Tikka", 1, "extra spicy")]).unwrap();

        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_instructions_match_empty_instructions() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 1, "")];
        merge_lines(&mut lines, [full(Some("x1"), "Paneer Tikka", 2, "")]).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn same_call_duplicate_pair_collapses_into_one_line() {
        let mut lines = Vec::new();
        merge_lines(
            &mut lines,
            [
                full(Some("x1"), "Paneer Tikka", 1, ""),
                full(Some("x1"), "Paneer Tikka", 1, ""),
            ],
        )
        .unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn items_without_id_merge_by_name() {
        let mut lines = vec![stored(None, "Masala Chai", 1, "")];
        merge_lines(&mut lines, [full(None, "Masala Chai", 1, "")]).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn unrelated_items_append_in_order() {
        let mut lines = vec![stored(Some("x1"), "Paneer Tikka", 1, "")];
        merge_lines(
            &mut lines,
            [
                full(Some("x2"), "Dal Makhani", 1, ""),
                full(None, "Masala Chai", 2, ""),
            ],
        )
        .unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].name, "Dal Makhani");
        assert_eq!(lines[2].name, "Masala Chai");
    }
}
