//! Shopping list item model
//!
//! Items are open JSON objects: `id`, `name` and `quantity` are the only
//! fields the server interprets, everything else is carried through untouched
//! and in its original order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID_FIELD: &str = "id";
const NAME_FIELD: &str = "name";
const QUANTITY_FIELD: &str = "quantity";

/// A single shopping list entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

/// The whole persisted document, in insertion order
pub type Collection = Vec<Item>;

impl Item {
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Numeric id, if the item carries a non-negative integral one.
    /// `2.0` and `2` are the same id.
    pub fn id(&self) -> Option<u64> {
        let value = self.0.get(ID_FIELD)?;
        value.as_u64().or_else(|| value.as_f64().and_then(integral_id))
    }

    pub fn set_id(&mut self, id: u64) {
        self.0.insert(ID_FIELD.to_string(), Value::from(id));
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    pub fn quantity(&self) -> Option<f64> {
        self.0.get(QUANTITY_FIELD).and_then(Value::as_f64)
    }

    /// Shallow merge: every top-level field of `update` replaces ours,
    /// including `id`. Fields absent from `update` are kept.
    pub fn merge(&mut self, update: Self) {
        for (key, value) in update.0 {
            self.0.insert(key, value);
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral_id(number: f64) -> Option<u64> {
    (number.fract() == 0.0 && number >= 0.0 && number < u64::MAX as f64).then_some(number as u64)
}

/// Id for the next created item: the last element's id plus one, or 1 when
/// the collection is empty.
///
/// Only the last element counts, not the maximum, so
/// removing the tail item lets its id be handed out again. A tail item
/// without an integral id counts as 0.
pub fn next_id(items: &[Item]) -> u64 {
    items
        .last()
        .map_or(1, |last| last.id().unwrap_or(0).saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_uses_last_not_max() {
        let items = vec![
            item(json!({"id": 7, "name": "Eggs", "quantity": 12})),
            item(json!({"id": 3, "name": "Milk", "quantity": 1})),
        ];
        assert_eq!(next_id(&items), 4);
    }

    #[test]
    fn test_next_id_non_numeric_tail() {
        let items = vec![item(json!({"id": "abc", "name": "Tea", "quantity": 1}))];
        assert_eq!(next_id(&items), 1);
    }

    #[test]
    fn test_integral_float_id() {
        assert_eq!(item(json!({"id": 2.0})).id(), Some(2));
        assert_eq!(item(json!({"id": 2.5})).id(), None);
        assert_eq!(item(json!({"id": -1})).id(), None);
        assert_eq!(item(json!({"id": "2"})).id(), None);

        let items = vec![item(json!({"id": 2.0, "name": "Jam", "quantity": 1}))];
        assert_eq!(next_id(&items), 3);
    }

    #[test]
    fn test_merge_body_wins() {
        let mut existing = item(json!({"id": 1, "name": "Milk", "quantity": 2, "note": "skim"}));
        existing.merge(item(json!({"name": "Oat milk", "quantity": 3, "id": 9})));
        assert_eq!(existing.id(), Some(9));
        assert_eq!(existing.name(), Some("Oat milk"));
        assert_eq!(existing.quantity(), Some(3.0));
        assert_eq!(serde_json::to_value(&existing).unwrap()["note"], "skim");
    }

    #[test]
    fn test_field_order_preserved() {
        let mut created = item(json!({"name": "Milk", "quantity": 2}));
        created.set_id(1);
        assert_eq!(
            serde_json::to_string(&created).unwrap(),
            r#"{"name":"Milk","quantity":2,"id":1}"#
        );
    }
}
