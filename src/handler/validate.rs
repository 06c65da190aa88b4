//! Item payload validation
//!
//! POST and PUT share one rule set: a non-blank string `name` and a numeric
//! `quantity` strictly greater than zero. Other fields pass through.

use serde_json::Value;

use super::error::ValidationError;
use crate::store::Item;

/// Parse a request body and check the required fields
pub fn parse_item(body: &[u8]) -> Result<Item, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;

    // Non-object JSON (arrays, numbers, null) has no `name` to speak of
    let Value::Object(fields) = value else {
        return Err(ValidationError::InvalidName);
    };

    let item = Item::from_map(fields);
    validate_item(&item)?;
    Ok(item)
}

/// Name is checked first, so a payload failing both reports the name
pub fn validate_item(item: &Item) -> Result<(), ValidationError> {
    if !item.name().is_some_and(|name| !name.trim().is_empty()) {
        return Err(ValidationError::InvalidName);
    }

    if !item.quantity().is_some_and(|quantity| quantity > 0.0) {
        return Err(ValidationError::InvalidQuantity);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(body: &str) -> Result<Item, ValidationError> {
        parse_item(body.as_bytes())
    }

    #[test]
    fn test_valid_payload_keeps_extra_fields() {
        let item = check(r#"{"name":"Milk","quantity":2,"brand":"Acme"}"#).unwrap();
        assert_eq!(item.name(), Some("Milk"));
        assert_eq!(item.quantity(), Some(2.0));
        assert_eq!(serde_json::to_value(&item).unwrap()["brand"], "Acme");
        assert_eq!(item.id(), None);
    }

    #[test]
    fn test_fractional_quantity() {
        assert!(check(r#"{"name":"Flour","quantity":0.5}"#).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        for body in [
            r#"{"quantity":1}"#,
            r#"{"name":"","quantity":1}"#,
            r#"{"name":"   ","quantity":1}"#,
            r#"{"name":42,"quantity":1}"#,
            r#"{"name":null,"quantity":1}"#,
            r#"[{"name":"Milk","quantity":1}]"#,
            "null",
        ] {
            assert_eq!(check(body), Err(ValidationError::InvalidName), "{body}");
        }
    }

    #[test]
    fn test_invalid_quantities() {
        for body in [
            r#"{"name":"Milk"}"#,
            r#"{"name":"Milk","quantity":0}"#,
            r#"{"name":"Milk","quantity":-3}"#,
            r#"{"name":"Milk","quantity":"2"}"#,
            r#"{"name":"Milk","quantity":null}"#,
        ] {
            assert_eq!(
                check(body),
                Err(ValidationError::InvalidQuantity),
                "{body}"
            );
        }
    }

    #[test]
    fn test_name_reported_before_quantity() {
        assert_eq!(
            check(r#"{"name":"","quantity":0}"#),
            Err(ValidationError::InvalidName)
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(check("{"), Err(ValidationError::InvalidJson(_))));
        assert!(matches!(check(""), Err(ValidationError::InvalidJson(_))));
    }
}
