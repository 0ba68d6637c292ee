//! Order domain model
//!
//! The record carried by order events, persisted in batches and served by
//! the lookup endpoint. Field rules are enforced with `validator`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::cache::CacheValue;

/// Banks accepted on a payment
pub const SUPPORTED_BANKS: [&str; 4] = ["sber", "alpha", "vtb", "tinkoff"];

// == Order ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Order {
    #[validate(length(min = 10, max = 60))]
    pub order_uid: String,
    #[validate(length(min = 10, max = 60))]
    pub track_number: String,
    #[validate(length(min = 3, max = 10))]
    pub entry: String,
    #[validate(nested)]
    pub delivery: Delivery,
    #[validate(nested)]
    pub payment: Payment,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<Item>,
    #[validate(custom(function = "validate_country_code"))]
    pub locale: String,
    #[validate(length(min = 1))]
    pub internal_signature: String,
    #[validate(length(min = 2, max = 50))]
    pub customer_id: String,
    #[validate(length(min = 1))]
    pub delivery_service: String,
    #[validate(length(min = 1, max = 10))]
    pub shardkey: String,
    #[validate(range(min = 1))]
    pub sm_id: i64,
    pub date_created: DateTime<Utc>,
    #[validate(length(min = 1, max = 10))]
    pub oof_shard: String,
}

impl CacheValue for Order {
    /// An order without an identifier cannot be looked up again.
    fn is_nil(&self) -> bool {
        self.order_uid.is_empty()
    }
}

// == Delivery ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Delivery {
    #[validate(length(min = 2, max = 100))]
    #[validate(custom(function = "validate_letters_and_spaces"))]
    pub name: String,
    #[validate(custom(function = "validate_e164_phone"))]
    pub phone: String,
    #[validate(length(min = 5, max = 8))]
    #[validate(custom(function = "validate_numeric"))]
    pub zip: String,
    #[validate(length(min = 3, max = 50))]
    #[validate(custom(function = "validate_letters_and_spaces"))]
    pub city: String,
    #[validate(length(min = 10, max = 100))]
    pub address: String,
    #[validate(length(min = 3, max = 60))]
    #[validate(custom(function = "validate_letters_and_spaces"))]
    pub region: String,
    #[validate(email)]
    pub email: String,
}

// == Payment ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Payment {
    #[validate(length(min = 10, max = 60))]
    pub transaction: String,
    #[validate(length(min = 1))]
    pub request_id: String,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    #[validate(length(min = 2, max = 25))]
    pub provider: String,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(range(min = 1))]
    pub payment_dt: i64,
    #[validate(custom(function = "validate_bank"))]
    pub bank: String,
    #[validate(range(min = 0))]
    pub delivery_cost: i64,
    #[validate(range(min = 1))]
    pub goods_total: i64,
    #[validate(range(min = 0, max = 99))]
    pub custom_fee: i64,
}

// == Item ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(range(min = 1))]
    pub chrt_id: i64,
    #[validate(length(min = 10, max = 50))]
    pub track_number: String,
    #[validate(range(min = 1))]
    pub price: i64,
    #[validate(length(min = 10, max = 50))]
    #[validate(custom(function = "validate_hex"))]
    pub rid: String,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(range(min = 0, max = 99))]
    pub sale: i64,
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 1))]
    pub total_price: i64,
    #[validate(range(min = 1))]
    pub nm_id: i64,
    #[validate(length(min = 3, max = 50))]
    pub brand: String,
    #[validate(range(min = 1))]
    pub status: i64,
}

// Custom validation functions

fn validate_letters_and_spaces(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '.' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("letters_and_spaces"))
    }
}

/// `+` followed by 8 to 15 digits, the first of which is not zero
fn validate_e164_phone(value: &str) -> Result<(), ValidationError> {
    let valid = value.strip_prefix('+').is_some_and(|digits| {
        (8..=15).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0')
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("e164"))
    }
}

fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric"))
    }
}

fn validate_hex(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("hexadecimal"))
    }
}

fn is_upper_code(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_uppercase())
}

/// ISO 3166-1 alpha-2 shaped code, e.g. `RU`
fn validate_country_code(value: &str) -> Result<(), ValidationError> {
    if is_upper_code(value, 2) {
        Ok(())
    } else {
        Err(ValidationError::new("iso3166_1_alpha2"))
    }
}

/// ISO 4217 shaped code, e.g. `USD`
fn validate_currency_code(value: &str) -> Result<(), ValidationError> {
    if is_upper_code(value, 3) {
        Ok(())
    } else {
        Err(ValidationError::new("iso4217"))
    }
}

fn validate_bank(value: &str) -> Result<(), ValidationError> {
    if SUPPORTED_BANKS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_bank"))
    }
}

/// A fully valid order for tests.
#[cfg(test)]
pub(crate) fn sample_order(order_uid: &str) -> Order {
    Order {
        order_uid: order_uid.to_string(),
        track_number: "WBILMTESTTRACK".to_string(),
        entry: "WBIL".to_string(),
        delivery: Delivery {
            name: "Test Testov".to_string(),
            phone: "+9720000000".to_string(),
            zip: "2639809".to_string(),
            city: "Kiryat Mozkin".to_string(),
            address: "Ploshad Mira 15".to_string(),
            region: "Kraiot".to_string(),
            email: "test@gmail.com".to_string(),
        },
        payment: Payment {
            transaction: format!("tx-{order_uid}"),
            request_id: "req-1".to_string(),
            currency: "USD".to_string(),
            provider: "wbpay".to_string(),
            amount: 1817,
            payment_dt: 1637907727,
            bank: "alpha".to_string(),
            delivery_cost: 1500,
            goods_total: 317,
            custom_fee: 0,
        },
        items: vec![Item {
            chrt_id: 9934930,
            track_number: "WBILMTESTTRACK".to_string(),
            price: 453,
            rid: "ab4219087a764ae0b0000".to_string(),
            name: "Mascaras".to_string(),
            sale: 30,
            size: "0".to_string(),
            total_price: 317,
            nm_id: 2389212,
            brand: "Vivienne Sabo".to_string(),
            status: 202,
        }],
        locale: "EN".to_string(),
        internal_signature: "sig".to_string(),
        customer_id: "test".to_string(),
        delivery_service: "meest".to_string(),
        shardkey: "9".to_string(),
        sm_id: 99,
        date_created: "2021-11-26T06:22:19Z".parse().unwrap(),
        oof_shard: "1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_order_is_valid() {
        assert!(sample_order("b563feb7b2b84b6test").validate().is_ok());
    }

    #[test]
    fn test_order_without_items_is_invalid() {
        let mut order = sample_order("b563feb7b2b84b6test");
        order.items.clear();

        let errors = order.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn test_nested_item_rules_apply() {
        let mut order = sample_order("b563feb7b2b84b6test");
        order.items[0].rid = "not-hex-at-all".to_string();

        assert!(order.validate().is_err());
    }

    #[test]
    fn test_nested_delivery_rules_apply() {
        let mut order = sample_order("b563feb7b2b84b6test");
        order.delivery.email = "not an email".to_string();

        assert!(order.validate().is_err());
    }

    #[test]
    fn test_short_order_uid_is_invalid() {
        let order = sample_order("short");
        let errors = order.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("order_uid"));
    }

    #[test]
    fn test_unsupported_bank() {
        let mut order = sample_order("b563feb7b2b84b6test");
        order.payment.bank = "wbpay".to_string();

        assert!(order.validate().is_err());
    }

    #[test]
    fn test_custom_validators() {
        assert!(validate_e164_phone("+9720000000").is_ok());
        assert!(validate_e164_phone("9720000000").is_err());
        assert!(validate_e164_phone("+0720000000").is_err());
        assert!(validate_e164_phone("+97200a0000").is_err());

        assert!(validate_letters_and_spaces("Saint-Petersburg").is_ok());
        assert!(validate_letters_and_spaces("Room 101").is_err());

        assert!(validate_numeric("2639809").is_ok());
        assert!(validate_numeric("26398O9").is_err());

        assert!(validate_country_code("RU").is_ok());
        assert!(validate_country_code("ru").is_err());
        assert!(validate_currency_code("RUB").is_ok());
        assert!(validate_currency_code("RUBL").is_err());
    }

    #[test]
    fn test_order_json_field_names() {
        let json = serde_json::to_value(sample_order("b563feb7b2b84b6test")).unwrap();

        assert_eq!(json["order_uid"], "b563feb7b2b84b6test");
        assert_eq!(json["payment"]["bank"], "alpha");
        assert_eq!(json["items"][0]["chrt_id"], 9934930);
        assert_eq!(json["date_created"], "2021-11-26T06:22:19Z");
    }

    #[test]
    fn test_order_without_uid_is_nil() {
        assert!(sample_order("").is_nil());
        assert!(!sample_order("b563feb7b2b84b6test").is_nil());
    }
}
