//! Product request types.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, num_bigint::Sign};
use schemars::JsonSchema;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use tollgate_store::model::NewProduct;
use validator::{Validate, ValidationError};

use super::validations::validation_error;

/// Maximum number of digits before the decimal point.
const PRICE_MAX_INTEGER_DIGITS: i64 = 8;

/// Maximum number of digits after the decimal point.
const PRICE_MAX_FRACTION_DIGITS: i64 = 2;

/// Request payload for creating a new product.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateProduct {
    /// Display name of the product (1-255 characters).
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Unit price as a decimal string or number, e.g. `"19.99"` or `19.99`.
    #[schemars(with = "String")]
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(custom(function = "validate_price"))]
    pub price: BigDecimal,
}

impl CreateProduct {
    /// Converts this request into a [`NewProduct`] for insertion.
    #[inline]
    pub fn into_model(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
        }
    }
}

/// Accepts a price as a JSON string or number.
///
/// Numbers are parsed from their shortest decimal form, so `19.99` stays
/// `19.99` rather than the nearest binary fraction.
fn deserialize_price<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(PriceVisitor)
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = BigDecimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price as a string or number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        BigDecimal::from_str(value.trim())
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(BigDecimal::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(BigDecimal::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        BigDecimal::from_str(&value.to_string())
            .map_err(|_| E::invalid_value(de::Unexpected::Float(value), &self))
    }
}

/// Checks that a price fits `decimal(10, 2)` and is not negative.
fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price.sign() == Sign::Minus {
        return Err(validation_error(
            "price_negative",
            "Price cannot be negative",
        ));
    }

    // Exponent notation like `1e10000000` must be bounded without
    // expanding the number, so digits are counted from the scale.
    let normalized = price.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale > PRICE_MAX_FRACTION_DIGITS {
        return Err(validation_error(
            "price_precision",
            "Price can have at most two decimal places",
        ));
    }

    let integer_digits = i64::try_from(normalized.digits())
        .unwrap_or(i64::MAX)
        .saturating_sub(scale);
    if integer_digits > PRICE_MAX_INTEGER_DIGITS {
        return Err(validation_error(
            "price_too_large",
            "Price can have at most eight digits before the decimal point",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn product(name: &str, price: &str) -> anyhow::Result<CreateProduct> {
        Ok(CreateProduct {
            name: name.to_owned(),
            price: BigDecimal::from_str(price)?,
        })
    }

    #[test]
    fn accepts_valid_prices() -> anyhow::Result<()> {
        for price in ["0", "0.5", "19.99", "99999999.99", "10.100", "1e2", "1.5E1"] {
            assert!(product("Widget", price)?.validate().is_ok(), "{price}");
        }
        Ok(())
    }

    #[test]
    fn rejects_invalid_prices() -> anyhow::Result<()> {
        for price in ["-0.01", "1.001", "100000000", "1e9", "1e10000000", "1e-10000000"] {
            assert!(product("Widget", price)?.validate().is_err(), "{price}");
        }
        Ok(())
    }

    #[test]
    fn huge_exponents_are_rejected_quickly() -> anyhow::Result<()> {
        let started = Instant::now();
        assert!(product("Widget", "1e10000000")?.validate().is_err());
        assert!(started.elapsed() < Duration::from_secs(1));
        Ok(())
    }

    #[test]
    fn numeric_prices_keep_their_decimal_form() -> anyhow::Result<()> {
        let request: CreateProduct = serde_json::from_str(r#"{"name":"Widget","price":19.99}"#)?;
        assert_eq!(request.price, BigDecimal::from_str("19.99")?);
        assert!(request.validate().is_ok());

        let request: CreateProduct = serde_json::from_str(r#"{"name":"Widget","price":42}"#)?;
        assert_eq!(request.price, BigDecimal::from(42));

        let request: CreateProduct = serde_json::from_str(r#"{"name":"Widget","price":"5.50"}"#)?;
        assert_eq!(request.price, BigDecimal::from_str("5.5")?);
        Ok(())
    }

    #[test]
    fn non_numeric_prices_fail_to_parse() {
        for body in [
            r#"{"name":"Widget","price":"cheap"}"#,
            r#"{"name":"Widget","price":true}"#,
            r#"{"name":"Widget","price":null}"#,
        ] {
            assert!(serde_json::from_str::<CreateProduct>(body).is_err(), "{body}");
        }
    }

    #[test]
    fn rejects_empty_name() -> anyhow::Result<()> {
        assert!(product("", "1.00")?.validate().is_err());
        assert!(product(&"n".repeat(256), "1.00")?.validate().is_err());
        Ok(())
    }
}
