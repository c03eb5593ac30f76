//! Field-level validation rules for products, customers and orders.
//!
//! This is the only place these rules live. Every write path (resource API,
//! legacy endpoint, seed command) builds a draft, calls `validate`, and only
//! hands the resulting `Valid*` value to the store.
//!
//! Drafts keep every field optional so that "absent" is distinguishable from
//! "present but wrong". Partial updates arrive as a patch ([`ProductPatch`]
//! and friends), are merged over the stored entity's draft, and the result
//! is validated as a whole.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;
use crate::order_status::OrderStatus;
use crate::types::{DbId, OrderDate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of `Product.name`, in characters.
pub const PRODUCT_NAME_MAX_LEN: usize = 255;
/// Maximum length of `Customer.name`, in characters.
pub const CUSTOMER_NAME_MAX_LEN: usize = 100;
/// Maximum length of `Customer.address`, in characters.
pub const CUSTOMER_ADDRESS_MAX_LEN: usize = 255;
/// Fractional digits kept for prices (`NUMERIC(5, 2)`).
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const MIN_PRICE_TEXT: &str = "0.01";
const MAX_PRICE_TEXT: &str = "999.99";

/// Smallest admissible price.
pub fn min_price() -> Decimal {
    Decimal::new(1, PRICE_DECIMAL_PLACES)
}

/// Largest price that fits five total digits with two fractional ones.
pub fn max_price() -> Decimal {
    Decimal::new(99_999, PRICE_DECIMAL_PLACES)
}

// =============================================================================
// Field rules
// =============================================================================

/// Required, non-blank text no longer than `max` characters.
///
/// Absent and blank values both fail with `on_blank`, which lets each caller
/// choose between `EmptyField` and `MissingField`.
fn validate_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
    on_blank: ValidationError,
) -> ValidationResult<String> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(on_blank),
    };

    if value.chars().count() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }

    Ok(value.to_string())
}

pub fn validate_product_name(name: Option<&str>) -> ValidationResult<String> {
    validate_text(
        name,
        "name",
        PRODUCT_NAME_MAX_LEN,
        ValidationError::EmptyField { field: "name" },
    )
}

/// Validate a product price and return it rescaled to two decimal places.
///
/// Checks run in a fixed order and the first failure wins:
/// precision, then the lower bound, then the upper bound.
pub fn validate_price(price: Option<Decimal>) -> ValidationResult<Decimal> {
    let price = price.ok_or(ValidationError::MissingField { field: "price" })?;

    let mut normalized = price.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return Err(ValidationError::PrecisionError {
            field: "price",
            places: PRICE_DECIMAL_PLACES,
        });
    }

    if normalized < min_price() {
        return Err(ValidationError::BelowMinimum {
            field: "price",
            min: MIN_PRICE_TEXT,
        });
    }

    if normalized > max_price() {
        return Err(ValidationError::ExceedsMaximum {
            field: "price",
            max: MAX_PRICE_TEXT,
        });
    }

    normalized.rescale(PRICE_DECIMAL_PLACES);
    Ok(normalized)
}

/// `available` has no default at this layer, even though the column does.
pub fn validate_available(available: Option<bool>) -> ValidationResult<bool> {
    available.ok_or(ValidationError::MissingField { field: "available" })
}

pub fn validate_customer_name(name: Option<&str>) -> ValidationResult<String> {
    validate_text(
        name,
        "name",
        CUSTOMER_NAME_MAX_LEN,
        ValidationError::EmptyField { field: "name" },
    )
}

pub fn validate_customer_address(address: Option<&str>) -> ValidationResult<String> {
    validate_text(
        address,
        "address",
        CUSTOMER_ADDRESS_MAX_LEN,
        ValidationError::MissingField { field: "address" },
    )
}

pub fn validate_order_customer(customer: Option<DbId>) -> ValidationResult<DbId> {
    customer.ok_or(ValidationError::MissingReference { field: "customer" })
}

pub fn validate_order_date(date: Option<OrderDate>) -> ValidationResult<OrderDate> {
    date.ok_or(ValidationError::MissingField { field: "date" })
}

pub fn validate_order_status(status: Option<&str>) -> ValidationResult<OrderStatus> {
    status
        .ok_or(ValidationError::MissingField { field: "status" })?
        .parse()
}

// =============================================================================
// Partial updates
// =============================================================================

/// One field of a partial update body.
///
/// Needs `#[serde(default)]` on the containing struct so that a missing key
/// becomes [`PatchField::Omitted`] rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    Omitted,
    Null,
    Set(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Omitted
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PatchField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => PatchField::Set(value),
            None => PatchField::Null,
        })
    }
}

impl<T> PatchField<T> {
    /// The patched value, or `stored` when the field was omitted.
    pub fn over(self, stored: Option<T>, field: &'static str) -> ValidationResult<Option<T>> {
        match self {
            PatchField::Omitted => Ok(stored),
            PatchField::Null => Err(ValidationError::NullField { field }),
            PatchField::Set(value) => Ok(Some(value)),
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// Unvalidated product fields, as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub available: Option<bool>,
}

/// A product that passed every rule and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub name: String,
    pub price: Decimal,
    pub available: bool,
}

/// Body of a product PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: PatchField<String>,
    pub price: PatchField<Decimal>,
    pub available: PatchField<bool>,
}

impl ProductPatch {
    /// Apply the patch over the stored product's fields.
    pub fn merged(self, base: ProductDraft) -> ValidationResult<ProductDraft> {
        Ok(ProductDraft {
            name: self.name.over(base.name, "name")?,
            price: self.price.over(base.price, "price")?,
            available: self.available.over(base.available, "available")?,
        })
    }
}

impl ProductDraft {
    pub fn validate(&self) -> ValidationResult<ValidProduct> {
        Ok(ValidProduct {
            name: validate_product_name(self.name.as_deref())?,
            price: validate_price(self.price)?,
            available: validate_available(self.available)?,
        })
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Unvalidated customer fields, as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// A customer that passed every rule and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCustomer {
    pub name: String,
    pub address: String,
}

/// Body of a customer PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerPatch {
    pub name: PatchField<String>,
    pub address: PatchField<String>,
}

impl CustomerPatch {
    pub fn merged(self, base: CustomerDraft) -> ValidationResult<CustomerDraft> {
        Ok(CustomerDraft {
            name: self.name.over(base.name, "name")?,
            address: self.address.over(base.address, "address")?,
        })
    }
}

impl CustomerDraft {
    pub fn validate(&self) -> ValidationResult<ValidCustomer> {
        Ok(ValidCustomer {
            name: validate_customer_name(self.name.as_deref())?,
            address: validate_customer_address(self.address.as_deref())?,
        })
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Unvalidated order fields, as received from a client.
///
/// `products` is `None` when the client did not mention the association set
/// at all, which matters for partial updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDraft {
    pub customer: Option<DbId>,
    pub products: Option<Vec<DbId>>,
    pub date: Option<OrderDate>,
    pub status: Option<String>,
}

/// An order that passed every rule.
///
/// `products` is sorted and free of duplicates: the association is a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOrder {
    pub customer: DbId,
    pub products: Vec<DbId>,
    pub date: OrderDate,
    pub status: OrderStatus,
}

/// Body of an order PATCH. A `products` list replaces the whole set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    pub customer: PatchField<DbId>,
    pub products: PatchField<Vec<DbId>>,
    pub date: PatchField<OrderDate>,
    pub status: PatchField<String>,
}

impl OrderPatch {
    pub fn merged(self, base: OrderDraft) -> ValidationResult<OrderDraft> {
        Ok(OrderDraft {
            customer: self.customer.over(base.customer, "customer")?,
            products: self.products.over(base.products, "products")?,
            date: self.date.over(base.date, "date")?,
            status: self.status.over(base.status, "status")?,
        })
    }
}

impl OrderDraft {
    pub fn validate(&self) -> ValidationResult<ValidOrder> {
        let customer = validate_order_customer(self.customer)?;
        let date = validate_order_date(self.date)?;
        let status = validate_order_status(self.status.as_deref())?;

        let mut products = self.products.clone().unwrap_or_default();
        products.sort_unstable();
        products.dedup();

        Ok(ValidOrder {
            customer,
            products,
            date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(name: &str, price: &str, available: Option<bool>) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_string()),
            price: Some(dec(price)),
            available,
        }
    }

    // -------------------------------------------------------------------------
    // Product
    // -------------------------------------------------------------------------

    #[test]
    fn valid_product_round_trips() {
        let valid = product("Temporary product", "1.99", Some(true))
            .validate()
            .unwrap();
        assert_eq!(valid.name, "Temporary product");
        assert_eq!(valid.price, dec("1.99"));
        assert!(valid.available);
    }

    #[test]
    fn product_name_boundary() {
        let at_limit = "a".repeat(PRODUCT_NAME_MAX_LEN);
        assert!(product(&at_limit, "1.99", Some(true)).validate().is_ok());

        let over = "a".repeat(PRODUCT_NAME_MAX_LEN + 1);
        assert_matches!(
            product(&over, "1.99", Some(true)).validate(),
            Err(ValidationError::FieldTooLong { field: "name", max: 255 })
        );
    }

    #[test]
    fn product_name_length_counts_characters_not_bytes() {
        let name = "é".repeat(PRODUCT_NAME_MAX_LEN);
        assert!(product(&name, "1.99", Some(true)).validate().is_ok());
    }

    #[test]
    fn blank_or_missing_product_name_is_empty_field() {
        assert_matches!(
            product("", "1.99", Some(true)).validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
        assert_matches!(
            product("   ", "1.99", Some(true)).validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );

        let draft = ProductDraft {
            name: None,
            price: Some(dec("1.99")),
            available: Some(true),
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn minimum_price_is_accepted() {
        let valid = product("p", "0.01", Some(true)).validate().unwrap();
        assert_eq!(valid.price, dec("0.01"));
    }

    #[test]
    fn zero_and_negative_prices_are_below_minimum() {
        for raw in ["0", "0.00", "-1.99"] {
            assert_matches!(
                product("p", raw, Some(true)).validate(),
                Err(ValidationError::BelowMinimum { field: "price", .. }),
                "price {raw} should be rejected"
            );
        }
    }

    #[test]
    fn three_decimal_places_is_a_precision_error() {
        assert_matches!(
            product("p", "1.999", Some(true)).validate(),
            Err(ValidationError::PrecisionError { field: "price", places: 2 })
        );
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        let valid = product("p", "1.990", Some(true)).validate().unwrap();
        assert_eq!(valid.price.to_string(), "1.99");
    }

    #[test]
    fn price_is_rescaled_to_two_places() {
        let valid = product("p", "4.5", Some(true)).validate().unwrap();
        assert_eq!(valid.price.to_string(), "4.50");
    }

    #[test]
    fn price_magnitude_is_bounded() {
        assert!(product("p", "999.99", Some(true)).validate().is_ok());
        assert_matches!(
            product("p", "1000.00", Some(true)).validate(),
            Err(ValidationError::ExceedsMaximum { field: "price", .. })
        );
        assert_matches!(
            product("p", "100000", Some(true)).validate(),
            Err(ValidationError::ExceedsMaximum { field: "price", .. })
        );
    }

    #[test]
    fn missing_price_is_missing_field() {
        let draft = ProductDraft {
            name: Some("p".into()),
            price: None,
            available: Some(true),
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "price" })
        );
    }

    #[test]
    fn missing_availability_is_not_defaulted() {
        assert_matches!(
            product("p", "1.99", None).validate(),
            Err(ValidationError::MissingField { field: "available" })
        );
    }

    #[test]
    fn merged_patch_keeps_untouched_fields() {
        let base = product("Temporary product", "1.99", Some(true));
        let patch: ProductPatch =
            serde_json::from_value(serde_json::json!({ "name": "Modified Product" })).unwrap();
        let valid = patch.merged(base).unwrap().validate().unwrap();
        assert_eq!(valid.name, "Modified Product");
        assert_eq!(valid.price, dec("1.99"));
        assert!(valid.available);
    }

    #[test]
    fn explicit_null_in_patch_is_rejected() {
        let patch: ProductPatch =
            serde_json::from_value(serde_json::json!({ "price": null })).unwrap();
        assert_eq!(patch.price, PatchField::Null);
        assert_eq!(patch.name, PatchField::Omitted);
        assert_matches!(
            patch.merged(product("p", "1.99", Some(true))),
            Err(ValidationError::NullField { field: "price" })
        );

        let patch: OrderPatch =
            serde_json::from_value(serde_json::json!({ "products": null })).unwrap();
        assert_matches!(
            patch.merged(OrderDraft::default()),
            Err(ValidationError::NullField { field: "products" })
        );
    }

    // -------------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------------

    fn customer(name: Option<&str>, address: Option<&str>) -> CustomerDraft {
        CustomerDraft {
            name: name.map(str::to_string),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn valid_customer() {
        let valid = customer(Some("Temporary customer"), Some("Swidnicka 2, 50-345 Wroclaw"))
            .validate()
            .unwrap();
        assert_eq!(valid.address, "Swidnicka 2, 50-345 Wroclaw");
    }

    #[test]
    fn customer_name_boundary() {
        let at_limit = "a".repeat(CUSTOMER_NAME_MAX_LEN);
        assert!(customer(Some(&at_limit), Some("x")).validate().is_ok());

        let over = "a".repeat(CUSTOMER_NAME_MAX_LEN + 1);
        assert_matches!(
            customer(Some(&over), Some("x")).validate(),
            Err(ValidationError::FieldTooLong { field: "name", max: 100 })
        );
    }

    #[test]
    fn empty_customer_name() {
        assert_matches!(
            customer(Some(""), Some("x")).validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn missing_or_blank_address() {
        assert_matches!(
            customer(Some("c"), None).validate(),
            Err(ValidationError::MissingField { field: "address" })
        );
        assert_matches!(
            customer(Some("c"), Some("")).validate(),
            Err(ValidationError::MissingField { field: "address" })
        );
    }

    #[test]
    fn address_too_long() {
        let over = "a".repeat(CUSTOMER_ADDRESS_MAX_LEN + 1);
        assert_matches!(
            customer(Some("c"), Some(&over)).validate(),
            Err(ValidationError::FieldTooLong { field: "address", max: 255 })
        );
    }

    // -------------------------------------------------------------------------
    // Order
    // -------------------------------------------------------------------------

    fn order() -> OrderDraft {
        OrderDraft {
            customer: Some(1),
            products: Some(vec![3, 1, 3]),
            date: OrderDate::from_ymd_opt(2025, 1, 4),
            status: Some("In Process".into()),
        }
    }

    #[test]
    fn valid_order_dedups_products() {
        let valid = order().validate().unwrap();
        assert_eq!(valid.products, vec![1, 3]);
        assert_eq!(valid.status, OrderStatus::InProcess);
    }

    #[test]
    fn order_without_products_is_valid() {
        let draft = OrderDraft {
            products: None,
            ..order()
        };
        assert!(draft.validate().unwrap().products.is_empty());
    }

    #[test]
    fn order_without_customer_is_an_integrity_failure() {
        let draft = OrderDraft {
            customer: None,
            ..order()
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::MissingReference { field: "customer" })
        );
    }

    #[test]
    fn order_status_must_be_a_known_literal() {
        let draft = OrderDraft {
            status: Some("Shipped".into()),
            ..order()
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::InvalidChoice { field: "status", .. })
        );

        let draft = OrderDraft {
            status: None,
            ..order()
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "status" })
        );
    }

    #[test]
    fn order_date_is_required() {
        let draft = OrderDraft {
            date: None,
            ..order()
        };
        assert_matches!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "date" })
        );
    }

    #[test]
    fn price_deserializes_from_number_and_string() {
        let from_number: ProductDraft =
            serde_json::from_str(r#"{"name":"p","price":4.99,"available":true}"#).unwrap();
        assert_eq!(from_number.price, Some(dec("4.99")));

        let from_string: ProductDraft =
            serde_json::from_str(r#"{"name":"p","price":"4.99","available":true}"#).unwrap();
        assert_eq!(from_string.price, Some(dec("4.99")));
    }
}
