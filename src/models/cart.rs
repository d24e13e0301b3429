//! Cart request models
//!
//! The inbound `POST /cart` payload: line items plus customer shipping data.
//! Validation collects every field violation before failing, so a client sees
//! the full list of problems in one response.

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind, ValidationErrors};
use super::validation::{
    validate_max_length, validate_minimum, validate_non_negative, validate_required,
};

/// Maximum length for free-text fields
const MAX_TEXT_LEN: usize = 255;

/// Maximum length for phone numbers
const MAX_PHONE_LEN: usize = 20;

/// One product/quantity/price/discount tuple within a cart request.
///
/// `discount` is accepted and carried through processing but is never applied
/// to the selected price or the stock math.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineItem {
    /// ID of the product being purchased
    #[serde(rename = "productId")]
    pub product_id: String,

    /// Price per unit of the product
    pub price: f64,

    /// Quantity of the product requested
    pub quantity: i64,

    /// Discount amount for the product
    pub discount: f64,
}

impl LineItem {
    /// Validate this line item, reporting violations under the given field prefix
    fn validate_into(&self, prefix: &str, errors: &mut ValidationErrors) {
        errors.check(validate_required(
            &self.product_id,
            &format!("{}.productId", prefix),
        ));
        errors.check(validate_max_length(
            &self.product_id,
            &format!("{}.productId", prefix),
            MAX_TEXT_LEN,
        ));
        errors.check(validate_non_negative(
            self.price,
            &format!("{}.price", prefix),
        ));
        errors.check(validate_minimum(
            self.quantity,
            &format!("{}.quantity", prefix),
            1,
        ));
        errors.check(validate_non_negative(
            self.discount,
            &format!("{}.discount", prefix),
        ));
    }
}

/// Customer and shipping data in the cart request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomerData {
    /// Customer's full name
    pub name: String,

    /// Shipping street address
    pub shipping_street: String,

    /// Shipping commune
    pub commune: String,

    /// Customer's phone number
    pub phone: String,
}

impl CustomerData {
    /// Validate every customer field, collecting all violations
    fn validate_into(&self, errors: &mut ValidationErrors) {
        let fields = [
            (&self.name, "customer_data.name", MAX_TEXT_LEN),
            (
                &self.shipping_street,
                "customer_data.shipping_street",
                MAX_TEXT_LEN,
            ),
            (&self.commune, "customer_data.commune", MAX_TEXT_LEN),
            (&self.phone, "customer_data.phone", MAX_PHONE_LEN),
        ];

        for (value, field, max) in fields {
            errors.check(validate_required(value, field));
            errors.check(validate_max_length(value, field, max));
        }
    }
}

/// Main payload for the cart purchase request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CartRequest {
    /// List of products to purchase
    pub products: Vec<LineItem>,

    /// Customer and shipping details
    pub customer_data: CustomerData,
}

impl CartRequest {
    /// Validate the whole request, enumerating every field violation
    pub fn validate_fields(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.products.is_empty() {
            errors.add(ValidationError::new(
                ValidationErrorKind::EmptyList,
                "products",
            ));
        }

        for (index, item) in self.products.iter().enumerate() {
            item.validate_into(&format!("products[{}]", index), &mut errors);
        }

        self.customer_data.validate_into(&mut errors);

        errors.into_result()
    }
}
