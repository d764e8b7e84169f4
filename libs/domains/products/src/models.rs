use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Longest name the `products.name` column holds.
pub const NAME_MAX_LEN: u64 = 100;

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Curved 49\" monitor")]
    pub name: String,
    #[schema(example = 300.0)]
    pub price: f64,
    /// Whether the product can currently be sold
    pub availability: bool,
}

/// Input for creating a product. Availability always starts as `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "the product name must be 1 to 100 characters long."))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "the price cannot be negative."))]
    pub price: f64,
}

/// Full replacement of a product's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplaceProduct {
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "the product name must be 1 to 100 characters long."))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "the price cannot be negative."))]
    pub price: f64,
    pub availability: bool,
}

/// How `PATCH /products/{id}` changes availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityChange {
    /// Flip the stored value
    Toggle,
    /// Store exactly this value
    Set(bool),
}

impl From<Option<bool>> for AvailabilityChange {
    fn from(value: Option<bool>) -> Self {
        value.map_or(AvailabilityChange::Toggle, AvailabilityChange::Set)
    }
}

/// `{id}` path parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProductIdParam {
    pub id: i32,
}

/// `PUT /products/{id}`: path id plus the full product body.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceProductRequest {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl ReplaceProductRequest {
    pub fn into_parts(self) -> (i32, ReplaceProduct) {
        (
            self.id,
            ReplaceProduct {
                name: self.name,
                price: self.price,
                availability: self.availability,
            },
        )
    }
}

/// `PATCH /products/{id}`: path id plus an optional explicit value.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AvailabilityRequest {
    pub id: i32,
    #[serde(default)]
    pub availability: Option<bool>,
}

/// Optional `PATCH` body, for API docs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityBody {
    /// Omit to toggle the current value
    pub availability: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_validation() {
        let ok = CreateProduct {
            name: "Monitor".to_string(),
            price: 300.0,
        };
        assert!(ok.validate().is_ok());

        let zero = CreateProduct {
            name: "Monitor".to_string(),
            price: 0.0,
        };
        assert!(zero.validate().is_err());

        let unnamed = CreateProduct {
            name: String::new(),
            price: 1.0,
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_name_longer_than_column_is_rejected() {
        let input = ReplaceProduct {
            name: "x".repeat(101),
            price: 1.0,
            availability: true,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_availability_change_from_option() {
        assert_eq!(AvailabilityChange::from(None), AvailabilityChange::Toggle);
        assert_eq!(
            AvailabilityChange::from(Some(false)),
            AvailabilityChange::Set(false)
        );
    }

    #[test]
    fn test_replace_request_into_parts() {
        let request = ReplaceProductRequest {
            id: 4,
            name: "Keyboard".to_string(),
            price: 25.5,
            availability: false,
        };
        let (id, input) = request.into_parts();
        assert_eq!(id, 4);
        assert_eq!(input.name, "Keyboard");
        assert!(!input.availability);
    }
}
