//! Field rules for each product route, and the [`RouteInput`] bindings that
//! attach them to the typed inputs.

use axum_helpers::validation::predicates::{
    greater_than_zero, is_boolean, is_integer, is_numeric, is_text, not_empty, optional,
};
use axum_helpers::validation::{coerce_integer, coerce_number};
use axum_helpers::{RouteInput, RuleSet};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::models::{AvailabilityRequest, CreateProduct, ProductIdParam, ReplaceProductRequest};

pub const INVALID_ID: &str = "invalid ID.";
pub const EMPTY_NAME: &str = "the product name cannot be empty.";
pub const INVALID_PRICE: &str = "invalid value.";
pub const EMPTY_PRICE: &str = "the product price cannot be empty.";
pub const NEGATIVE_PRICE: &str = "the price cannot be negative.";
pub const INVALID_AVAILABILITY: &str = "invalid availability value.";

/// `id` path parameter.
pub static ID_RULES: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new().rule("id", is_integer, INVALID_ID));

/// `POST /products` body.
pub static CREATE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("name", is_text, EMPTY_NAME)
        .rule("price", is_numeric, INVALID_PRICE)
        .rule("price", not_empty, EMPTY_PRICE)
        .rule("price", greater_than_zero, NEGATIVE_PRICE)
});

/// `PUT /products/{id}`: id, every create rule, then a required availability.
pub static REPLACE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .extend(&ID_RULES)
        .extend(&CREATE_RULES)
        .rule("availability", is_boolean, INVALID_AVAILABILITY)
});

/// `PATCH /products/{id}`: id and an optional availability.
pub static AVAILABILITY_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .extend(&ID_RULES)
        .rule("availability", optional(is_boolean), INVALID_AVAILABILITY)
});

impl RouteInput for ProductIdParam {
    const READS_BODY: bool = false;

    fn rules() -> &'static RuleSet {
        &ID_RULES
    }

    fn normalize(fields: &mut Map<String, Value>) {
        coerce_integer(fields, "id");
    }
}

impl RouteInput for CreateProduct {
    const READS_BODY: bool = true;

    fn rules() -> &'static RuleSet {
        &CREATE_RULES
    }

    fn normalize(fields: &mut Map<String, Value>) {
        coerce_number(fields, "price");
    }
}

impl RouteInput for ReplaceProductRequest {
    const READS_BODY: bool = true;

    fn rules() -> &'static RuleSet {
        &REPLACE_RULES
    }

    fn normalize(fields: &mut Map<String, Value>) {
        coerce_integer(fields, "id");
        coerce_number(fields, "price");
    }
}

impl RouteInput for AvailabilityRequest {
    const READS_BODY: bool = true;

    fn rules() -> &'static RuleSet {
        &AVAILABILITY_RULES
    }

    fn normalize(fields: &mut Map<String, Value>) {
        coerce_integer(fields, "id");
    }
}
