//! Success and failure envelopes shared by resource routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful payload wrapper: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DataBody<T> {
    pub data: T,
}

impl<T> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Single-message failure: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessageBody {
    #[schema(example = "Product not found")]
    pub error: String,
}

impl ErrorMessageBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
