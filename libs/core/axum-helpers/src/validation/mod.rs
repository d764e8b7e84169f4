//! Declarative request validation.
//!
//! Each route declares an ordered [`RuleSet`]: one entry per
//! `(field, predicate, message)`. Evaluation runs every rule against the
//! merged request payload and reports every failure, in declaration order.
//! A field with several failing rules produces several entries.
//!
//! ```rust
//! use axum_helpers::validation::{RuleSet, predicates::{is_numeric, not_empty}};
//! use serde_json::json;
//!
//! let rules = RuleSet::new()
//!     .rule("price", is_numeric, "invalid value.")
//!     .rule("price", not_empty, "the product price cannot be empty.");
//!
//! let errors = rules.evaluate(&json!({})).unwrap();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors[0].message, "invalid value.");
//! ```

pub mod predicates;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

/// One failed rule, reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Request field the rule applies to
    #[schema(example = "price")]
    pub field: String,
    /// Message declared alongside the rule
    #[schema(example = "the price cannot be negative.")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body returned with 400 when validation fails.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorsBody {
    pub errors: Vec<FieldError>,
}

/// A predicate could not decide.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RuleFault(pub String);

/// The engine failed while evaluating a rule. Never the client's fault.
#[derive(Debug, Clone, Error)]
#[error("rule for field '{field}' faulted: {reason}")]
pub struct ValidationFault {
    pub field: &'static str,
    pub reason: String,
}

pub type Predicate = Arc<dyn Fn(Option<&Value>) -> Result<bool, RuleFault> + Send + Sync>;

#[derive(Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    predicate: Predicate,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered list of field rules for one route.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn rule<P>(mut self, field: &'static str, predicate: P, message: &'static str) -> Self
    where
        P: Fn(Option<&Value>) -> Result<bool, RuleFault> + Send + Sync + 'static,
    {
        self.rules.push(FieldRule {
            field,
            message,
            predicate: Arc::new(predicate),
        });
        self
    }

    /// Append all rules of `other`, after the ones already declared.
    pub fn extend(mut self, other: &RuleSet) -> Self {
        self.rules.extend(other.rules.iter().cloned());
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `payload`.
    ///
    /// Returns the failures in declaration order; an empty list means the
    /// payload is valid. A non-object payload is treated as having no fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFault`] when a predicate faults. The fault is logged
    /// here and callers must not treat the request as valid.
    pub fn evaluate(&self, payload: &Value) -> Result<Vec<FieldError>, ValidationFault> {
        let mut errors = Vec::new();

        for rule in &self.rules {
            let passed = (rule.predicate)(payload.get(rule.field)).map_err(|fault| {
                tracing::error!(field = rule.field, error = %fault, "validation rule faulted");
                ValidationFault {
                    field: rule.field,
                    reason: fault.0,
                }
            })?;

            if !passed {
                errors.push(FieldError::new(rule.field, rule.message));
            }
        }

        Ok(errors)
    }
}

/// Replace a numeric string field with the number it spells.
///
/// Runs after validation, so fields that do not parse are left untouched.
pub fn coerce_number(fields: &mut serde_json::Map<String, Value>, field: &str) {
    let Some(value) = fields.get_mut(field) else {
        return;
    };
    if value.is_string()
        && let Some(n) =
            predicates::numeric_value(Some(&*value)).and_then(serde_json::Number::from_f64)
    {
        *value = Value::Number(n);
    }
}

/// Replace an integer string field with the integer it spells.
pub fn coerce_integer(fields: &mut serde_json::Map<String, Value>, field: &str) {
    let Some(value) = fields.get_mut(field) else {
        return;
    };
    if value.is_string()
        && let Some(n) = predicates::integer_value(Some(&*value))
    {
        *value = Value::from(n);
    }
}
