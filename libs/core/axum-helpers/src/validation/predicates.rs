//! Built-in field predicates.
//!
//! A predicate sees the raw value of one field (`None` when the key is
//! absent) and answers whether it satisfies the rule. Returning `Err` means
//! the predicate itself could not decide, which the engine treats as a
//! fault rather than a client error.

use super::RuleFault;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*\.)?[0-9]+$").expect("numeric pattern is valid"));

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

/// Present and not null, `""`, `[]` or `{}`.
pub fn not_empty(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
        Some(_) => true,
    })
}

/// A non-empty JSON string.
pub fn is_text(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(matches!(value, Some(Value::String(s)) if !s.is_empty()))
}

/// A JSON number, or a string in plain decimal notation such as `"12.5"`.
pub fn is_numeric(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(numeric_value(value).is_some())
}

/// An integer in the `i32` range, either as a JSON number or a decimal string.
/// Leading zeros are allowed: `"01"` is 1.
pub fn is_integer(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(integer_value(value).is_some())
}

/// Numeric and strictly above zero.
pub fn greater_than_zero(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(numeric_value(value).is_some_and(|n| n > 0.0))
}

pub fn is_boolean(value: Option<&Value>) -> Result<bool, RuleFault> {
    Ok(matches!(value, Some(Value::Bool(_))))
}

/// Skip `predicate` when the field is absent.
pub fn optional<P>(predicate: P) -> impl Fn(Option<&Value>) -> Result<bool, RuleFault> + Send + Sync
where
    P: Fn(Option<&Value>) -> Result<bool, RuleFault> + Send + Sync,
{
    move |value| match value {
        None => Ok(true),
        Some(_) => predicate(value),
    }
}

/// Read a field as `f64`, accepting numeric strings.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if NUMERIC.is_match(s) => s.parse().ok(),
        _ => None,
    }
}

/// Read a field as `i32`, accepting integer strings.
pub fn integer_value(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) if INTEGER.is_match(s) => s.parse().ok(),
        _ => None,
    }
}
