//! Type coercion functions.
//!
//! Each takes one raw value and returns it converted to a fixed target
//! type. They are plain functions, so they slot straight into
//! [`RequestValidator::coerce`](crate::RequestValidator::coerce).

use crate::errors::{CoercionError, TargetType};
use crate::value::display_value;
use serde_json::{Number, Value};

/// Signature shared by coercion functions and caller closures.
pub type CoerceFn = dyn Fn(Value) -> Result<Value, CoercionError> + Send + Sync;

// 2^63: truncated floats at or above this overflow i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Convert to an integer.
///
/// Strings are parsed as integers first and fall back to a float parse;
/// floats are truncated toward zero.
pub fn to_integer(value: Value) -> Result<Value, CoercionError> {
    match &value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value),
        Value::Number(n) => match n.as_f64() {
            Some(f) => truncate(f, &value),
            None => Err(CoercionError::new(TargetType::Integer, &value, "not a number")),
        },
        Value::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::from(i));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Ok(Value::from(u));
            }
            match text.parse::<f64>() {
                Ok(f) => truncate(f, &value),
                Err(_) => Err(CoercionError::new(
                    TargetType::Integer,
                    &value,
                    "invalid literal for an integer",
                )),
            }
        }
        Value::Bool(b) => Ok(Value::from(i64::from(*b))),
        _ => Err(unsupported(TargetType::Integer, &value)),
    }
}

/// Convert to a float.
pub fn to_float(value: Value) -> Result<Value, CoercionError> {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => return Err(unsupported(TargetType::Float, &value)),
    };

    let f = parsed.ok_or_else(|| {
        CoercionError::new(TargetType::Float, &value, "could not parse a float")
    })?;

    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| CoercionError::new(TargetType::Float, &value, "not a finite number"))
}

/// Convert to a string. Never fails.
pub fn to_string(value: Value) -> Result<Value, CoercionError> {
    match value {
        Value::String(_) => Ok(value),
        other => Ok(Value::String(display_value(&other))),
    }
}

fn truncate(f: f64, original: &Value) -> Result<Value, CoercionError> {
    if !f.is_finite() {
        return Err(CoercionError::new(
            TargetType::Integer,
            original,
            "cannot convert a non-finite float",
        ));
    }
    let t = f.trunc();
    if t >= I64_UPPER || t < -I64_UPPER {
        return Err(CoercionError::new(
            TargetType::Integer,
            original,
            "out of the 64-bit integer range",
        ));
    }
    Ok(Value::from(t as i64))
}

fn unsupported(target: TargetType, value: &Value) -> CoercionError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    CoercionError::new(target, value, format!("{} has no {} form", kind, target))
}
