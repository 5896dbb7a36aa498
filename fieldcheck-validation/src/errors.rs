// Validation errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A presence check or rule rejected a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Human readable message, already naming the field
    pub message: String,

    /// Constraint that failed
    pub constraint: String,

    /// Text of the offending value, when there was one
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// JSON body suitable for an API error response
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "message": self.message,
            "constraint": self.constraint,
            "value": self.value,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Target type of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Integer,
    Float,
    String,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetType::Integer => "integer",
            TargetType::Float => "float",
            TargetType::String => "string",
        })
    }
}

/// A raw value could not be converted to the requested type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {value} to {target}: {reason}")]
pub struct CoercionError {
    pub target: TargetType,
    /// JSON text of the rejected value
    pub value: String,
    pub reason: String,
}

impl CoercionError {
    pub fn new(target: TargetType, value: &serde_json::Value, reason: impl Into<String>) -> Self {
        Self {
            target,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Any failure of a field pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

impl FieldError {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            FieldError::Validation(e) => Some(e),
            FieldError::Coercion(_) => None,
        }
    }

    pub fn as_coercion(&self) -> Option<&CoercionError> {
        match self {
            FieldError::Coercion(e) => Some(e),
            FieldError::Validation(_) => None,
        }
    }
}
