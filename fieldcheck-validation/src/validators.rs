// Built-in rule predicates

use crate::traits::Rule;
use crate::value::{compare, display_value, loosely_equal};
use crate::ValidationError;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Build the error for a failed rule, preferring the caller's message.
pub(crate) fn reject(
    field: &str,
    value: &Value,
    constraint: &str,
    message: Option<&str>,
    default: impl FnOnce() -> String,
) -> ValidationError {
    let message = message.map(str::to_string).unwrap_or_else(default);
    ValidationError::new(field, message)
        .with_constraint(constraint)
        .with_value(display_value(value))
}

// Comparison rules

/// Validates that the value equals an operand.
///
/// Numbers compare by value, so `EqualTo::new(42)` accepts `42.0`.
#[derive(Debug, Clone)]
pub struct EqualTo {
    value: Value,
    message: Option<String>,
}

impl EqualTo {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Rule for EqualTo {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        if loosely_equal(value, &self.value) {
            return Ok(());
        }
        Err(reject(field, value, self.name(), self.message.as_deref(), || {
            format!("{} must be equal to {}", field, display_value(&self.value))
        }))
    }

    fn name(&self) -> &'static str {
        "equalTo"
    }
}

macro_rules! ordering_rule {
    ($(#[$meta:meta])* $name:ident, $constraint:literal, $phrase:literal, $($pass:pat_param)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            value: Value,
            message: Option<String>,
        }

        impl $name {
            pub fn new(value: impl Into<Value>) -> Self {
                Self {
                    value: value.into(),
                    message: None,
                }
            }

            pub fn with_message(mut self, message: impl Into<String>) -> Self {
                self.message = Some(message.into());
                self
            }

            pub fn value(&self) -> &Value {
                &self.value
            }
        }

        impl Rule for $name {
            fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
                if matches!(compare(value, &self.value), $(Some($pass))|+) {
                    return Ok(());
                }
                Err(reject(field, value, self.name(), self.message.as_deref(), || {
                    format!(concat!("{} must be ", $phrase, " {}"), field, display_value(&self.value))
                }))
            }

            fn name(&self) -> &'static str {
                $constraint
            }
        }
    };
}

ordering_rule!(
    /// Validates `value > operand`.
    GreaterThan, "greaterThan", "greater than", Ordering::Greater
);

ordering_rule!(
    /// Validates `value >= operand`.
    GreaterThanOrEqualTo, "greaterThanOrEqualTo", "greater than or equal to",
    Ordering::Greater | Ordering::Equal
);

ordering_rule!(
    /// Validates `value < operand`.
    LessThan, "lessThan", "less than", Ordering::Less
);

ordering_rule!(
    /// Validates `value <= operand`.
    LessThanOrEqualTo, "lessThanOrEqualTo", "less than or equal to",
    Ordering::Less | Ordering::Equal
);

// Length

/// Validates string length (in chars) or array/object size.
///
/// Each bound is checked on its own and only when set.
#[derive(Debug, Clone, Default)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    message: Option<String>,
}

impl Length {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn at_least(min: usize) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: usize) -> Self {
        Self::new(None, Some(max))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn measure(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }
}

impl Rule for Length {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let message = self.message.as_deref();
        let Some(len) = Self::measure(value) else {
            return Err(reject(field, value, self.name(), message, || {
                format!("length of {} cannot be measured", field)
            }));
        };

        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(reject(field, value, self.name(), message, || {
                format!("length of {} should not be less than {}", field, min)
            }));
        }

        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(reject(field, value, self.name(), message, || {
                format!("length of {} should not be greater than {}", field, max)
            }));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

// Number range

/// Validates that a number lies within optional inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberRange {
    min: Option<Value>,
    max: Option<Value>,
    message: Option<String>,
}

impl NumberRange {
    pub fn new<T: Into<Value>>(min: Option<T>, max: Option<T>) -> Self {
        Self {
            min: min.map(Into::into),
            max: max.map(Into::into),
            message: None,
        }
    }

    pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self {
            min: Some(min.into()),
            max: Some(max.into()),
            message: None,
        }
    }

    pub fn at_least(min: impl Into<Value>) -> Self {
        Self {
            min: Some(min.into()),
            ..Self::default()
        }
    }

    pub fn at_most(max: impl Into<Value>) -> Self {
        Self {
            max: Some(max.into()),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for NumberRange {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let message = self.message.as_deref();
        if !value.is_number() {
            return Err(reject(field, value, self.name(), message, || {
                format!("{} must be a number", field)
            }));
        }

        if let Some(min) = &self.min {
            if !matches!(compare(value, min), Some(Ordering::Greater | Ordering::Equal)) {
                return Err(reject(field, value, self.name(), message, || {
                    format!("{} should not be less than {}", field, display_value(min))
                }));
            }
        }

        if let Some(max) = &self.max {
            if !matches!(compare(value, max), Some(Ordering::Less | Ordering::Equal)) {
                return Err(reject(field, value, self.name(), message, || {
                    format!("{} should not be greater than {}", field, display_value(max))
                }));
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "numberRange"
    }
}

// Custom rules

type CheckFn = dyn Fn(&str, &Value) -> Result<(), ValidationError> + Send + Sync;

/// Wraps a closure as a rule.
pub struct Custom {
    name: &'static str,
    check: Box<CheckFn>,
}

impl Custom {
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Box::new(check),
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}

impl Rule for Custom {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        (self.check)(field, value)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
