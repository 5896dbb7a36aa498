// Validation traits

use crate::ValidationError;
use crate::value::Record;
use serde_json::Value;
use std::sync::Arc;

/// A parameterized check against a coerced value.
///
/// Rules are immutable once built, so one instance may be shared across
/// threads and pipelines.
pub trait Rule: Send + Sync {
    /// Accept the value or explain, naming `field`, why not.
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError>;

    /// Constraint tag recorded on errors.
    fn name(&self) -> &'static str;
}

/// A check against the raw record, run before any coercion.
pub trait PresenceCheck: Send + Sync {
    fn evaluate(&self, record: &dyn Record, field: &str) -> Result<(), ValidationError>;

    fn name(&self) -> &'static str;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        (**self).evaluate(field, value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        (**self).evaluate(field, value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: PresenceCheck + ?Sized> PresenceCheck for Box<P> {
    fn evaluate(&self, record: &dyn Record, field: &str) -> Result<(), ValidationError> {
        (**self).evaluate(record, field)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: PresenceCheck + ?Sized> PresenceCheck for Arc<P> {
    fn evaluate(&self, record: &dyn Record, field: &str) -> Result<(), ValidationError> {
        (**self).evaluate(record, field)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
