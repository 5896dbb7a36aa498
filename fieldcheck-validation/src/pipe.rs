// Field validation pipeline

use crate::coerce::CoerceFn;
use crate::errors::{CoercionError, FieldError, ValidationError};
use crate::presence::presence_for;
use crate::traits::{PresenceCheck, Rule};
use crate::value::Record;
use fieldcheck_config::ValidationSettings;
use fieldcheck_log::Level;
use serde_json::Value;

const TARGET: &str = "fieldcheck::pipeline";

/// Validates one field of a record in three stages.
///
/// Presence checks run against the raw record, coercions thread the raw
/// value through each conversion in order, and rules then inspect the
/// converted value. The first failure of any stage ends the run.
///
/// ```
/// use fieldcheck_validation::{coerce, DataRequired, NumberRange, RequestValidator};
/// use serde_json::json;
///
/// let body = json!({"age": "28"});
/// let age = RequestValidator::new(&body, "age")
///     .presence(DataRequired::new())
///     .coerce(coerce::to_integer)
///     .rule(NumberRange::between(1, 99))
///     .run()
///     .unwrap();
///
/// assert_eq!(age, json!(28));
/// ```
pub struct RequestValidator<'r> {
    record: &'r dyn Record,
    field: String,
    presence: Vec<Box<dyn PresenceCheck>>,
    coercions: Vec<Box<CoerceFn>>,
    rules: Vec<Box<dyn Rule>>,
}

impl<'r> RequestValidator<'r> {
    pub fn new(record: &'r dyn Record, field: impl Into<String>) -> Self {
        Self {
            record,
            field: field.into(),
            presence: Vec::new(),
            coercions: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Start with the presence check chosen by `settings`.
    pub fn with_settings(
        record: &'r dyn Record,
        field: impl Into<String>,
        settings: &ValidationSettings,
    ) -> Self {
        Self::new(record, field).presence(presence_for(settings.presence_policy))
    }

    pub fn presence(mut self, check: impl PresenceCheck + 'static) -> Self {
        self.presence.push(Box::new(check));
        self
    }

    pub fn coerce<F>(mut self, coercion: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        self.coercions.push(Box::new(coercion));
        self
    }

    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Run every stage and return the converted value.
    ///
    /// The record is only read, so `run` may be repeated.
    pub fn run(&self) -> Result<Value, FieldError> {
        let field = self.field.as_str();

        trace_stage(field, "presence");
        for check in &self.presence {
            check
                .evaluate(self.record, field)
                .map_err(|e| rejected(field, "presence", e))?;
        }

        let mut value = self.record.field(field).cloned().unwrap_or(Value::Null);

        trace_stage(field, "coercion");
        for coercion in &self.coercions {
            value = coercion(value).map_err(|e| {
                if fieldcheck_log::enabled(Level::Debug) {
                    let target = e.target.to_string();
                    fieldcheck_log::event(
                        Level::Debug,
                        TARGET,
                        &e.to_string(),
                        &[("field", field), ("stage", "coercion"), ("target", target.as_str())],
                    );
                }
                FieldError::Coercion(e)
            })?;
        }

        trace_stage(field, "rules");
        for rule in &self.rules {
            rule.evaluate(field, &value)
                .map_err(|e| rejected(field, "rules", e))?;
        }

        Ok(value)
    }
}

fn trace_stage(field: &str, stage: &str) {
    if fieldcheck_log::enabled(Level::Trace) {
        fieldcheck_log::event(Level::Trace, TARGET, "entering stage", &[("field", field), ("stage", stage)]);
    }
}

fn rejected(field: &str, stage: &str, error: ValidationError) -> FieldError {
    if fieldcheck_log::enabled(Level::Debug) {
        fieldcheck_log::event(
            Level::Debug,
            TARGET,
            &error.message,
            &[("field", field), ("stage", stage), ("constraint", error.constraint.as_str())],
        );
    }
    FieldError::Validation(error)
}
