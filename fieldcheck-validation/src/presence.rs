//! Presence checks, evaluated against the raw record.

use crate::traits::PresenceCheck;
use crate::value::{Record, is_truthy};
use crate::ValidationError;
use fieldcheck_config::PresencePolicy;

fn missing(field: &str, message: Option<&str>, constraint: &str) -> ValidationError {
    let message = message
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} is required", field));
    ValidationError::new(field, message).with_constraint(constraint)
}

/// The field must be present and truthy.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are all treated as missing.
/// Use [`KeyRequired`] when those are legitimate values.
#[derive(Debug, Clone, Default)]
pub struct DataRequired {
    message: Option<String>,
}

impl DataRequired {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl PresenceCheck for DataRequired {
    fn evaluate(&self, record: &dyn Record, field: &str) -> Result<(), ValidationError> {
        match record.field(field) {
            Some(value) if is_truthy(value) => Ok(()),
            _ => Err(missing(field, self.message.as_deref(), self.name())),
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

/// The key must exist; any value, `null` included, passes.
#[derive(Debug, Clone, Default)]
pub struct KeyRequired {
    message: Option<String>,
}

impl KeyRequired {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl PresenceCheck for KeyRequired {
    fn evaluate(&self, record: &dyn Record, field: &str) -> Result<(), ValidationError> {
        if record.field(field).is_some() {
            Ok(())
        } else {
            Err(missing(field, self.message.as_deref(), self.name()))
        }
    }

    fn name(&self) -> &'static str {
        "keyRequired"
    }
}

/// Presence check matching a configured policy.
pub fn presence_for(policy: PresencePolicy) -> Box<dyn PresenceCheck> {
    match policy {
        PresencePolicy::Truthy => Box::new(DataRequired::new()),
        PresencePolicy::KeyExists => Box::new(KeyRequired::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_required_rejects_missing_key() {
        let err = DataRequired::new().evaluate(&json!({}), "x").unwrap_err();
        assert_eq!(err.message, "x is required");
        assert_eq!(err.constraint, "required");
    }

    // Truthy policy: zero and empty string count as missing.
    #[test]
    fn test_data_required_rejects_falsy_values() {
        let check = DataRequired::new();
        assert!(check.evaluate(&json!({"x": ""}), "x").is_err());
        assert!(check.evaluate(&json!({"x": 0}), "x").is_err());
        assert!(check.evaluate(&json!({"x": false}), "x").is_err());
        assert!(check.evaluate(&json!({"x": null}), "x").is_err());
        assert!(check.evaluate(&json!({"x": "0"}), "x").is_ok());
    }

    #[test]
    fn test_data_required_custom_message() {
        let err = DataRequired::new()
            .with_message("email is required")
            .evaluate(&json!({"name": "a"}), "email")
            .unwrap_err();
        assert_eq!(err.message, "email is required");
        assert_eq!(err.field, "email");
    }

    #[test]
    fn test_key_required_accepts_falsy_values() {
        let check = KeyRequired::new();
        assert!(check.evaluate(&json!({"x": 0}), "x").is_ok());
        assert!(check.evaluate(&json!({"x": ""}), "x").is_ok());
        assert!(check.evaluate(&json!({"x": null}), "x").is_ok());

        let err = check.evaluate(&json!({}), "x").unwrap_err();
        assert_eq!(err.constraint, "keyRequired");
    }

    #[test]
    fn test_presence_for_policy() {
        let record = json!({"n": 0});
        assert!(presence_for(PresencePolicy::Truthy).evaluate(&record, "n").is_err());
        assert!(presence_for(PresencePolicy::KeyExists).evaluate(&record, "n").is_ok());
    }
}
