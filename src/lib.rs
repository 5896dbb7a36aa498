// Fieldcheck - per-field request validation
//
// Each field runs through presence checks, type coercion and rule
// predicates, stopping at the first failure.

// Re-export the validation pipeline
pub use fieldcheck_validation::*;

// Logging
pub use fieldcheck_log as log;

#[cfg(feature = "config")]
pub use fieldcheck_config as config;

#[cfg(feature = "config")]
pub use fieldcheck_config::SettingsLoader;

// Prelude for common imports
pub mod prelude {
    pub use crate::coerce::{to_float, to_integer, to_string};
    pub use crate::{
        Custom,
        DataRequired,
        EqualTo,
        FieldError,
        GreaterThan,
        GreaterThanOrEqualTo,
        KeyRequired,
        Length,
        LessThan,
        LessThanOrEqualTo,
        NumberRange,
        PresenceCheck,
        Record,
        RegexFlags,
        Regexp,
        RequestValidator,
        Rule,
        ValidationError,
    };
    pub use serde_json::{Value, json};
}
