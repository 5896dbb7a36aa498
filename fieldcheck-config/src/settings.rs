// Pipeline settings

use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Default compiled-program budget for user supplied patterns (10 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// How a presence check decides that a field was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresencePolicy {
    /// The value must be truthy: `null`, `false`, `0`, `""`, `[]` and `{}`
    /// all count as missing.
    #[default]
    Truthy,
    /// The key only has to exist, whatever its value.
    KeyExists,
}

/// Settings shared by every pipeline built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub presence_policy: PresencePolicy,
    pub regex_size_limit: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            presence_policy: PresencePolicy::Truthy,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

/// Trait for checking loaded settings
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ValidationSettings {
    fn validate(&self) -> Result<()> {
        if self.regex_size_limit == 0 {
            return Err(ConfigError::ValidationError(
                "regex_size_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
