// Settings management for fieldcheck pipelines

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{DEFAULT_REGEX_SIZE_LIMIT, PresencePolicy, Validate, ValidationSettings};

use serde_json::Value;
use std::path::PathBuf;

/// Environment prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "FIELDCHECK";

/// Builds [`ValidationSettings`] from layered sources.
///
/// Later layers win: defaults, then files in the order added, then
/// environment variables, then explicit pairs.
pub struct SettingsLoader {
    prefix: String,
    dotenv: Option<Option<PathBuf>>,
    files: Vec<PathBuf>,
    load_env: bool,
    pairs: Vec<(String, String)>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            dotenv: None,
            files: Vec::new(),
            load_env: false,
            pairs: Vec::new(),
        }
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Load a `.env` file into the process environment before reading it.
    ///
    /// With `None` a missing `.env` in the working directory is ignored;
    /// an explicit path must exist.
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.dotenv = Some(path);
        self.load_env = true;
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Add a settings file. Format is detected from the extension.
    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add explicit overrides, keyed like the settings fields.
    pub fn with_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pairs
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn build(self) -> Result<ValidationSettings> {
        let mut merged = match serde_json::to_value(ValidationSettings::default()) {
            Ok(Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(e) => return Err(ConfigError::DeserializationError(e.to_string())),
        };

        for path in &self.files {
            let format = FileFormat::detect(path)?;
            merged.extend(ConfigLoader::new(format).load_file(path)?);
        }

        match &self.dotenv {
            Some(Some(path)) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            Some(None) => {
                dotenvy::dotenv().ok();
            }
            None => {}
        }

        if self.load_env {
            merged.extend(EnvLoader::new(self.prefix.as_str()).load());
        }

        merged.extend(
            self.pairs
                .iter()
                .map(|(k, v)| (k.to_lowercase(), env::parse_scalar(v))),
        );

        let settings: ValidationSettings = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        settings.validate()?;

        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
