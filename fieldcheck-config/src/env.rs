// Environment variable loading

use serde_json::Value;
use std::env;

/// Collects prefixed environment variables as settings keys.
///
/// `FIELDCHECK_PRESENCE_POLICY=key_exists` becomes
/// `presence_policy = "key_exists"`.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load every variable carrying the prefix.
    pub fn load(&self) -> serde_json::Map<String, Value> {
        self.collect(env::vars())
    }

    /// Same as [`load`](Self::load) over an explicit set of variables.
    pub fn collect<I, K, V>(&self, vars: I) -> serde_json::Map<String, Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                self.strip(key.as_ref())
                    .map(|k| (k, parse_scalar(value.as_ref())))
            })
            .collect()
    }

    fn strip(&self, key: &str) -> Option<String> {
        let rest = key.strip_prefix(self.prefix.as_str())?;
        let rest = rest.strip_prefix('_')?;
        (!rest.is_empty()).then(|| rest.to_lowercase())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PREFIX)
    }
}

/// Interpret a raw string as a JSON scalar when it reads as one.
pub(crate) fn parse_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Null)) => value,
        _ => Value::String(raw.to_string()),
    }
}
