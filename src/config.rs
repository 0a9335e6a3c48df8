//! Process configuration read from the environment.

use crate::error::ConfigError;

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Settings for the feedback Lambda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub table_name: String,
    pub cors_allowed_origins: String,
    pub region: String,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = non_empty(lookup("TABLE_NAME")).ok_or(ConfigError::Missing("TABLE_NAME"))?;
        let cors_allowed_origins =
            non_empty(lookup("CORS_ALLOWED_ORIGINS")).unwrap_or_else(|| "*".to_string());

        Ok(Self {
            table_name,
            cors_allowed_origins,
            region: resolve_region(&lookup),
        })
    }
}

/// `AWS_REGION`, then `AWS_DEFAULT_REGION`, then [`DEFAULT_REGION`].
pub fn resolve_region<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup("AWS_REGION"))
        .or_else(|| non_empty(lookup("AWS_DEFAULT_REGION")))
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Reads a required, non-empty variable through `lookup`.
pub fn require<F>(lookup: F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(key)).ok_or(ConfigError::Missing(key))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
