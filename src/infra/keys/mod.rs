//! Configuration and secret lookups.
//!
//! [`StackPaths`] names the per-stack parameter and secret paths.
//! [`ParameterStore`] resolves configuration values; [`SsmParameterStore`] implements it
//! with AWS SSM Parameter Store.
//! [`SecretStore`] resolves secret values; [`SecretsManagerStore`] implements it with
//! AWS Secrets Manager.
//!
//! Neither implementation retries. A failed lookup is reported once and the
//! caller decides what to do with it.

mod config;
mod secrets;
mod ssm;

pub use config::StackPaths;
pub use secrets::{SecretsManagerStore, classify_secret_error};
pub use ssm::{SsmParameterStore, classify_parameter_error};

use crate::error::{ParameterError, SecretError};

/// Resolves a parameter name (e.g. `/my-stack/machine_client_id`) into its value.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError>;
}

/// Resolves a secret name or ARN into its plaintext string value.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError>;
}
