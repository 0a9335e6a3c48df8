use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;

use super::SecretStore;
use crate::error::SecretError;

/// Resolves secrets from AWS Secrets Manager.
///
/// Only string secrets are supported; a binary-only secret is reported as a
/// service error.
#[derive(Clone)]
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_secretsmanager::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl SecretStore for SecretsManagerStore {
    #[tracing::instrument(skip(self))]
    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| classify_secret_error(name, &e.into_service_error()))?;

        resp.secret_string.ok_or_else(|| SecretError::Service {
            name: name.to_string(),
            message: "secret has no string value".to_string(),
        })
    }
}

/// Maps a `GetSecretValue` failure to [`SecretError`].
///
/// | Provider error                                  | Result                          |
/// |-------------------------------------------------|---------------------------------|
/// | `ResourceNotFoundException`                     | [`SecretError::NotFound`]       |
/// | `InvalidParameterException`, `InvalidRequestException` | [`SecretError::InvalidRequest`] |
/// | `DecryptionFailure`, `InternalServiceError`, other | [`SecretError::Service`]     |
pub fn classify_secret_error(name: &str, err: &GetSecretValueError) -> SecretError {
    let name = name.to_string();
    let message = DisplayErrorContext(err).to_string();

    match err {
        GetSecretValueError::ResourceNotFoundException(_) => SecretError::NotFound { name },
        GetSecretValueError::InvalidParameterException(_)
        | GetSecretValueError::InvalidRequestException(_) => {
            SecretError::InvalidRequest { name, message }
        }
        GetSecretValueError::DecryptionFailure(_)
        | GetSecretValueError::InternalServiceError(_) => SecretError::Service { name, message },
        _ => SecretError::Service { name, message },
    }
}
