use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use tracing::debug;

use super::ParameterStore;
use crate::error::ParameterError;

/// Resolves configuration values from AWS SSM Parameter Store.
///
/// Parameters are fetched with decryption enabled, so `SecureString` values
/// work as long as the process has `ssm:GetParameter` and the matching KMS
/// permissions.
#[derive(Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    #[tracing::instrument(skip(self))]
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        let resp = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| classify_parameter_error(name, &e.into_service_error()))?;

        debug!("SSM parameter resolved");

        resp.parameter
            .and_then(|p| p.value)
            .ok_or_else(|| ParameterError::Lookup {
                name: name.to_string(),
                message: "parameter exists but has no value".to_string(),
            })
    }
}

/// Maps a `GetParameter` failure to [`ParameterError`]: a missing parameter is
/// reported distinctly, everything else is a generic lookup failure.
pub fn classify_parameter_error(name: &str, err: &GetParameterError) -> ParameterError {
    if err.is_parameter_not_found() {
        ParameterError::NotFound {
            name: name.to_string(),
        }
    } else {
        ParameterError::Lookup {
            name: name.to_string(),
            message: DisplayErrorContext(err).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::types::error::{InternalServerError, ParameterNotFound};

    #[test]
    fn test_not_found_is_distinct() {
        let err = GetParameterError::ParameterNotFound(ParameterNotFound::builder().build());
        let mapped = classify_parameter_error("/demo/cognito_provider", &err);
        assert!(matches!(mapped, ParameterError::NotFound { ref name } if name == "/demo/cognito_provider"));
        assert_eq!(mapped.to_string(), "SSM parameter not found: /demo/cognito_provider");
    }

    #[test]
    fn test_other_failures_are_lookup_errors() {
        let err = GetParameterError::InternalServerError(
            InternalServerError::builder().message("try later").build(),
        );
        let mapped = classify_parameter_error("/demo/machine_client_id", &err);
        match mapped {
            ParameterError::Lookup { name, message } => {
                assert_eq!(name, "/demo/machine_client_id");
                assert!(message.contains("try later"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
