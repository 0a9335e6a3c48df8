//! OAuth2 client-credentials exchange for machine-to-machine gateway access.
//!
//! The agent authenticates as a Cognito app client: the user pool domain and
//! client id live in Parameter Store, the client secret in Secrets Manager,
//! all under `/{STACK_NAME}/`. One attempt per call; callers own retries.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::config;
use crate::error::TokenError;
use crate::fetch::auth::BasicAuth;
use crate::fetch::{HttpClient, form_post};
use crate::infra::keys::{ParameterStore, SecretStore, StackPaths};

pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges the stack's machine client credentials for an access token.
pub struct TokenExchange<P, S, C> {
    paths: StackPaths,
    parameters: P,
    secrets: S,
    http: C,
}

impl<P, S, C> TokenExchange<P, S, C>
where
    P: ParameterStore,
    S: SecretStore,
    C: HttpClient + Clone,
{
    pub fn new(paths: StackPaths, parameters: P, secrets: S, http: C) -> Self {
        Self {
            paths,
            parameters,
            secrets,
            http,
        }
    }

    /// Reads `STACK_NAME` from the environment. Fails before any network call
    /// when it is missing.
    pub fn from_env(parameters: P, secrets: S, http: C) -> Result<Self, TokenError> {
        Self::from_lookup(|key| std::env::var(key).ok(), parameters, secrets, http)
    }

    pub fn from_lookup<F>(lookup: F, parameters: P, secrets: S, http: C) -> Result<Self, TokenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack_name = config::require(lookup, "STACK_NAME")?;
        Ok(Self::new(StackPaths::new(stack_name), parameters, secrets, http))
    }

    pub fn paths(&self) -> &StackPaths {
        &self.paths
    }

    /// Resolves the client configuration and performs a single token request.
    #[tracing::instrument(skip(self), fields(stack = %self.paths.stack_name()))]
    pub async fn get_access_token(&self) -> Result<String, TokenError> {
        let cognito_domain = self
            .parameters
            .get_parameter(&self.paths.cognito_provider())
            .await?;
        let client_id = self
            .parameters
            .get_parameter(&self.paths.machine_client_id())
            .await?;
        let client_secret = self
            .secrets
            .get_secret(&self.paths.machine_client_secret())
            .await?;

        let token_url = format!("https://{cognito_domain}/oauth2/token");
        let scope = self.paths.gateway_scope();

        info!(
            cognito_domain = %cognito_domain,
            client_id = %prefix(&client_id, 10),
            token_url = %token_url,
            scope = %scope,
            "Requesting access token"
        );

        let client = BasicAuth::new(self.http.clone(), &client_id, &client_secret)
            .map_err(|_| TokenError::InvalidCredentials)?;

        let req = form_post(
            &token_url,
            &[("grant_type", "client_credentials"), ("scope", scope.as_str())],
            TOKEN_TIMEOUT,
        )
        .map_err(|e| TokenError::InvalidEndpoint {
            url: token_url.clone(),
            message: e.to_string(),
        })?;

        let response = client.execute(req).await?;
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() != 200 {
            error!(status = status.as_u16(), body = %body, "Token request failed");
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|_| {
            error!(body = %body, "Token endpoint returned invalid JSON");
            TokenError::InvalidResponse { body: body.clone() }
        })?;

        match token.access_token.filter(|t| !t.is_empty()) {
            Some(access_token) => {
                info!(token = %prefix(&access_token, 20), "Successfully got access token");
                Ok(access_token)
            }
            None => {
                error!(body = %body, "No access_token in response");
                Err(TokenError::MissingAccessToken { body })
            }
        }
    }
}

/// First `n` characters followed by `...`, for logging identifiers safely.
fn prefix(value: &str, n: usize) -> String {
    let head: String = value.chars().take(n).collect();
    format!("{head}...")
}
