//! Error types for every component in the crate.
//!
//! Caller-facing variants (validation, authorization) carry the message that is
//! returned to the client. Dependency failures keep their detail for logging;
//! the HTTP layer replaces it with a generic message.

use thiserror::Error;

/// Missing or malformed process configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
}

/// Failures of the feedback submission endpoint.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Payload could not be parsed or violated a field rule. The message is
    /// safe to show to the caller.
    #[error("{0}")]
    Validation(String),

    /// The request context carried no usable authorizer claims.
    #[error("Unauthorized")]
    Unauthorized,

    /// The feedback table rejected or failed the write.
    #[error("feedback store failure: {0}")]
    Store(String),
}

impl FeedbackError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            FeedbackError::Validation(_) => 400,
            FeedbackError::Unauthorized => 401,
            FeedbackError::Store(_) => 500,
        }
    }

    /// Message returned in the response body. Store details never leave the process.
    pub fn public_message(&self) -> String {
        match self {
            FeedbackError::Validation(message) => message.clone(),
            FeedbackError::Unauthorized => "Unauthorized".to_string(),
            FeedbackError::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for FeedbackError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|field_errors| field_errors.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| e.code.to_string(), |m| m.to_string())
            })
            .collect();
        messages.sort();

        FeedbackError::Validation(messages.join("; "))
    }
}

/// Failures extracting the caller identity from a pre-verified bearer token.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error(
        "no request headers found; the runtime must forward the Authorization header"
    )]
    MissingHeaders,

    #[error("no Authorization header found in request headers")]
    MissingAuthorization,

    #[error("bearer token could not be decoded: {0}")]
    MalformedToken(#[from] jsonwebtoken::errors::Error),

    #[error("token does not contain a 'sub' claim; cannot determine user identity")]
    MissingSubject,
}

/// Parameter Store lookup failures.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("SSM parameter not found: {name}")]
    NotFound { name: String },

    #[error("failed to retrieve SSM parameter {name}: {message}")]
    Lookup { name: String, message: String },
}

/// Secrets Manager lookup failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {name}")]
    NotFound { name: String },

    /// The request itself is unusable (bad name, secret in a state that can't be read).
    #[error("invalid request for secret {name}: {message}")]
    InvalidRequest { name: String, message: String },

    /// Decryption, internal service or transport failure.
    #[error("secrets manager service error for secret {name}: {message}")]
    Service { name: String, message: String },
}

impl SecretError {
    /// Whether a caller may reasonably try again later. No retry happens here.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SecretError::Service { .. })
    }
}

/// Failures of the OAuth2 client-credentials exchange.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("client credentials cannot be encoded as a header value")]
    InvalidCredentials,

    #[error("invalid token endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to get access token: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("token endpoint returned a non-JSON body: {body}")]
    InvalidResponse { body: String },

    #[error("no access_token in token endpoint response: {body}")]
    MissingAccessToken { body: String },
}
