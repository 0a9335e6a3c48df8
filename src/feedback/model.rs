//! Request, record and response types for feedback submission.
//!
//! The wire format is camelCase. `session_id` and `feedback_type` are accepted
//! as input aliases; everything written out uses camelCase.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::FeedbackError;

/// The user's rating of an agent response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Positive,
    Negative,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Positive => "positive",
            FeedbackType::Negative => "negative",
        }
    }
}

/// Raw payload as received. Only reachable through [`FeedbackSubmission::parse`].
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest {
    #[serde(alias = "session_id")]
    #[validate(
        length(
            min = 1,
            max = 100,
            message = "sessionId must be between 1 and 100 characters"
        ),
        custom(function = "validate_session_id")
    )]
    session_id: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "message must be between 1 and 5000 characters"
    ))]
    message: String,

    #[serde(alias = "feedback_type")]
    feedback_type: FeedbackType,

    #[serde(default)]
    #[validate(length(
        max = 5000,
        message = "comment must be at most 5000 characters"
    ))]
    comment: Option<String>,
}

/// Session IDs are restricted to ASCII alphanumerics, `-` and `_`.
fn validate_session_id(session_id: &str) -> Result<(), ValidationError> {
    if session_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_session_id").with_message(
            "sessionId must contain only alphanumeric characters, hyphens, and underscores".into(),
        ))
    }
}

/// A feedback payload that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSubmission {
    pub session_id: String,
    pub message: String,
    pub feedback_type: FeedbackType,
    pub comment: Option<String>,
}

impl FeedbackSubmission {
    /// Parses and validates a JSON body in one step.
    ///
    /// Malformed JSON, missing or mistyped fields, an unknown `feedbackType`
    /// and any length or character-class violation all yield
    /// [`FeedbackError::Validation`].
    pub fn parse(body: &[u8]) -> Result<Self, FeedbackError> {
        if body.is_empty() {
            return Err(FeedbackError::Validation("request body is required".to_string()));
        }

        let request: FeedbackRequest = serde_json::from_slice(body)
            .map_err(|e| FeedbackError::Validation(format!("invalid request body: {e}")))?;

        request.validate()?;

        Ok(Self {
            session_id: request.session_id,
            message: request.message,
            feedback_type: request.feedback_type,
            comment: request.comment,
        })
    }
}

/// One persisted feedback entry. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub feedback_id: String,
    pub session_id: String,
    pub message: String,
    pub user_id: String,
    pub feedback_type: FeedbackType,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FeedbackRecord {
    /// Builds the record for `submission`. `user_id` must come from the
    /// verified authorizer claims.
    pub fn new(
        feedback_id: String,
        submission: FeedbackSubmission,
        user_id: String,
        timestamp: i64,
    ) -> Self {
        Self {
            feedback_id,
            session_id: submission.session_id,
            message: submission.message,
            user_id,
            feedback_type: submission.feedback_type,
            timestamp,
            comment: submission.comment.filter(|c| !c.is_empty()),
        }
    }
}

/// Successful submission response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAccepted {
    pub success: bool,
    pub feedback_id: String,
}
