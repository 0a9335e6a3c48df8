use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::model::{FeedbackAccepted, FeedbackRecord, FeedbackSubmission};
use super::store::FeedbackStore;
use crate::error::FeedbackError;

/// Claims placed in the request context by the upstream authorizer, which has
/// already verified the caller's token.
pub type AuthClaims = HashMap<String, Value>;

/// Returns the non-empty `sub` claim, if any.
pub fn subject(claims: &AuthClaims) -> Option<&str> {
    claims
        .get("sub")
        .and_then(Value::as_str)
        .filter(|sub| !sub.is_empty())
}

/// Validates feedback submissions and writes them to a [`FeedbackStore`].
pub struct FeedbackService<S> {
    store: S,
}

impl<S: FeedbackStore> FeedbackService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one `POST /feedback` body.
    ///
    /// The user id always comes from `claims`, never from the payload. Every
    /// failure path returns before the single write, so a failed submission
    /// leaves nothing behind.
    #[tracing::instrument(skip_all)]
    pub async fn submit(
        &self,
        body: &[u8],
        claims: &AuthClaims,
    ) -> Result<FeedbackAccepted, FeedbackError> {
        let submission = FeedbackSubmission::parse(body).inspect_err(|e| {
            warn!(error = %e, "Validation error");
        })?;

        if claims.is_empty() {
            warn!("Request has no authorizer claims");
            return Err(FeedbackError::Unauthorized);
        }
        let user_id = subject(claims).ok_or_else(|| {
            warn!("Authorizer claims carry no subject");
            FeedbackError::Unauthorized
        })?;

        let feedback_id = Uuid::new_v4().to_string();
        let record = FeedbackRecord::new(
            feedback_id.clone(),
            submission,
            user_id.to_string(),
            Utc::now().timestamp_millis(),
        );

        if let Err(e) = self.store.put(&record).await {
            error!(error = %format!("{e:#}"), feedback_id = %feedback_id, "Error saving feedback");
            return Err(FeedbackError::Store(e.to_string()));
        }

        info!(
            feedback_id = %feedback_id,
            session_id = %record.session_id,
            feedback_type = record.feedback_type.as_str(),
            "Feedback saved"
        );

        Ok(FeedbackAccepted {
            success: true,
            feedback_id,
        })
    }
}
