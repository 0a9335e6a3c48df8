//! Feedback submission: payload validation, record construction and persistence.
//!
//! [`FeedbackSubmission::parse`] is the only way to obtain a validated payload.
//! [`FeedbackService::submit`] ties it to the caller identity and writes one
//! [`FeedbackRecord`] through a [`FeedbackStore`].

pub mod model;
pub mod service;
pub mod store;

pub use model::{FeedbackAccepted, FeedbackRecord, FeedbackSubmission, FeedbackType};
pub use service::{AuthClaims, FeedbackService, subject};
pub use store::FeedbackStore;
