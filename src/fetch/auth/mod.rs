//! Credential-injecting [`HttpClient`](crate::fetch::HttpClient) wrappers.

mod basic_auth;

pub use basic_auth::{BasicAuth, basic_credentials};
