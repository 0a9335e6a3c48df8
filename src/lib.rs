//! Request-handling glue for a cloud-hosted agent system.
//!
//! - [`api`] / [`feedback`]: the `POST /feedback` Lambda handler.
//! - [`identity`]: caller identity from an upstream-verified bearer token.
//! - [`infra::keys`]: Parameter Store and Secrets Manager lookups.
//! - [`token`]: OAuth2 client-credentials exchange for gateway access.

pub mod api;
pub mod config;
pub mod error;
pub mod feedback;
pub mod fetch;
pub mod identity;
pub mod infra;
pub mod token;
