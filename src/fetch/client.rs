use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes an outbound HTTP request. Wrappers in [`crate::fetch::auth`]
/// decorate an inner client; tests substitute canned responses.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
