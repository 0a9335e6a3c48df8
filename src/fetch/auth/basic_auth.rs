use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};

/// An [`HttpClient`] wrapper that sends HTTP Basic credentials on every request.
///
/// The header value is `Basic base64(client_id:client_secret)` and is marked
/// sensitive so it is never printed by `Debug` output.
pub struct BasicAuth<C> {
    inner: C,
    header: HeaderValue,
}

impl<C> BasicAuth<C> {
    pub fn new(inner: C, client_id: &str, client_secret: &str) -> Result<Self, InvalidHeaderValue> {
        let mut header = HeaderValue::from_str(&basic_credentials(client_id, client_secret))?;
        header.set_sensitive(true);
        Ok(Self { inner, header })
    }
}

/// `Basic <base64(client_id:client_secret)>`
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

#[async_trait]
impl<C: HttpClient> HttpClient for BasicAuth<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.header.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_credentials() {
        // base64("client:secret")
        assert_eq!(basic_credentials("client", "secret"), "Basic Y2xpZW50OnNlY3JldA==");
    }

    #[test]
    fn test_header_is_sensitive() {
        struct Never;
        #[async_trait]
        impl HttpClient for Never {
            async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
                unreachable!()
            }
        }

        let auth = BasicAuth::new(Never, "client", "secret").unwrap();
        assert!(auth.header.is_sensitive());
    }
}
