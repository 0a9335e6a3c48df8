mod basic;
mod client;
pub mod auth;

pub use basic::{BasicClient, CONNECT_TIMEOUT, REQUEST_TIMEOUT};
pub use client::HttpClient;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request};

/// Builds a form-encoded POST request with the given overall timeout.
pub fn form_post(
    url: &str,
    fields: &[(&str, &str)],
    timeout: std::time::Duration,
) -> anyhow::Result<Request> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish();

    let mut req = Request::new(Method::POST, url.parse()?);
    req.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    *req.timeout_mut() = Some(timeout);
    *req.body_mut() = Some(body.into());

    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_form_post_encodes_fields() {
        let req = form_post(
            "https://auth.example.com/oauth2/token",
            &[("grant_type", "client_credentials"), ("scope", "a/read b/write")],
            Duration::from_secs(30),
        )
        .unwrap();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().as_str(), "https://auth.example.com/oauth2/token");
        assert_eq!(
            req.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(req.timeout(), Some(&Duration::from_secs(30)));

        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "grant_type=client_credentials&scope=a%2Fread+b%2Fwrite"
        );
    }

    #[test]
    fn test_form_post_rejects_bad_url() {
        assert!(form_post("not a url", &[], Duration::from_secs(1)).is_err());
    }
}
