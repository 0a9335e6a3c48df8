use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderMap, VARY,
};

/// Request headers the browser may send on a feedback request.
pub const ALLOWED_HEADERS: &str = "Content-Type,Authorization";

/// Allowed origins parsed from a comma-separated list such as
/// `CORS_ALLOWED_ORIGINS="https://app.example.com, https://admin.example.com"`.
///
/// The first entry is the primary origin; the remaining entries are extra
/// origins accepted on equal terms. An empty list falls back to `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    pub fn parse(raw: &str) -> Self {
        let mut origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() {
            origins.push("*".to_string());
        }
        Self { origins }
    }

    pub fn primary_origin(&self) -> &str {
        self.origins.first().map_or("*", String::as_str)
    }

    pub fn extra_origins(&self) -> &[String] {
        self.origins.get(1..).unwrap_or_default()
    }

    fn is_wildcard(&self) -> bool {
        self.origins.iter().any(|o| o == "*")
    }

    /// Whether `origin` may read responses under this policy.
    pub fn allows(&self, origin: &str) -> bool {
        self.is_wildcard() || self.origins.iter().any(|allowed| allowed == origin)
    }

    /// CORS response headers for a request carrying `origin`.
    ///
    /// An allowed origin is echoed back with credentials permitted, which is
    /// also how a wildcard policy answers since browsers reject `*` together
    /// with credentials. An unlisted or absent origin gets no CORS headers.
    pub fn headers_for(&self, origin: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let Some(allow_origin) = origin
            .filter(|o| self.allows(o))
            .and_then(|o| HeaderValue::from_str(o).ok())
        else {
            return headers;
        };

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        headers.insert(VARY, HeaderValue::from_static("Origin"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers
    }
}
