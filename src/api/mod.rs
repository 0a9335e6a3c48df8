//! HTTP surface of the feedback Lambda.
//!
//! [`route`] maps a method, path and body to a JSON response and is independent
//! of the Lambda event format. [`handle`] adapts an API Gateway request to it.

mod cors;

pub use cors::{ALLOWED_HEADERS, CorsPolicy};

use http::header::{ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use lambda_http::request::RequestContext;
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::feedback::{AuthClaims, FeedbackService, FeedbackStore};

pub const FEEDBACK_PATH: &str = "/feedback";

/// A framework-independent view of an inbound request.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub origin: Option<&'a str>,
    pub body: &'a [u8],
    pub claims: AuthClaims,
}

/// Status, headers and JSON body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn json(status: StatusCode, body: &impl Serialize) -> Self {
        let body = serde_json::to_value(body).unwrap_or_else(|e| {
            error!(error = %e, "Failed to serialize response body");
            json!({ "error": "Internal server error" })
        });
        Self {
            status,
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, &json!({ "error": message }))
    }
}

/// Shared state for every invocation: the service and the CORS policy.
pub struct FeedbackApi<S> {
    service: FeedbackService<S>,
    cors: CorsPolicy,
}

impl<S: FeedbackStore> FeedbackApi<S> {
    pub fn new(service: FeedbackService<S>, cors: CorsPolicy) -> Self {
        Self { service, cors }
    }

    pub fn service(&self) -> &FeedbackService<S> {
        &self.service
    }

    /// Dispatches one request. Never fails: every outcome is an HTTP response.
    pub async fn route(&self, request: ApiRequest<'_>) -> ApiResponse {
        let path = normalize_path(request.path);

        let mut response = if request.method == Method::OPTIONS {
            let mut preflight = ApiResponse {
                status: StatusCode::NO_CONTENT,
                headers: HeaderMap::new(),
                body: None,
            };
            preflight.headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("OPTIONS,POST"),
            );
            preflight
        } else if path != FEEDBACK_PATH {
            ApiResponse::error(StatusCode::NOT_FOUND, "Not found")
        } else if request.method != Method::POST {
            ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        } else {
            match self.service.submit(request.body, &request.claims).await {
                Ok(accepted) => ApiResponse::json(StatusCode::OK, &accepted),
                Err(e) => {
                    let status = StatusCode::from_u16(e.status_code())
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                    ApiResponse::error(status, &e.public_message())
                }
            }
        };

        response.headers.extend(self.cors.headers_for(request.origin));
        if response.body.is_some() {
            response
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        response
    }

    /// Adapts an API Gateway request (REST or HTTP API) to [`route`](Self::route).
    #[tracing::instrument(skip_all, fields(method = %event.method(), path = %event.raw_http_path()))]
    pub async fn handle(&self, event: Request) -> Result<Response<Body>, lambda_http::Error> {
        let claims = event
            .request_context_ref()
            .map(claims_from_context)
            .unwrap_or_default();

        let origin = event
            .headers()
            .get(http::header::ORIGIN)
            .and_then(|v| v.to_str().ok());

        let raw_path = event.raw_http_path();
        let response = self
            .route(ApiRequest {
                method: event.method().clone(),
                path: if raw_path.is_empty() { event.uri().path() } else { raw_path },
                origin,
                body: event.body().as_ref(),
                claims,
            })
            .await;

        debug!(status = response.status.as_u16(), "Responding");
        into_lambda_response(response)
    }
}

fn into_lambda_response(response: ApiResponse) -> Result<Response<Body>, lambda_http::Error> {
    let body = match response.body {
        Some(value) => Body::from(serde_json::to_string(&value)?),
        None => Body::Empty,
    };

    let mut builder = Response::builder().status(response.status);
    if let Some(headers) = builder.headers_mut() {
        headers.extend(response.headers);
    }
    Ok(builder.body(body)?)
}

/// Reads authorizer claims from a request context: `authorizer.claims` for a
/// REST API Cognito authorizer, `authorizer.jwt.claims` for an HTTP API JWT
/// authorizer. Anything else yields no claims.
pub fn claims_from_context(context: &RequestContext) -> AuthClaims {
    match serde_json::to_value(context) {
        Ok(value) => claims_from_context_value(&value),
        Err(e) => {
            error!(error = %e, "Failed to read request context");
            AuthClaims::new()
        }
    }
}

pub fn claims_from_context_value(context: &Value) -> AuthClaims {
    ["/authorizer/claims", "/authorizer/jwt/claims"]
        .iter()
        .find_map(|pointer| context.pointer(pointer).and_then(Value::as_object))
        .map(|claims| {
            claims
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
