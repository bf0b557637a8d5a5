//! HTTP endpoint for header analysis

use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::content::analyze;

/// Request body: the raw message text
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub email: String,
}

impl AnalyzeRequest {
    /// Decode a request body.
    ///
    /// The `email` key is matched without regard to case, preferring an exact
    /// match. A missing key, a `null` value or a `null` body give an empty
    /// email. Only bodies that are not JSON, are not an object, or carry a
    /// non-string `email` are errors.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let mut fields = match serde_json::from_slice(body)? {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            _ => return Err(serde::de::Error::custom("expected a JSON object")),
        };

        let key = fields
            .keys()
            .find(|key| *key == "email")
            .or_else(|| fields.keys().find(|key| key.eq_ignore_ascii_case("email")))
            .cloned();

        let email = match key.and_then(|key| fields.remove(&key)) {
            None | Some(Value::Null) => String::new(),
            Some(value) => serde_json::from_value(value)?,
        };

        Ok(Self { email })
    }
}

/// Body returned on failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Analyze the email carried in the request body.
///
/// The body is decoded here rather than through the `Json` extractor so that
/// a malformed body is a 400 whatever its content type, and a well-formed
/// body without an email reaches analysis and fails there with a 422.
pub async fn analyze_email(body: Bytes) -> Response {
    let request = match AnalyzeRequest::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected request body");
            return error_response(StatusCode::BAD_REQUEST, "failed to parse request body");
        }
    };

    match analyze(request.email.as_bytes()) {
        Ok(content) => (StatusCode::OK, Json(content)).into_response(),
        Err(e) => {
            info!(error = %e, "Analysis failed");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "failed to analyze email data",
            )
        }
    }
}

/// Create the API router
#[must_use]
pub fn create_router(timeout: Duration) -> Router {
    Router::new()
        .route("/", post(analyze_email))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until the process exits
pub async fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, create_router(config.timeout())).await
}
