use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Validation(validator::ValidationErrors),
    BadRequest(String),
    NotFound(String),
    /// Transport-level failure talking to the payment gateway (timeout,
    /// connection error, non-2xx status). Nothing was persisted.
    GatewayUnavailable(String),
    /// The gateway answered but refused the transaction. Carries the raw
    /// response body for diagnostics. Nothing was persisted.
    GatewayRejected(Value),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::GatewayUnavailable(e) => write!(f, "Payment gateway unavailable: {}", e),
            ApiError::GatewayRejected(_) => write!(f, "Payment gateway rejected the transaction"),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => ApiError::NotFound("Record not found".to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::GatewayRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_)
            | ApiError::DatabaseConnection(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({ "detail": errors.to_string() }),
            ApiError::BadRequest(msg) => json!({ "detail": msg }),
            ApiError::NotFound(msg) => json!({ "detail": msg }),
            ApiError::GatewayUnavailable(cause) => {
                json!({ "detail": "Failed to contact payment gateway", "error": cause })
            }
            ApiError::GatewayRejected(raw) => {
                json!({ "detail": "Payment initialization failed", "response": raw })
            }
            // Internal details stay out of responses; the log has them.
            ApiError::Database(_) | ApiError::DatabaseConnection(_) | ApiError::Internal(_) => {
                json!({ "detail": "Internal server error" })
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("no such payment".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn gateway_unavailable_maps_to_502_with_cause() {
        let err = ApiError::GatewayUnavailable("connection refused".into());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.body()["error"], "connection refused");
    }

    #[test]
    fn gateway_rejected_maps_to_400_and_echoes_raw_body() {
        let raw = json!({ "status": "failed" });
        let err = ApiError::GatewayRejected(raw.clone());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body()["response"], raw);
    }

    #[test]
    fn diesel_not_found_becomes_not_found() {
        let err: ApiError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
