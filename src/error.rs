// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with the intended status code attached.
///
/// Handlers return `Result<_, ApiError>`; the status is selected where the
/// failure is classified and mapped to the wire response only here, in the
/// single `IntoResponse` impl.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - a required body field is missing or malformed
    Validation(String),

    // 401 Unauthorized - no usable bearer token on a protected route
    Unauthorized(String),

    // 403 Forbidden - a token that fails verification, or a domain rejection
    TokenRejected(String),
    Rejected(String),

    // 403 Forbidden - no consumable one-time code
    InvalidOtp,

    // 422 Unprocessable Entity - the data store refused the operation
    Store(String),

    // Provider status (or 422) - the SMS gateway failed
    Gateway {
        status: Option<u16>,
        name: String,
        message: String,
    },

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::TokenRejected(_) => 403,
            ApiError::Rejected(_) => 403,
            ApiError::InvalidOtp => 403,
            ApiError::Store(_) => 422,
            ApiError::Gateway { status, .. } => status.unwrap_or(422),
            ApiError::Internal(_) => 500,
        }
    }

    /// Error class carried in the `name` field of the wire body.
    pub fn name(&self) -> &str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::Unauthorized(_) | ApiError::TokenRejected(_) => "AuthError",
            ApiError::Rejected(_) => "Error",
            ApiError::InvalidOtp => "InvalidOtp",
            ApiError::Store(_) => "StoreError",
            ApiError::Gateway { name, .. } => name,
            ApiError::Internal(_) => "InternalError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::TokenRejected(msg)
            | ApiError::Rejected(msg)
            | ApiError::Store(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::InvalidOtp => "Invalid OTP",
            ApiError::Gateway { message, .. } => message,
        }
    }

    /// Wire body: `{name, message}`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name(),
            "message": self.message(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        ApiError::Store(message.into())
    }
}

impl From<crate::database::StoreError> for ApiError {
    fn from(err: crate::database::StoreError) -> Self {
        // Log the real error but never expose SQL details to clients
        tracing::error!("store error: {}", err);
        ApiError::store("Query failed")
    }
}

impl From<crate::auth::tokens::TokenError> for ApiError {
    fn from(err: crate::auth::tokens::TokenError) -> Self {
        match err {
            crate::auth::tokens::TokenError::Invalid(msg) => ApiError::TokenRejected(msg),
            other => {
                tracing::error!("token error: {}", other);
                ApiError::Internal("Token processing failed".to_string())
            }
        }
    }
}

impl From<crate::sms::SmsError> for ApiError {
    fn from(err: crate::sms::SmsError) -> Self {
        match err {
            crate::sms::SmsError::Api {
                status,
                name,
                message,
            } => ApiError::Gateway {
                status: Some(status),
                name,
                message,
            },
            other => {
                tracing::error!("sms gateway error: {}", other);
                ApiError::Gateway {
                    status: None,
                    name: "GatewayError".to_string(),
                    message: "Failed to send the one-time code".to_string(),
                }
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::validation("x").status_code(), 400);
        assert_eq!(ApiError::Unauthorized("x".into()).status_code(), 401);
        assert_eq!(ApiError::InvalidOtp.status_code(), 403);
        assert_eq!(ApiError::store("x").status_code(), 422);
        assert_eq!(
            ApiError::Gateway { status: None, name: "GatewayError".into(), message: "x".into() }
                .status_code(),
            422
        );
        assert_eq!(
            ApiError::Gateway { status: Some(503), name: "e".into(), message: "x".into() }
                .status_code(),
            503
        );
    }

    #[test]
    fn wire_body_is_name_and_message() {
        let body = ApiError::validation("Missing parameter: contact").to_json();
        assert_eq!(body["name"], "ValidationError");
        assert_eq!(body["message"], "Missing parameter: contact");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[test]
    fn invalid_otp_has_fixed_message() {
        let body = ApiError::InvalidOtp.to_json();
        assert_eq!(body["name"], "InvalidOtp");
        assert_eq!(body["message"], "Invalid OTP");
    }
}
