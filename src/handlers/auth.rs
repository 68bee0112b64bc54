// OTP auth handshake.
//
// `request_code` upserts the user keyed by contact, persists a fresh code and
// dispatches it over SMS. `verify_otp` resolves the code back to its owner
// and issues the access/refresh token pair.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{otp, tokens};
use crate::database::repository;
use crate::error::ApiError;
use crate::projection::SqlResult;
use crate::state::AppState;

use super::require_text;

#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpBody {
    pub otp: Option<String>,
}

/// POST /api/auth - issue a one-time code to a contact.
pub async fn request_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<StatusCode, ApiError> {
    let contact = require_text(body.contact, "contact")?;

    // Atomic find-or-create: concurrent first requests for the same contact
    // must not produce two user rows.
    repository::execute(
        &state.pool,
        &SqlResult {
            query: r#"INSERT INTO "users" ("contact") VALUES ($1) ON CONFLICT ("contact") DO NOTHING"#
                .to_string(),
            params: vec![json!(contact)],
        },
    )
    .await?;

    let code = otp::generate_code(state.config.security.otp_length);
    repository::execute(
        &state.pool,
        &SqlResult {
            query: r#"INSERT INTO "otps" ("value", "user_contact") VALUES ($1, $2)"#.to_string(),
            params: vec![json!(code), json!(contact)],
        },
    )
    .await?;

    state.sms.send_code(&contact, &code).await?;

    Ok(StatusCode::OK)
}

/// POST /api/auth/verify-otp - trade a code for a signed token pair.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<Json<Value>, ApiError> {
    let code = require_text(body.otp, "otp")?;

    // First code matching the value, across all contacts. Codes have no
    // expiry and are not consumed here; see DESIGN.md.
    let owner = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"SELECT to_jsonb("user_contact") AS record FROM "otps" WHERE "value" = $1 LIMIT 1"#
                .to_string(),
            params: vec![json!(code)],
        },
    )
    .await?
    .and_then(|v| v.as_str().map(str::to_string))
    .ok_or(ApiError::InvalidOtp)?;

    let user = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"SELECT json_build_object('id', "id", 'contact', "contact") AS record FROM "users" WHERE "contact" = $1"#
                .to_string(),
            params: vec![json!(owner)],
        },
    )
    .await?
    .ok_or(ApiError::InvalidOtp)?;

    let id: Uuid = serde_json::from_value(user["id"].clone())
        .map_err(|e| ApiError::Internal(format!("Malformed user record: {}", e)))?;
    let contact = user["contact"].as_str().unwrap_or_default().to_string();

    let access_token =
        tokens::issue(tokens::TokenVariant::Access, id, &contact, &state.config.security)
            .map_err(ApiError::from)?;
    let refresh_token =
        tokens::issue(tokens::TokenVariant::Refresh, id, &contact, &state.config.security)
            .map_err(ApiError::from)?;

    Ok(Json(json!({
        "id": id,
        "contact": contact,
        "access_token": access_token,
        "refresh_token": refresh_token,
    })))
}
