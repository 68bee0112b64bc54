use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository;
use crate::error::ApiError;
use crate::projection::{registry, ListContext, SqlResult};
use crate::state::AppState;

use super::{detail_projected, list_projected, require, require_text, FieldsQuery};

#[derive(Debug, Deserialize)]
pub struct TicketBody {
    pub serial_number: Option<String>,
    pub category_id: Option<Uuid>,
    pub seat_id: Option<Uuid>,
}

/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(body): Json<TicketBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let serial_number = require_text(body.serial_number, "serial_number")?;
    let category_id = require(body.category_id, "category_id")?;
    let seat_id = require(body.seat_id, "seat_id")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "tickets" ("serial_number", "category_id", "seat_id")
                VALUES ($1, $2::uuid, $3::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(serial_number), json!(category_id), json!(seat_id)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::TICKET, &query, &ListContext::new()).await
}

/// GET /api/tickets/:ticket_id
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::TICKET, &query, json!(ticket_id)).await
}

/// PUT /api/tickets/:ticket_id
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<TicketBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let serial_number = require_text(body.serial_number, "serial_number")?;
    let category_id = require(body.category_id, "category_id")?;
    let seat_id = require(body.seat_id, "seat_id")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "tickets"
                SET "serial_number" = $1, "category_id" = $2::uuid, "seat_id" = $3::uuid
                WHERE "id" = $4::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(serial_number),
                json!(category_id),
                json!(seat_id),
                json!(ticket_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/tickets/:ticket_id
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "tickets" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(ticket_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
