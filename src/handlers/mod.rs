pub mod answers;
pub mod auth;
pub mod deals;
pub mod favorites;
pub mod groups;
pub mod matches;
pub mod players;
pub mod questions;
pub mod quizzes;
pub mod spot_categories;
pub mod spots;
pub mod stadiums;
pub mod stages;
pub mod teams;
pub mod ticket_categories;
pub mod tickets;

use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::database::repository;
use crate::error::ApiError;
use crate::projection::types::EntitySpec;
use crate::projection::{self, ListContext, ProjectionRequest};
use crate::state::AppState;

/// Optional `?fields=a,b,c` partial-response parameter, shared by every list
/// and detail endpoint.
#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

impl FieldsQuery {
    pub(crate) fn request(&self) -> Option<ProjectionRequest> {
        self.fields.as_deref().map(ProjectionRequest::parse)
    }
}

/// Required body field: present, and for strings non-empty.
pub(crate) fn require<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("Missing parameter: {}", name)))
}

pub(crate) fn require_text(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::validation(format!("Missing parameter: {}", name))),
    }
}

/// Run a projected list query and reply with the JSON array.
pub(crate) async fn list_projected(
    state: &AppState,
    spec: &'static EntitySpec,
    query: &FieldsQuery,
    ctx: &ListContext,
) -> Result<Json<Value>, ApiError> {
    let request = query.request();
    let sql = projection::build_list(spec, request.as_ref(), ctx);
    let rows = repository::fetch_rows(&state.pool, &sql).await?;
    Ok(Json(Value::Array(rows)))
}

/// Run a projected detail query; a missing row replies `null`.
pub(crate) async fn detail_projected(
    state: &AppState,
    spec: &'static EntitySpec,
    query: &FieldsQuery,
    id: Value,
) -> Result<Json<Value>, ApiError> {
    let request = query.request();
    let sql = projection::build_detail(spec, request.as_ref(), id);
    let row = repository::fetch_optional(&state.pool, &sql).await?;
    Ok(Json(row.unwrap_or(Value::Null)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_absent_values() {
        let err = require::<u32>(None, "points").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Missing parameter: points");
        assert_eq!(require(Some(7), "points").unwrap(), 7);
    }

    #[test]
    fn require_text_rejects_empty_and_blank_strings() {
        assert!(require_text(None, "contact").is_err());
        assert!(require_text(Some(String::new()), "contact").is_err());
        assert!(require_text(Some("   ".to_string()), "contact").is_err());
        assert_eq!(
            require_text(Some("2250700000001".to_string()), "contact").unwrap(),
            "2250700000001"
        );
    }

    #[test]
    fn fields_query_parses_only_when_present() {
        let absent = FieldsQuery { fields: None };
        assert!(absent.request().is_none());

        let present = FieldsQuery { fields: Some("id,name".to_string()) };
        let request = present.request().unwrap();
        assert!(request.contains("id"));
        assert!(!request.contains("code"));
    }
}
