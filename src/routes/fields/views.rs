use super::models::{FieldCreate, FieldRecord};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::error;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_fields, create_field))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/{username}",
    responses(
        (status = 200, description = "The user's saved field records", body = [FieldRecord]),
        (status = 500, description = "Record store failure")
    ),
    params(
        ("username" = String, description = "User the records belong to")
    ),
    summary = "List field records",
    description = "Returns the ordered list of field boundaries saved for a user."
)]
pub async fn list_fields(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<FieldRecord>>, StatusCode> {
    state
        .store
        .records_for_user(&username)
        .await
        .map(Json)
        .map_err(|e| {
            error!(user = %username, error = %e, "Failed to read field records");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[utoipa::path(
    post,
    path = "/{username}",
    request_body = FieldCreate,
    responses(
        (status = 201, description = "Record appended", body = FieldRecord),
        (status = 422, description = "Empty name or ring with fewer than 3 vertices"),
        (status = 500, description = "Record store failure")
    ),
    params(
        ("username" = String, description = "User the record belongs to")
    ),
    summary = "Save a field record",
    description = "Appends a named field boundary to the user's record list. The date defaults to today."
)]
pub async fn create_field(
    Path(username): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<FieldCreate>,
) -> Result<(StatusCode, Json<FieldRecord>), StatusCode> {
    if payload.name.trim().is_empty() || payload.coords.len() < 3 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let record = payload.into_record();
    state
        .store
        .append_record(&username, record.clone())
        .await
        .map_err(|e| {
            error!(user = %username, error = %e, "Failed to append field record");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::CREATED, Json(record)))
}
