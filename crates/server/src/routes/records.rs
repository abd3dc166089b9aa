use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use service::records::Record;

use crate::errors::ApiError;
use crate::routes::AppState;

/// Integer `{id}` path segment. Anything that is not an integer is treated
/// as a route mismatch and answered with a bare 404.
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| RecordId(id))
            .map_err(|_| StatusCode::NOT_FOUND)
    }
}

pub async fn list_records(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.records.list().await)
}

pub async fn get_record(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Record>, ApiError> {
    let record = state.records.get(id).await?;
    Ok(Json(record))
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<Record>,
) -> (StatusCode, Json<Record>) {
    let created = state.records.create(payload).await;
    (StatusCode::CREATED, Json(created))
}

pub async fn update_record(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Json(patch): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    let updated = state.records.update(id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_record(State(state): State<AppState>, RecordId(id): RecordId) -> StatusCode {
    state.records.delete(id).await;
    StatusCode::NO_CONTENT
}
