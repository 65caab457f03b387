use crate::{
    domain::textile::entity::TextileRecord,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use uuid::Uuid;

pub async fn get_textile(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TextileRecord>, AppError> {
    let Path(id) = id?;
    let textile = state.get_textile.execute(id).await?;
    Ok(Json(textile))
}
