use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::engine::feedback;
use crate::engine::types::Language;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_poses))
        .route("/:id", get(get_pose))
        .route("/:id/hints", get(get_hints))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPosesQuery {
    tag: Option<String>,
}

async fn list_poses(
    Query(query): Query<ListPosesQuery>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let poses: Vec<_> = match query.tag.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => state.catalog().list_by_tag(tag),
        _ => state.catalog().list(),
    }
    .into_iter()
    .cloned()
    .collect();
    Ok(ok(poses))
}

async fn get_pose(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let pose = state
        .catalog()
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Pose not found"))?;
    Ok(ok(pose))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HintsQuery {
    language: Option<String>,
}

async fn get_hints(
    Path(id): Path<String>,
    Query(query): Query<HintsQuery>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let pose = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::not_found("Pose not found"))?;

    let language = query
        .language
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_else(|| Language::from_code(&state.config().camera.language));

    let hints = feedback::coaching_hints(pose, language);
    Ok(ok(serde_json::json!({
        "poseId": pose.id,
        "language": language.as_code(),
        "hints": hints,
    })))
}
