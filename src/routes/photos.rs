use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::extractors::JsonBody;
use crate::response::{created, ok, paginated, AppError};
use crate::state::AppState;
use crate::store::operations::photos::PhotoRecord;
use crate::validation::{validate_image_data, validate_pose_name, validate_score};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_photos).post(save_photo))
        .route("/count", get(count_photos))
        .route("/:id", get(get_photo).delete(delete_photo))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPhotosQuery {
    page: Option<u64>,
    per_page: Option<u64>,
}

impl ListPhotosQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

async fn list_photos(
    Query(query): Query<ListPhotosQuery>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = query.page();
    let per_page = query.per_page();
    let offset = ((page - 1) * per_page) as usize;
    let limit = per_page as usize;

    let total = state.store().count_photos()?;
    let items = state.store().list_photos(limit, offset)?;
    Ok(paginated(items, total, page, per_page))
}

async fn count_photos(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let total = state.store().count_photos()?;
    Ok(ok(serde_json::json!({"total": total})))
}

async fn get_photo(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let photo = state
        .store()
        .get_photo(&id)?
        .ok_or_else(|| AppError::not_found("Photo not found"))?;
    Ok(ok(photo))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavePhotoRequest {
    timestamp: i64,
    pose_id: String,
    pose_name: String,
    score: i64,
    image_data: String,
}

async fn save_photo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SavePhotoRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if req.pose_id.trim().is_empty() {
        return Err(AppError::bad_request(
            "PHOTOS_INVALID_PAYLOAD",
            "poseId is required",
        ));
    }
    validate_pose_name(&req.pose_name)
        .map_err(|msg| AppError::bad_request("PHOTOS_INVALID_PAYLOAD", msg))?;
    let score = validate_score(req.score)
        .map_err(|msg| AppError::bad_request("PHOTOS_INVALID_PAYLOAD", msg))?;
    validate_image_data(&req.image_data)
        .map_err(|msg| AppError::bad_request("PHOTOS_INVALID_PAYLOAD", msg))?;

    let photo = PhotoRecord {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: req.timestamp,
        pose_id: req.pose_id.trim().to_string(),
        pose_name: req.pose_name.trim().to_string(),
        score,
        image_data: req.image_data,
    };

    state.store().save_photo(&photo)?;
    Ok(created(photo))
}

async fn delete_photo(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.store().delete_photo(&id)? {
        return Err(AppError::not_found("Photo not found"));
    }
    Ok(ok(serde_json::json!({"deleted": true, "id": id})))
}
