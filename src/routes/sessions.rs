use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::engine::session::CoachSession;
use crate::engine::types::{CameraSettings, Language};
use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(end_session))
        .route("/:id/tick", post(tick_session))
        .route("/:id/pose", put(change_pose))
        .route("/:id/reset", post(reset_session))
}

/// 创建会话时的可选设置，缺省项取服务端相机默认值
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRequest {
    threshold: Option<u8>,
    stable_frames: Option<u32>,
    language: Option<String>,
    auto_shutter: Option<bool>,
}

impl SettingsRequest {
    fn resolve(self, state: &AppState) -> Result<CameraSettings, AppError> {
        let defaults = &state.config().camera;
        let settings = CameraSettings {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            stable_frames: self.stable_frames.unwrap_or(defaults.stable_frames),
            language: self
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or_else(|| Language::from_code(&defaults.language)),
            auto_shutter: self.auto_shutter.unwrap_or(defaults.auto_shutter),
        };
        settings
            .validate()
            .map_err(|msg| AppError::bad_request("SESSIONS_INVALID_SETTINGS", &msg))?;
        Ok(settings)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    pose_id: String,
    settings: Option<SettingsRequest>,
    /// 固定种子时信号源可复现，供演示与联调使用
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    id: String,
    pose_id: String,
    settings: CameraSettings,
    countdown: u32,
    history_len: usize,
    created_at: chrono::DateTime<chrono::Utc>,
    last_active_at: chrono::DateTime<chrono::Utc>,
}

impl From<&CoachSession> for SessionView {
    fn from(s: &CoachSession) -> Self {
        Self {
            id: s.id().to_string(),
            pose_id: s.template_id().to_string(),
            settings: *s.settings(),
            countdown: s.countdown(),
            history_len: s.history_len(),
            created_at: s.created_at(),
            last_active_at: s.last_active_at(),
        }
    }
}

async fn create_session(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateSessionRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let pose_id = req.pose_id.trim().to_string();
    if state.catalog().get(&pose_id).is_none() {
        return Err(AppError::not_found("Pose not found"));
    }

    let settings = req.settings.unwrap_or_default().resolve(&state)?;
    let session = CoachSession::simulated(&pose_id, settings, req.seed);
    let view = SessionView::from(&session);
    let id = state.sessions().insert(session).await;
    tracing::info!(session_id = %id, pose_id = %pose_id, "Coaching session started");
    Ok(created(view))
}

async fn get_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entry = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    let session = entry.lock().await;
    Ok(ok(SessionView::from(&*session)))
}

/// 执行一个检测节拍。模板选中且采集进行中是调用方的门控条件；
/// 服务端只负责对存在的会话逐拍推进。
async fn tick_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entry = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    let mut session = entry.lock().await;

    let template = state
        .catalog()
        .get(session.template_id())
        .ok_or_else(|| AppError::internal("Session references unknown pose"))?;

    let outcome = session.tick(template);
    if outcome.captured {
        tracing::info!(session_id = %id, score = outcome.analysis.score, "Auto-shutter fired");
    }
    Ok(ok(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePoseRequest {
    pose_id: String,
}

async fn change_pose(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ChangePoseRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let pose_id = req.pose_id.trim().to_string();
    if state.catalog().get(&pose_id).is_none() {
        return Err(AppError::not_found("Pose not found"));
    }

    let entry = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    let mut session = entry.lock().await;
    session.set_template(&pose_id);
    Ok(ok(SessionView::from(&*session)))
}

async fn reset_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entry = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    let mut session = entry.lock().await;
    session.reset();
    Ok(ok(SessionView::from(&*session)))
}

async fn end_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.sessions().remove(&id).await {
        return Err(AppError::not_found("Session not found"));
    }
    tracing::info!(session_id = %id, "Coaching session ended");
    Ok(ok(serde_json::json!({"deleted": true, "id": id})))
}
