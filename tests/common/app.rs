use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use pose_coach_backend::catalog::PoseCatalog;
use pose_coach_backend::config::{CameraDefaults, Config, SessionConfig, WorkerConfig};
use pose_coach_backend::engine::session::SessionRegistry;
use pose_coach_backend::routes::build_router;
use pose_coach_backend::state::AppState;
use pose_coach_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("pose-coach-test.sled");

    // 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        camera: CameraDefaults {
            threshold: 80,
            stable_frames: 10,
            language: "zh".to_string(),
            auto_shutter: true,
        },
        session: SessionConfig {
            idle_timeout_secs: 300,
        },
        worker: WorkerConfig {
            is_leader: false,
            enable_store_flush: false,
        },
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let catalog = Arc::new(PoseCatalog::builtin());
    let sessions = Arc::new(SessionRegistry::new());
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(store, catalog, sessions, &config, shutdown_tx);

    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}
