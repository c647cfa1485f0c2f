mod common;

use axum::http::{Method, StatusCode};

use common::app::spawn_test_app;
use common::http::{assert_json_error, assert_status_ok_json, request, response_json};

#[tokio::test]
async fn it_lists_all_builtin_poses() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/poses", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);

    let poses = body["data"].as_array().expect("poses array");
    assert_eq!(poses.len(), 5);
    assert_eq!(poses[0]["id"], "pose_sunshine_001");
    assert_eq!(poses[4]["id"], "pose_elegant_005");
    // 模板字段按 camelCase 序列化
    assert!(poses[0].get("cameraHint").is_some());
    assert!(poses[0]["angles"].get("L_elbow").is_some());
}

#[tokio::test]
async fn it_filters_poses_by_tag() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/poses?tag=casual", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);

    let poses = body["data"].as_array().expect("poses array");
    assert_eq!(poses.len(), 2);
    for pose in poses {
        let tags = pose["tags"].as_array().expect("tags");
        assert!(tags.iter().any(|t| t == "casual"));
    }

    let none = request(&app.app, Method::GET, "/api/poses?tag=nonexistent", None).await;
    let (status, _, body) = response_json(none).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"].as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn it_gets_pose_by_id() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/poses/pose_portrait_003", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["id"], "pose_portrait_003");
    assert_eq!(body["data"]["angles"]["L_elbow"], 90.0);
}

#[tokio::test]
async fn it_returns_404_for_unknown_pose() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/poses/pose_missing_999", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_json_error(&body, "NOT_FOUND");
}

#[tokio::test]
async fn it_serves_hints_in_requested_language() {
    let app = spawn_test_app().await;

    let zh = request(
        &app.app,
        Method::GET,
        "/api/poses/pose_sunshine_001/hints?language=zh",
        None,
    )
    .await;
    let (status, _, body) = response_json(zh).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["language"], "zh");
    let hints = body["data"]["hints"].as_array().expect("hints");
    assert!(hints[0].as_str().expect("hint").starts_with("步骤 1:"));

    let en = request(
        &app.app,
        Method::GET,
        "/api/poses/pose_sunshine_001/hints?language=en",
        None,
    )
    .await;
    let (status, _, body) = response_json(en).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["language"], "en");
    let hints = body["data"]["hints"].as_array().expect("hints");
    assert!(hints[0].as_str().expect("hint").starts_with("Step 1:"));
}

#[tokio::test]
async fn it_falls_back_to_english_for_unknown_language() {
    let app = spawn_test_app().await;

    let resp = request(
        &app.app,
        Method::GET,
        "/api/poses/pose_sunshine_001/hints?language=fr",
        None,
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["language"], "en");
}

#[tokio::test]
async fn it_defaults_hints_language_from_config() {
    let app = spawn_test_app().await;

    // 测试配置默认 zh
    let resp = request(
        &app.app,
        Method::GET,
        "/api/poses/pose_sunshine_001/hints",
        None,
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["language"], "zh");
}
