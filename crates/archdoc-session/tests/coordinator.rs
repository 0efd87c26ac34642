//! Full session flows against in-process analyzer and export servers.

use std::path::Path;

use archdoc_export::{ArtifactSink, CaptureExporter, ExportStrategy, Exporter};
use archdoc_session::{
    DeploymentConfig, ExportCoordinator, JobStatus, SessionState, SubmitRejected,
};
use axum::Json;
use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn analyze(Json(body): Json<Value>) -> impl IntoResponse {
    match body["source_path"].as_str() {
        Some("D:/projects/demo") => Json(json!({
            "file_types_found": {".py": 3, ".js": 1},
            "architecture_analysis": {
                "Project Overview": "Demo project.",
                "Tech Stack": "Python, JavaScript"
            },
            "total_files": 4
        }))
        .into_response(),
        Some("D:/projects/broken") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "folder not found"})),
        )
            .into_response(),
        Some("D:/projects/bare") => StatusCode::BAD_GATEWAY.into_response(),
        Some("D:/projects/html") => "<html>not json</html>".into_response(),
        _ => (StatusCode::BAD_REQUEST, Json(json!({"detail": "bad path"}))).into_response(),
    }
}

async fn download_pdf(Json(body): Json<Value>) -> impl IntoResponse {
    if body["data"]["total_files"] == 4 {
        ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 server".to_vec()).into_response()
    } else {
        StatusCode::UNPROCESSABLE_ENTITY.into_response()
    }
}

async fn backend() -> String {
    serve(
        Router::new()
            .route("/analyze-folder", post(analyze))
            .route("/download-pdf", post(download_pdf)),
    )
    .await
}

fn config(base: &str, strategy: ExportStrategy, output: &Path) -> DeploymentConfig {
    DeploymentConfig {
        analyzer_base_url: base.to_string(),
        strategy,
        request_timeout_secs: 10,
        output_dir: Some(output.to_path_buf()),
        ..DeploymentConfig::default()
    }
}

#[tokio::test]
async fn test_analyzer_error_detail_reaches_banner() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator =
        ExportCoordinator::from_config(&config(&base, ExportStrategy::Client, dir.path())).unwrap();

    let state = coordinator.submit(r"D:\projects\broken").await.unwrap();

    assert!(matches!(state, SessionState::Error { .. }));
    assert_eq!(coordinator.session().error_message(), Some("folder not found"));
}

#[tokio::test]
async fn test_status_without_detail_uses_generic_text() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator =
        ExportCoordinator::from_config(&config(&base, ExportStrategy::Client, dir.path())).unwrap();

    coordinator.submit("D:/projects/bare").await.unwrap();

    assert_eq!(
        coordinator.session().error_message(),
        Some("Request failed with status code 502")
    );
}

#[tokio::test]
async fn test_non_json_success_is_an_error() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator =
        ExportCoordinator::from_config(&config(&base, ExportStrategy::Client, dir.path())).unwrap();

    let state = coordinator.submit("D:/projects/html").await.unwrap();

    assert!(matches!(state, SessionState::Error { .. }));
}

#[tokio::test]
async fn test_empty_path_never_reaches_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens here; an actual request would fail with a transport error.
    let mut coordinator = ExportCoordinator::from_config(&config(
        "http://127.0.0.1:9",
        ExportStrategy::Client,
        dir.path(),
    ))
    .unwrap();

    let err = coordinator.submit("").await.unwrap_err();

    assert_eq!(err, SubmitRejected::EmptyPath);
    assert!(matches!(coordinator.state(), SessionState::Idle));
}

#[tokio::test]
async fn test_client_round_trip_delivers_pdf() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator =
        ExportCoordinator::from_config(&config(&base, ExportStrategy::Client, dir.path())).unwrap();

    let state = coordinator.submit(r"D:\projects\demo").await.unwrap();
    let view = state.view().unwrap();
    assert_eq!(view.document().stats()[0].percentage, 75.0);
    assert_eq!(view.document().sections().len(), 2);

    let delivery = coordinator.export().await.unwrap().unwrap();

    assert_eq!(delivery.path, dir.path().join("project-documentation.pdf"));
    assert!(delivery.page_count.unwrap() >= 1);
    let bytes = std::fs::read(&delivery.path).unwrap();
    assert_eq!(bytes.len(), delivery.bytes);
    assert!(bytes.starts_with(b"%PDF-"));

    let job = coordinator.state().view().unwrap().job().unwrap();
    assert_eq!(job.status, JobStatus::Succeeded);
    assert_eq!(job.strategy, ExportStrategy::Client);
}

#[tokio::test]
async fn test_server_round_trip_echoes_payload() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator =
        ExportCoordinator::from_config(&config(&base, ExportStrategy::Server, dir.path())).unwrap();

    coordinator.submit("D:/projects/demo").await.unwrap();
    let delivery = coordinator.export().await.unwrap().unwrap();

    assert_eq!(std::fs::read(&delivery.path).unwrap(), b"%PDF-1.4 server");
    assert_eq!(delivery.page_count, None);
}

#[tokio::test]
async fn test_failed_export_returns_to_viewing() {
    let base = backend().await;
    let dir = tempfile::tempdir().unwrap();
    let analyzer = config(&base, ExportStrategy::Client, dir.path())
        .analyzer()
        .unwrap();
    // A file where the output directory should be makes delivery fail.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();
    let mut coordinator = ExportCoordinator::new(
        analyzer,
        Exporter::Client(CaptureExporter::default()),
        ArtifactSink::new(&blocked),
    );

    coordinator.submit("D:/projects/demo").await.unwrap();
    let message = coordinator.export().await.unwrap().unwrap_err();

    assert!(message.starts_with("Failed to save PDF"));
    let SessionState::Viewing(view) = coordinator.state() else {
        panic!("expected viewing");
    };
    assert_eq!(view.job().unwrap().status, JobStatus::Failed);
    assert_eq!(view.document().sections().len(), 2);
}

#[tokio::test]
async fn test_export_without_document_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator = ExportCoordinator::from_config(&config(
        "http://127.0.0.1:9",
        ExportStrategy::Client,
        dir.path(),
    ))
    .unwrap();

    assert!(coordinator.export().await.is_none());
}

#[tokio::test]
async fn test_saved_payload_exports_without_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator = ExportCoordinator::from_config(&config(
        "http://127.0.0.1:9",
        ExportStrategy::Client,
        dir.path(),
    ))
    .unwrap();
    let result = archdoc_model::AnalysisResult::from_value(json!({
        "file_types_found": {"rust": 1},
        "architecture_analysis": {"Future Improvements": "More tests."}
    }));

    let state = coordinator.open("saved.json", result).unwrap();
    assert_eq!(state.view().unwrap().document().sections()[0].icon, "🚀");

    let delivery = coordinator.export().await.unwrap().unwrap();
    assert!(delivery.path.exists());
}
