//! Server export against an in-process HTTP server.

use std::time::Duration;

use archdoc_export::{ExportError, ServerExportError, ServerExporter};
use archdoc_model::{AnalysisResult, DocumentModel};
use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Json;
use serde_json::{Value, json};

const FAKE_PDF: &[u8] = b"%PDF-1.4\n% fake\n%%EOF\n";

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn document() -> DocumentModel {
    DocumentModel::build(&AnalysisResult::from_value(json!({
        "file_types_found": {".py": 3},
        "architecture_analysis": {"Tech Stack": "Python"},
        "total_files": 3
    })))
}

fn exporter(base: &str) -> ServerExporter {
    ServerExporter::new(base, "/download-pdf", Duration::from_secs(10)).unwrap()
}

async fn echo_pdf(Json(body): Json<Value>) -> impl IntoResponse {
    let expected = json!({
        "file_types_found": {".py": 3},
        "architecture_analysis": {"Tech Stack": "Python"},
        "total_files": 3
    });
    if body.get("data") == Some(&expected) {
        ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF.to_vec()).into_response()
    } else {
        (StatusCode::BAD_REQUEST, "unexpected body").into_response()
    }
}

#[tokio::test]
async fn test_server_export_posts_original_payload() {
    let base = serve(Router::new().route("/download-pdf", post(echo_pdf))).await;

    let artifact = exporter(&base).export(&document()).await.unwrap();

    assert_eq!(artifact.bytes(), FAKE_PDF);
    assert_eq!(artifact.filename(), "project-documentation.pdf");
    assert_eq!(artifact.page_count(), None);
}

#[tokio::test]
async fn test_empty_body_is_an_error() {
    let app = Router::new().route(
        "/download-pdf",
        post(|| async { ([(header::CONTENT_TYPE, "application/pdf")], Vec::<u8>::new()) }),
    );
    let base = serve(app).await;

    let err = exporter(&base).export(&document()).await.unwrap_err();

    assert!(matches!(err, ServerExportError::EmptyArtifact));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let app = Router::new().route(
        "/download-pdf",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "renderer crashed") }),
    );
    let base = serve(app).await;

    let err = exporter(&base).export(&document()).await.unwrap_err();

    match &err {
        ServerExportError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "renderer crashed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        ExportError::from(err).user_message(),
        "Failed to download PDF (status 500)"
    );
}

#[tokio::test]
async fn test_wrong_content_type_is_still_accepted() {
    let app = Router::new().route(
        "/download-pdf",
        post(|| async { ([(header::CONTENT_TYPE, "application/octet-stream")], FAKE_PDF.to_vec()) }),
    );
    let base = serve(app).await;

    let artifact = exporter(&base).export(&document()).await.unwrap();

    assert_eq!(artifact.len(), FAKE_PDF.len());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = exporter(&format!("http://{addr}"))
        .export(&document())
        .await
        .unwrap_err();

    assert!(matches!(err, ServerExportError::Transport(_)));
}
