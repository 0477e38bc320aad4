//! HTTP surface for the editor
//!
//! - `POST /upload`: multipart image upload, responds with the image URL as plain text
//! - `POST /documents/inline`, `POST /documents/deinline`: convert an HTML body,
//!   respond with a JSON `TransclusionResult`
//! - `GET /health`

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::TransclusionConfig;
use crate::transclusion::{
    Direction, TransclusionError, deinline_images_async, inline_images_async,
};
use crate::upload::{ImageUploadHandler, UploadError};
use crate::utils::{MAX_REQUEST_BODY_BYTES, UPLOAD_FIELD_NAME};

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    uploader: Arc<ImageUploadHandler>,
}

impl AppState {
    #[must_use]
    pub fn new(config: TransclusionConfig) -> Self {
        Self {
            uploader: Arc::new(ImageUploadHandler::new(config)),
        }
    }
}

/// Creates the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload_image))
        .route("/documents/inline", post(inline_document))
        .route("/documents/deinline", post(deinline_document))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, config: TransclusionConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    log::info!(
        "Serving images from {} under {} on http://{}",
        config.upload_dir().display(),
        config.url_prefix(),
        listener.local_addr().unwrap_or(addr)
    );

    axum::serve(listener, create_router(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Any failure is logged and answered with a bare 500
async fn upload_image(State(state): State<AppState>, multipart: Multipart) -> Response {
    match receive_upload(&state.uploader, multipart).await {
        Ok(url) => (StatusCode::OK, url).into_response(),
        Err(e) => {
            log::error!("Experienced error while handling image upload: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn receive_upload(
    uploader: &ImageUploadHandler,
    mut multipart: Multipart,
) -> Result<String, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        return uploader.store_upload_async(content_type, bytes.to_vec()).await;
    }

    Err(UploadError::MissingField(UPLOAD_FIELD_NAME.to_string()))
}

async fn inline_document(State(state): State<AppState>, html: String) -> Response {
    convert_document(&state, html, Direction::Inline).await
}

async fn deinline_document(State(state): State<AppState>, html: String) -> Response {
    convert_document(&state, html, Direction::DeInline).await
}

async fn convert_document(state: &AppState, html: String, direction: Direction) -> Response {
    let config = state.uploader.config().clone();
    let result = match direction {
        Direction::Inline => inline_images_async(html, config).await,
        Direction::DeInline => deinline_images_async(html, config).await,
    };

    match result {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e @ TransclusionError::Parse(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            log::error!("Failed to {direction} document: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-IMAGE-TRANSCLUSION-BOUNDARY";

    fn test_router(dir: &std::path::Path) -> Router {
        let config = TransclusionConfig::builder()
            .upload_dir(dir)
            .url_prefix("/uploads")
            .build()
            .unwrap();
        create_router(AppState::new(config))
    }

    fn multipart_request(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"pic\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().unwrap();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("ok"));
    }

    #[tokio::test]
    async fn test_upload_returns_url() {
        let temp_dir = TempDir::new().unwrap();
        let request = multipart_request("image", "image/png", b"\x89PNG\r\n\x1a\n");

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let url = body_string(response).await;
        let filename = url.strip_prefix("/uploads/").unwrap();
        assert!(filename.ends_with(".png"));
        assert!(temp_dir.path().join(filename).is_file());
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let request = multipart_request("image", "text/plain", b"hello");

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_upload_without_image_field() {
        let temp_dir = TempDir::new().unwrap();
        let request = multipart_request("attachment", "image/png", b"png");

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_deinline_document_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/documents/deinline")
            .header("content-type", "text/html")
            .body(Body::from(
                r#"<p><img src="data:image/png;base64,iVBORw0KGgo="></p>"#,
            ))
            .unwrap();

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(result["successes"], 1);
        assert!(result["html"].as_str().unwrap().contains("src=\"/uploads/"));
        assert_eq!(result["failures"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_inline_document_rejects_binary_input() {
        let temp_dir = TempDir::new().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/documents/inline")
            .body(Body::from("<p>\0\0\0</p>"))
            .unwrap();

        let response = test_router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
