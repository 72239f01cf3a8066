use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use callout_shared::models::{AppendRequest, AppendResponse, Callout, Difficulty, ErrorResponse};
use serde_json::Value;

use crate::storage::{StoreError, Storage};

pub type AppState = Arc<Storage>;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// A body the JSON extractor refused, with the status it chose (400, 415 or 422).
    Rejected { status: StatusCode, message: String },
    NotFound(String),
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Rejected {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Rejected { status, message } => {
                tracing::warn!(%status, error = %message, "Rejected request body");
                (status, message)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Store(e @ StoreError::InvalidKey(_)) => {
                tracing::warn!(error = %e, "Rejected request");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub fn router(storage: AppState) -> Router {
    Router::new()
        .route("/api/updateMap", post(update_map))
        .route("/api/maps/{map}/{difficulty}", get(get_document))
        .with_state(storage)
}

/// Append one callout to `<map>/<difficulty>.json`.
async fn update_map(
    State(storage): State<AppState>,
    body: Result<Json<AppendRequest>, JsonRejection>,
) -> Result<Json<AppendResponse>, ApiError> {
    let Json(req) = body?;
    if req.filename.trim().is_empty() {
        return Err(ApiError::BadRequest("filename must not be empty".to_string()));
    }

    let callout = Callout {
        image_name: req.filename,
        location: req.coordinates,
    };
    let total = storage.append(&req.map, req.difficulty, callout)?;
    tracing::info!(
        map = %req.map,
        difficulty = %req.difficulty,
        total,
        "Appended callout"
    );
    Ok(Json(AppendResponse { success: true }))
}

async fn get_document(
    State(storage): State<AppState>,
    Path((map, difficulty)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let difficulty: Difficulty = difficulty.parse().map_err(ApiError::BadRequest)?;
    storage
        .load(&map, difficulty)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No callouts recorded for {map}/{difficulty}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use callout_shared::models::CalloutDocument;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app(dir: &std::path::Path) -> Router {
        router(Storage::open(dir))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/updateMap")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const SITE_A: &str = r#"{"map":"pearl","difficulty":"easy","filename":"siteA.png","coordinates":{"x":0.25,"y":0.4}}"#;

    #[tokio::test]
    async fn test_update_map_creates_document() {
        let dir = tempfile::tempdir().unwrap();
        let resp = test_app(dir.path()).oneshot(post_json(SITE_A)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "success": true }));

        let text = std::fs::read_to_string(dir.path().join("pearl/easy.json")).unwrap();
        let doc = CalloutDocument::from_json(&text).unwrap();
        assert_eq!(doc.difficulty, Difficulty::Easy);
        assert_eq!(doc.callouts.len(), 1);
        assert_eq!(doc.callouts[0].image_name, "siteA.png");
        assert_eq!(doc.callouts[0].location.x, 0.25);
        assert_eq!(doc.callouts[0].location.y, 0.4);
    }

    #[tokio::test]
    async fn test_update_map_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let site_b = SITE_A.replace("siteA", "siteB");

        let first = app.clone().oneshot(post_json(SITE_A)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let second = app.clone().oneshot(post_json(&site_b)).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let resp = app.oneshot(get("/api/maps/pearl/easy")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let doc = body_json(resp).await;
        assert_eq!(doc["callouts"][0]["imageName"], "siteA.png");
        assert_eq!(doc["callouts"][1]["imageName"], "siteB.png");
    }

    #[tokio::test]
    async fn test_update_map_rejects_path_like_map() {
        let dir = tempfile::tempdir().unwrap();
        let body = SITE_A.replace("\"pearl\"", "\"../escape\"");
        let resp = test_app(dir.path()).oneshot(post_json(&body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
        assert!(!dir.path().join("../escape").exists());
    }

    #[tokio::test]
    async fn test_update_map_rejects_malformed_body() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());

        let resp = app.clone().oneshot(post_json("{ nope")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_map_keeps_extractor_status() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());

        // Well-formed JSON with a value the model refuses.
        let unknown = SITE_A.replace("\"easy\"", "\"nightmare\"");
        let resp = app.clone().oneshot(post_json(&unknown)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(resp).await["error"].is_string());

        let no_content_type = Request::builder()
            .method("POST")
            .uri("/api/updateMap")
            .body(Body::from(SITE_A))
            .unwrap();
        let resp = app.oneshot(no_content_type).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(resp).await["error"].is_string());
        assert!(!dir.path().join("pearl").exists());
    }

    #[tokio::test]
    async fn test_update_map_keeps_unknown_document_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pearl")).unwrap();
        std::fs::write(
            dir.path().join("pearl/easy.json"),
            r#"{"difficulty":"easy","author":"ops","callouts":[]}"#,
        )
        .unwrap();
        let app = test_app(dir.path());

        let resp = app.clone().oneshot(post_json(SITE_A)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.oneshot(get("/api/maps/pearl/easy")).await.unwrap();
        let doc = body_json(resp).await;
        assert_eq!(doc["author"], "ops");
        assert_eq!(doc["callouts"][0]["imageName"], "siteA.png");
    }

    #[tokio::test]
    async fn test_update_map_rejects_empty_filename() {
        let dir = tempfile::tempdir().unwrap();
        let body = SITE_A.replace("siteA.png", "  ");
        let resp = test_app(dir.path()).oneshot(post_json(&body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_corrupt_document_returns_500_with_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pearl")).unwrap();
        std::fs::write(dir.path().join("pearl/easy.json"), "not json").unwrap();

        let resp = test_app(dir.path()).oneshot(post_json(SITE_A)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("easy.json"));
    }

    #[tokio::test]
    async fn test_get_missing_document_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let resp = test_app(dir.path())
            .oneshot(get("/api/maps/lotus/hard"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_get_unknown_difficulty_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let resp = test_app(dir.path())
            .oneshot(get("/api/maps/lotus/impossible"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "Unknown difficulty: impossible"
        );
    }
}
