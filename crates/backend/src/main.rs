mod api;
mod assets;
mod config;
mod storage;

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use storage::Storage;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: &Config) -> Router {
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index = Router::new()
        .route("/", get(serve_index))
        .with_state(config.dist_dir.clone());

    api::router(Storage::open(&config.data_dir))
        .merge(index)
        .merge(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    assets::MapImages::scan(&config.assets_dir);
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            config.data_dir.display()
        )
    })?;

    let app = build_app(&config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Server running at http://localhost:{}",
        config.port
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn serve_index(State(dist_dir): State<PathBuf>) -> Html<String> {
    match std::fs::read_to_string(dist_dir.join("index.html")) {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Callout Recorder</title></head>
<body>
<h1>Callout Recorder</h1>
<p>Frontend not built yet. Callouts can still be appended with <code>POST /api/updateMap</code>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct Dirs {
        data: tempfile::TempDir,
        assets: tempfile::TempDir,
        dist: tempfile::TempDir,
    }

    impl Dirs {
        fn new() -> Self {
            let dirs = Dirs {
                data: tempfile::tempdir().unwrap(),
                assets: tempfile::tempdir().unwrap(),
                dist: tempfile::tempdir().unwrap(),
            };
            std::fs::create_dir_all(dirs.assets.path().join("maps")).unwrap();
            std::fs::write(dirs.assets.path().join("maps/pearl.png"), b"png").unwrap();
            std::fs::create_dir_all(dirs.dist.path().join("assets")).unwrap();
            std::fs::write(dirs.dist.path().join("app-abc123.js"), "bundle()").unwrap();
            std::fs::write(dirs.dist.path().join("assets/style-xyz.css"), "body{}").unwrap();
            dirs
        }

        fn config(&self) -> Config {
            Config {
                port: 0,
                data_dir: self.data.path().to_path_buf(),
                assets_dir: self.assets.path().to_path_buf(),
                dist_dir: self.dist.path().to_path_buf(),
            }
        }

        fn app(&self) -> Router {
            build_app(&self.config())
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_map_images_have_1day_cache() {
        let dirs = Dirs::new();
        let resp = dirs.app().oneshot(get("/static/maps/pearl.png")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let dirs = Dirs::new();
        let app = dirs.app();

        for uri in ["/dist/app-abc123.js", "/assets/style-xyz.css"] {
            let resp = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                resp.headers().get("cache-control").unwrap(),
                "public, max-age=31536000, immutable",
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_map_image_returns_404() {
        let dirs = Dirs::new();
        let resp = dirs.app().oneshot(get("/static/maps/haven.png")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_falls_back_when_frontend_missing() {
        let dirs = Dirs::new();
        let resp = dirs.app().oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_index_serves_built_frontend() {
        let dirs = Dirs::new();
        std::fs::write(dirs.dist.path().join("index.html"), "<html>app</html>").unwrap();
        let resp = dirs.app().oneshot(get("/")).await.unwrap();
        assert_eq!(body_text(resp).await, "<html>app</html>");
    }

    #[tokio::test]
    async fn test_append_lands_in_configured_data_dir() {
        let dirs = Dirs::new();
        let req = Request::builder()
            .method("POST")
            .uri("/api/updateMap")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"map":"haven","difficulty":"spells","filename":"garage.png","coordinates":{"x":0.5,"y":0.5}}"#,
            ))
            .unwrap();
        let resp = dirs.app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(dirs.data.path().join("haven/spells.json").is_file());
    }
}
