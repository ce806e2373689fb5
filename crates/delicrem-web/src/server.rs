//! Static server for the compiled dashboard bundle

use axum::{Router, routing::get};
use delicrem_core::Config;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Liveness probe
async fn health() -> &'static str {
    "OK"
}

/// Build the router serving the dashboard
///
/// Unknown paths fall back to `index.html` so client-side routes such as
/// `/pedidos` survive a browser reload.
pub fn build_app(config: &Config) -> Router {
    let static_dir = &config.server.static_dir;
    let index = ServeFile::new(static_dir.join("index.html"));

    Router::new()
        .route("/health", get(health))
        .fallback_service(ServeDir::new(static_dir).fallback(index))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn bundle() -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>delicrem</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();

        let mut config = Config::default();
        config.server.static_dir = dir.path().to_path_buf();
        (dir, config)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, config) = bundle();
        let (status, body) = get_body(build_app(&config), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_serves_bundle_assets() {
        let (_dir, config) = bundle();
        let (status, body) = get_body(build_app(&config), "/app.js").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1);");
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        let (_dir, config) = bundle();

        for route in ["/pedidos", "/ventas", "/usuarios/7"] {
            let (status, body) = get_body(build_app(&config), route).await;
            assert_eq!(status, StatusCode::OK, "route {route}");
            assert_eq!(body, "<html>delicrem</html>");
        }
    }
}
