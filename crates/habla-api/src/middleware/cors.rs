use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for the configured origins.
///
/// `None` accepts any origin: the request's `Origin` is mirrored back with
/// credentials allowed, which lets the practice page be opened from a file
/// or a different dev server. A list restricts origins to those entries;
/// entries that are not valid header values are skipped with a warning.
pub fn create_cors_layer(allowed_origins: Option<Vec<String>>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        return CorsLayer::very_permissive();
    };

    let origins = allowed_origins
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "OK"
    }

    async fn allow_origin_for(layer: CorsLayer, origin: &str) -> Option<String> {
        let app = Router::new().route("/test", get(test_handler)).layer(layer);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/test")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_any_origin_is_mirrored() {
        let allowed = allow_origin_for(create_cors_layer(None), "http://127.0.0.1:5500").await;
        assert_eq!(allowed.as_deref(), Some("http://127.0.0.1:5500"));
    }

    #[tokio::test]
    async fn test_listed_origin_allowed() {
        let layer = create_cors_layer(Some(vec!["http://localhost:8080".to_string()]));
        let allowed = allow_origin_for(layer, "http://localhost:8080").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:8080"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_header() {
        let layer = create_cors_layer(Some(vec!["http://localhost:8080".to_string()]));
        let allowed = allow_origin_for(layer, "http://evil.example").await;
        assert_eq!(allowed, None);
    }
}
