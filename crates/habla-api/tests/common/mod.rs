use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    routing::post,
};
use habla_api::{ApiConfig, ApiState, config::Environment, router};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

/// Builds the application with a test configuration
pub struct TestAppBuilder {
    config: ApiConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig {
                // Nothing listens here, so an unconfigured tutor fails fast
                groq_base_url: "http://127.0.0.1:9/v1".to_string(),
                tutor_timeout_secs: 5,
                frontend_dir: std::env::temp_dir().join("habla-missing-frontend"),
                ..ApiConfig::default()
            },
        }
    }

    pub fn tutor(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.groq_base_url = base_url.to_string();
        self.config.groq_api_key = Some(api_key.to_string());
        self
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.config.env = env;
        self
    }

    pub fn tutor_timeout_secs(mut self, secs: u64) -> Self {
        self.config.tutor_timeout_secs = secs;
        self
    }

    pub fn chat_rate(mut self, replenish_secs: u64, burst: u32) -> Self {
        self.config.chat_replenish_secs = replenish_secs;
        self.config.chat_rate_burst = burst;
        self
    }

    pub fn frontend_dir(mut self, dir: PathBuf) -> Self {
        self.config.frontend_dir = dir;
        self
    }

    pub fn allowed_origins(mut self, origins: &str) -> Self {
        self.config.allowed_origins = origins.to_string();
        self
    }

    /// Build the state and the full application router
    pub fn build(self) -> (ApiState, TestClient) {
        let state = ApiState::new(&self.config).expect("Failed to create test state");
        let app = router::app(&self.config, state.clone()).expect("Failed to build app");
        (state, TestClient::new(app))
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, mut request: Request<Body>) -> TestResponse {
        // The rate limiter needs a client address when no forwarding header is set
        use axum::extract::ConnectInfo;
        use std::net::{IpAddr, Ipv4Addr, SocketAddr};

        let test_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080);
        request.extensions_mut().insert(ConnectInfo(test_addr));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with no body
    pub async fn post(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.post_json_from(uri, body, "127.0.0.1").await
    }

    /// Send a POST request with JSON body on behalf of a forwarded client IP
    pub async fn post_json_from<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        client_ip: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-forwarded-for", client_ip)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process stand-in for the chat-completion API
pub mod fake_tutor {
    use super::*;

    /// What the fake API answers with
    #[derive(Clone)]
    pub struct FakeResponse {
        pub status: StatusCode,
        pub body: String,
        pub delay: Duration,
    }

    impl FakeResponse {
        pub fn ok(body: Value) -> Self {
            Self {
                status: StatusCode::OK,
                body: body.to_string(),
                delay: Duration::ZERO,
            }
        }

        pub fn reply(content: &str) -> Self {
            Self::ok(serde_json::json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            }))
        }

        pub fn raw(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                delay: Duration::ZERO,
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    /// A request received by the fake API: `Authorization` header and JSON body
    #[derive(Clone, Debug)]
    pub struct ReceivedRequest {
        pub authorization: Option<String>,
        pub body: Value,
    }

    /// Start the fake API on an ephemeral port, returning its base URL and
    /// the log of received requests
    pub async fn spawn(response: FakeResponse) -> (String, Arc<Mutex<Vec<ReceivedRequest>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, body: String| {
                let log = Arc::clone(&log);
                let response = response.clone();
                async move {
                    log.lock().unwrap().push(ReceivedRequest {
                        authorization: headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(String::from),
                        body: serde_json::from_str(&body).unwrap_or(Value::Null),
                    });
                    tokio::time::sleep(response.delay).await;
                    (
                        response.status,
                        [(header::CONTENT_TYPE, "application/json")],
                        response.body,
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake tutor");
        let addr = listener.local_addr().expect("Fake tutor has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake tutor crashed");
        });

        (format!("http://{addr}/v1"), received)
    }
}

/// Static frontend helpers
pub mod frontend {
    use std::path::PathBuf;

    /// Create a throwaway frontend directory with an index page and a script
    pub fn create() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("habla-frontend-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("Failed to create frontend dir");
        std::fs::write(
            dir.join("index.html"),
            "<!doctype html><title>Habla</title>",
        )
        .expect("Failed to write index.html");
        std::fs::write(dir.join("script.js"), "console.log('habla');")
            .expect("Failed to write script.js");
        dir
    }
}
