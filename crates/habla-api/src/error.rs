use thiserror::Error;

/// Errors raised while starting the server.
///
/// Request handlers never fail with these: scoring and the word cache are
/// total, and the tutor relay recovers from its own failures.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("Rate limiter error: {0}")]
    RateLimit(String),
}
