use axum::{Router, response::Response};
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder,
    key_extractor::SmartIpKeyExtractor,
};

use crate::error::ApiError;

/// Limit every route of `router` per client IP.
///
/// Each client starts with `burst_size` requests and gets one more every
/// `replenish_secs` seconds. The client IP comes from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address, so the
/// server must be started with connect info.
///
/// Rejected requests are answered by `on_rejected`. For throttled clients
/// the error carries the `retry-after` and `x-ratelimit-*` headers.
pub fn apply_rate_limit<S, F>(
    router: Router<S>,
    replenish_secs: u64,
    burst_size: u32,
    on_rejected: F,
) -> Result<Router<S>, ApiError>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(GovernorError) -> Response + Send + Sync + 'static,
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(replenish_secs)
        .burst_size(burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            ApiError::RateLimit(format!(
                "invalid quota: one request every {replenish_secs}s, burst {burst_size}"
            ))
        })?;

    Ok(router.layer(GovernorLayer::new(governor_conf).error_handler(on_rejected)))
}
