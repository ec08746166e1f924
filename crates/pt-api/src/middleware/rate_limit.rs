use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

use crate::state::ApiState;

/// Strict rate limiting for authentication endpoints.
/// 5 requests per second with burst of 10 (slows credential stuffing).
pub fn apply_auth_rate_limit(router: Router<ApiState>) -> Router<ApiState> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(5)
        .burst_size(10)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("valid auth rate limiter configuration");

    router.layer(GovernorLayer::new(governor_conf))
}

/// Moderate rate limiting for authenticated endpoints.
/// 10 requests per second with burst of 20.
pub fn apply_general_rate_limit(router: Router<ApiState>) -> Router<ApiState> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(20)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("valid general rate limiter configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
