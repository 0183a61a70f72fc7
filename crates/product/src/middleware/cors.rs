use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use shared::config::Config;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// CORS for every route. `CORS_ORIGIN` is `*` or a comma-separated list of
/// origins; entries that are not valid header values are skipped.
pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.cors_origin))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

fn allow_origin(setting: &str) -> AllowOrigin {
    if setting.trim() == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = setting
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
