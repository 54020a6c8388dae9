use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;

/// Allow the site's frontend origins to fetch and post forms.
pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    allowed_origins: Vec<HeaderValue>,
) -> Router<S> {
    if allowed_origins.is_empty() {
        return router;
    }

    router.layer(
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
