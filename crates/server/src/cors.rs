use http::{Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// The relay's cross-origin policy: any origin may `POST` JSON.
///
/// The layer answers every `OPTIONS` request itself with an empty 200, and stamps
/// `Access-Control-Allow-Origin: *` on every other response.
pub(super) fn generate() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([CONTENT_TYPE]))
}
