use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build a CORS layer that admits only the listed browser origins.
///
/// Requests without an `Origin` header (curl, server-to-server) are not
/// affected; CORS only constrains browsers.
///
/// # Errors
/// Returns an error if any origin is not a valid header value.
pub fn create_cors_layer<S: AsRef<str>>(
    origins: &[S],
) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let allowed = origins
        .iter()
        .map(|origin| origin.as_ref().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
