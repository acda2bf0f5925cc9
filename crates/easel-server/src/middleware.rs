//! Middleware for the HTTP server.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use easel_core::session::SessionKey;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::{AppState, SessionCookie};

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "easel_sid";

/// Create CORS middleware.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Request logging middleware.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}

/// Attach a [`SessionKey`] to every request, issuing a cookie when the
/// caller does not present a valid one.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = session_from_headers(request.headers());
    let issued = existing.is_none();
    let key = existing.unwrap_or_else(|| SessionKey::new(Uuid::new_v4().to_string()));

    request.extensions_mut().insert(key.clone());
    let mut response = next.run(request).await;

    if issued {
        match HeaderValue::from_str(&session_cookie_header(&key, &state.cookie)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Could not encode session cookie"),
        }
    }

    response
}

/// Read the session id from the `Cookie` header, accepting only UUIDs.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionKey> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| SessionKey::new(id.to_string()))
}

fn session_cookie_header(key: &SessionKey, cookie: &SessionCookie) -> String {
    let mut value = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, key, cookie.max_age_secs
    );
    if cookie.secure {
        value.push_str("; Secure");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_session_among_other_cookies() {
        let id = "6f1c2b9e-3d4a-4e5f-8a7b-9c0d1e2f3a4b";
        let headers = headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en"));
        assert_eq!(session_from_headers(&headers), Some(SessionKey::new(id)));
    }

    #[test]
    fn test_rejects_non_uuid_session() {
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=../../etc"));
        assert_eq!(session_from_headers(&headers), None);
        assert_eq!(session_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_header_attributes() {
        let key = SessionKey::new("abc");
        let dev = session_cookie_header(
            &key,
            &SessionCookie {
                max_age_secs: 86400,
                secure: false,
            },
        );
        assert_eq!(dev, "easel_sid=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400");

        let prod = session_cookie_header(
            &key,
            &SessionCookie {
                max_age_secs: 60,
                secure: true,
            },
        );
        assert!(prod.ends_with("; Secure"));
    }
}
