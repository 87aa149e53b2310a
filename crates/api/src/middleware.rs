use axum::{
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Duration;

use printstock_core::SessionId;

use crate::context::SessionContext;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "printstock_session";

/// Attach a [`SessionContext`] to the request.
///
/// Never rejects: anonymous callers still reach the login and auth-state
/// endpoints, and stock handlers apply their own role checks.
pub async fn session_middleware(mut req: axum::extract::Request, next: Next) -> Response {
    let session_id = extract_session_id(req.headers());
    req.extensions_mut().insert(SessionContext::new(session_id));
    next.run(req).await
}

/// Session id from the session cookie, or from a bearer token as a fallback.
/// Malformed values are treated as absent.
pub fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    extract_cookie(headers)
        .or_else(|| extract_bearer(headers))
        .and_then(|raw| raw.parse().ok())
}

fn extract_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// `Set-Cookie` value binding the client to `id` for `ttl`.
pub fn session_cookie(id: &SessionId, ttl: Duration) -> HeaderValue {
    let value = format!(
        "{SESSION_COOKIE}={id}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        ttl.num_seconds()
    );
    // Built only from a UUID and fixed ASCII.
    HeaderValue::from_str(&value).unwrap_or_else(|_| clear_session_cookie())
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("printstock_session=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn cookie_is_found_among_others() {
        let id = SessionId::new();
        let cookie = format!("theme=dark; {SESSION_COOKIE}={id}; lang=en");
        let h = headers(&[(header::COOKIE, cookie.as_str())]);
        assert_eq!(extract_session_id(&h), Some(id));
    }

    #[test]
    fn bearer_is_accepted_as_fallback() {
        let id = SessionId::new();
        let bearer = format!("Bearer {id}");
        let h = headers(&[(header::AUTHORIZATION, bearer.as_str())]);
        assert_eq!(extract_session_id(&h), Some(id));
    }

    #[test]
    fn malformed_or_missing_ids_are_absent() {
        assert_eq!(extract_session_id(&HeaderMap::new()), None);
        let cookie = format!("{SESSION_COOKIE}=garbage");
        let h = headers(&[(header::COOKIE, cookie.as_str())]);
        assert_eq!(extract_session_id(&h), None);
        let h = headers(&[(header::AUTHORIZATION, "Bearer ")]);
        assert_eq!(extract_session_id(&h), None);
    }

    #[test]
    fn session_cookie_carries_max_age() {
        let id = SessionId::new();
        let cookie = session_cookie(&id, Duration::hours(8));
        let s = cookie.to_str().unwrap();
        assert!(s.starts_with(&format!("{SESSION_COOKIE}={id};")));
        assert!(s.contains("HttpOnly"));
        assert!(s.ends_with("Max-Age=28800"));
    }
}
