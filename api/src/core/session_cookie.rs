//! Session token carried in the `session_id` cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session_state::SessionId;
use tracing::debug;

pub const SESSION_COOKIE: &str = "session_id";

/// Token from the request cookie, if present and well-formed.
pub fn current_session(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| SessionId::parse(c.value()))
}

/// Returns the request's token, or mints one and adds it to the jar.
pub fn ensure_session(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(id) = current_session(&jar) {
        return (jar, id);
    }
    let id = SessionId::generate();
    debug!(session = %id, "session_cookie: new session");
    let cookie = Cookie::build((SESSION_COOKIE, id.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

/// Expires the session cookie on the client.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::*;

    #[test]
    fn existing_cookie_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_id=67e55044-10b1-426f-9247-bb680e5fe0c8"),
        );
        let jar = CookieJar::from_headers(&headers);
        let (_, id) = ensure_session(jar);
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn forged_cookie_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id=abc-123"));
        let (jar, id) = ensure_session(CookieJar::from_headers(&headers));
        assert_ne!(id.as_str(), "abc-123");
        assert_eq!(jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()), Some(id.to_string()));
    }

    #[test]
    fn missing_cookie_mints_token() {
        let (jar, id) = ensure_session(CookieJar::new());
        assert_eq!(jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()), Some(id.to_string()));
    }
}
