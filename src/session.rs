use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use uuid::Uuid;

// Cookie carrying the opaque per-browser session id
pub const SESSION_COOKIE: &str = "chatSessionId";

// 7 days
const SESSION_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

// Extract the session id from the Cookie header, if the browser sent one
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE);

    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix(prefix.as_str()))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

// Fresh opaque session id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

// Set-Cookie value for a newly minted session. Secure only in production so
// the cookie survives plain-http local development.
pub fn session_cookie(id: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, id, SESSION_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
