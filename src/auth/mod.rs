pub mod sessions;
pub mod submit_tokens;

pub use sessions::{create_session, load_session, purge_stale_sessions, revoke_session, Session};
pub use submit_tokens::{claim_submit_token, issue_submit_token, release_submit_token, Claim};

use astra::Request;

pub const SESSION_COOKIE: &str = "session";

/// Reads the raw session token from the `Cookie` header.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
