use crate::auth::{load_session, session_token, Session};
use crate::backend::Backend;
use crate::db::{get_preferences, Database, Preferences, Theme};
use crate::errors::ServerError;
use crate::handlers;
use crate::i18n::Language;
use crate::responses::{redirect, ResultResp};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

/// Shared state handed to every request by the server loop.
#[derive(Clone)]
pub struct AppContext {
    pub db: Database,
    pub backend: Arc<dyn Backend>,
    pub session_ttl_secs: i64,
    pub default_language: Language,
}

impl AppContext {
    /// The signed-in user, if the request carries a live session cookie.
    pub fn session(&self, req: &Request) -> Result<Option<Session>, ServerError> {
        let Some(token) = session_token(req) else {
            return Ok(None);
        };
        self.db.with_conn(|conn| load_session(conn, &token, now()))
    }

    pub fn preferences(&self, session: Option<&Session>) -> Result<Preferences, ServerError> {
        match session {
            Some(s) => self
                .db
                .with_conn(|conn| get_preferences(conn, &s.user_id, self.default_language)),
            None => Ok(Preferences {
                theme: Theme::default(),
                language: self.default_language,
            }),
        }
    }
}

pub fn handle(mut req: Request, ctx: &AppContext) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => redirect("/properties"),

        ("GET", "/login") => handlers::auth::login_form(ctx),
        ("POST", "/login") => {
            let form = read_form(&mut req)?;
            handlers::auth::login(&form, ctx)
        }
        ("POST", "/logout") => handlers::auth::logout(&req, ctx),

        ("GET", "/dashboard") => handlers::dashboard::show(&req, ctx),
        ("GET", "/properties") => handlers::properties::list(&req, ctx),

        ("GET", "/leases/extend") => handlers::extension::start(&req, ctx),
        ("POST", "/leases/extend") => {
            let form = read_form(&mut req)?;
            handlers::extension::step(&req, &form, ctx)
        }

        ("POST", "/preferences") => {
            let form = read_form(&mut req)?;
            handlers::preferences::save(&req, &form, ctx)
        }

        _ => Err(ServerError::NotFound),
    }
}

/// Current unix time in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| parse_pairs(q.as_bytes()))
        .unwrap_or_default()
}

/// Largest form body accepted.
pub const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Reads an `application/x-www-form-urlencoded` body of at most `MAX_FORM_BYTES`.
pub fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    if body.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest(format!(
            "form body larger than {MAX_FORM_BYTES} bytes"
        )));
    }
    Ok(parse_pairs(&body))
}

// Later duplicates win, matching how browsers submit a single value per field.
fn parse_pairs(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input).into_owned().collect()
}
