// src/auth/sessions.rs
use crate::domain::{AuthGrant, Role};
use crate::errors::ServerError;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

/// A signed-in user as seen by request handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    /// Backend access token, forwarded on every RPC so RLS applies.
    pub access_token: String,
    pub expires_at: i64,
}

/// Random URL-safe cookie token (32 bytes, base64 without padding).
pub fn generate_token() -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

pub(crate) fn hash_token(raw_token: &str) -> Vec<u8> {
    Sha256::digest(raw_token.as_bytes()).to_vec()
}

/// A freshly stored session: the raw cookie token and how long it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    pub token: String,
    pub max_age_secs: i64,
}

/// Stores a session for a backend grant. The session never outlives the
/// backend token it carries; `max_age_secs` is the capped lifetime.
pub fn create_session(
    conn: &Connection,
    grant: &AuthGrant,
    role: Role,
    now: i64,
    ttl_secs: i64,
) -> Result<IssuedSession, ServerError> {
    let raw_token = generate_token();
    let ttl = if grant.expires_in > 0 {
        ttl_secs.min(grant.expires_in)
    } else {
        ttl_secs
    };
    let expires_at = now + ttl;

    conn.execute(
        r#"
        insert into sessions (token_hash, user_id, email, role, access_token, created_at, expires_at)
        values (?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            hash_token(&raw_token),
            grant.user_id,
            grant.email,
            role.code(),
            grant.access_token,
            now,
            expires_at
        ],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(IssuedSession {
        token: raw_token,
        max_age_secs: ttl,
    })
}

pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Session>, ServerError> {
    conn.query_row(
        r#"
        select user_id, email, role, access_token, expires_at
        from sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash_token(raw_token), now],
        |row| {
            let role: String = row.get(2)?;
            Ok(Session {
                user_id: row.get(0)?,
                email: row.get(1)?,
                role: Role::from_code(&role),
                access_token: row.get(3)?,
                expires_at: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash_token(raw_token)],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Drops expired and revoked rows. Returns how many were removed.
pub fn purge_stale_sessions(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}
