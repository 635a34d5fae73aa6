// src/auth/submit_tokens.rs
use super::sessions::{generate_token, hash_token};
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// How long an unclaimed token stays usable.
pub const SUBMIT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Issues a single-use token for an extension submit form and prunes tokens
/// older than the TTL.
pub fn issue_submit_token(conn: &Connection, user_id: &str, now: i64) -> Result<String, ServerError> {
    conn.execute(
        "delete from submit_tokens where issued_at <= ?",
        params![now - SUBMIT_TOKEN_TTL_SECS],
    )
    .map_err(|e| ServerError::DbError(format!("prune submit tokens failed: {e}")))?;

    let raw = generate_token();
    conn.execute(
        "insert into submit_tokens (token_hash, user_id, issued_at) values (?, ?, ?)",
        params![hash_token(&raw), user_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("issue submit token failed: {e}")))?;
    Ok(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Claimed,
    /// Valid token that an earlier request already used.
    AlreadyUsed,
    /// Unknown, expired, or issued to another user.
    Unknown,
}

/// Marks the token used if it is live and unclaimed.
pub fn claim_submit_token(
    conn: &Connection,
    user_id: &str,
    raw_token: &str,
    now: i64,
) -> Result<Claim, ServerError> {
    let cutoff = now - SUBMIT_TOKEN_TTL_SECS;
    let changed = conn
        .execute(
            r#"
            update submit_tokens
               set claimed_at = ?
             where token_hash = ?
               and user_id = ?
               and claimed_at is null
               and issued_at > ?
            "#,
            params![now, hash_token(raw_token), user_id, cutoff],
        )
        .map_err(|e| ServerError::DbError(format!("claim submit token failed: {e}")))?;
    if changed == 1 {
        return Ok(Claim::Claimed);
    }

    let used: bool = conn
        .query_row(
            r#"
            select exists(
              select 1 from submit_tokens
               where token_hash = ? and user_id = ? and issued_at > ?
            )
            "#,
            params![hash_token(raw_token), user_id, cutoff],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("check submit token failed: {e}")))?;
    Ok(if used { Claim::AlreadyUsed } else { Claim::Unknown })
}

/// Makes a claimed token usable again after the backend call failed.
pub fn release_submit_token(conn: &Connection, user_id: &str, raw_token: &str) -> Result<(), ServerError> {
    conn.execute(
        "update submit_tokens set claimed_at = null where token_hash = ? and user_id = ?",
        params![hash_token(raw_token), user_id],
    )
    .map_err(|e| ServerError::DbError(format!("release submit token failed: {e}")))?;
    Ok(())
}
