// src/auth/sessions.rs
use crate::errors::ServerError;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

pub const SESSION_COOKIE: &str = "session";
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    /// Set once the visitor signs in with an allow-listed email.
    pub email: Option<String>,
}

/// URL-safe, unpadded base64 of 32 random bytes.
pub fn new_token() -> String {
    let mut raw = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

pub fn hash_token(raw_token: &str) -> [u8; 32] {
    let digest = Sha256::digest(raw_token.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Start an anonymous session. Returns it together with the raw cookie token.
pub fn create_session(
    conn: &Connection,
    now: i64,
    ttl_secs: i64,
) -> Result<(Session, String), ServerError> {
    let raw_token = new_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions (token_hash, created_at, expires_at)
        values (?, ?, ?)
        "#,
        params![hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    let session = Session {
        id: conn.last_insert_rowid(),
        email: None,
    };
    Ok((session, raw_token))
}

pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Session>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select id, email
        from sessions
        where token_hash = ?
          and expires_at > ?
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(Session {
                id: row.get(0)?,
                email: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn attach_email(conn: &Connection, session_id: i64, email: &str) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set email = ? where id = ?",
        params![email, session_id],
    )
    .map_err(|e| ServerError::DbError(format!("attach email failed: {e}")))?;
    Ok(())
}

pub fn clear_email(conn: &Connection, session_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set email = null where id = ?",
        params![session_id],
    )
    .map_err(|e| ServerError::DbError(format!("clear email failed: {e}")))?;
    Ok(())
}

/// Drop sessions that can no longer be used. Returns the removed ids.
pub fn purge_expired(conn: &Connection, now: i64) -> Result<Vec<i64>, ServerError> {
    let mut stmt = conn
        .prepare("delete from sessions where expires_at <= ? returning id")
        .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))?;

    let ids = stmt
        .query_map(params![now], |row| row.get(0))
        .and_then(|rows| rows.collect::<Result<Vec<i64>, _>>())
        .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))?;
    Ok(ids)
}

/// Pull the session token out of a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

pub fn set_cookie_value(raw_token: &str, ttl_secs: i64) -> String {
    format!("{SESSION_COOKIE}={raw_token}; Path=/; Max-Age={ttl_secs}; HttpOnly; SameSite=Lax")
}
