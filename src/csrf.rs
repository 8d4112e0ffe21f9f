//! Anti-forgery tokens scoped to a named action.
//!
//! Tokens are stored in the session together with the action they were
//! issued for, so a token minted to delete one slug cannot authorize
//! deleting another.

use anyhow::{Result, bail};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tower_sessions::Session;

/// Session key for storing CSRF tokens.
const CSRF_SESSION_KEY: &str = "csrf_tokens";

/// Maximum number of tokens to store per session. Each admin page render
/// mints two tokens per listed definition plus one for the save form.
const MAX_TOKENS: usize = 100;

/// Token validity period in seconds (1 hour).
const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Generate a token for `action` and store it in the session.
pub async fn generate_csrf_token(session: &Session, action: &str) -> Result<String> {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);

    let timestamp = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(timestamp.to_le_bytes());
    hasher.update(action.as_bytes());
    let token = hex::encode(hasher.finalize());

    let mut tokens: Vec<String> = session
        .get(CSRF_SESSION_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default();

    tokens.push(format!("{token}:{timestamp}:{action}"));

    // Keep only the most recent tokens.
    if tokens.len() > MAX_TOKENS {
        let skip = tokens.len() - MAX_TOKENS;
        tokens = tokens.into_iter().skip(skip).collect();
    }

    session
        .insert(CSRF_SESSION_KEY, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to store CSRF token: {e}"))?;

    Ok(token)
}

/// Verify a token against the session for exactly `action`.
///
/// Tokens are single-use and time-limited. A token issued for a different
/// action never verifies, whatever its age.
pub async fn verify_csrf_token(session: &Session, submitted: &str, action: &str) -> Result<bool> {
    if submitted.is_empty() {
        bail!("empty CSRF token");
    }

    let mut tokens: Vec<String> = session
        .get(CSRF_SESSION_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default();

    if tokens.is_empty() {
        return Ok(false);
    }

    let now = chrono::Utc::now().timestamp();

    let mut found_index = None;
    for (i, record) in tokens.iter().enumerate() {
        let Some((token, timestamp, recorded_action)) = parse_record(record) else {
            continue;
        };
        if token == submitted && recorded_action == action && now - timestamp <= TOKEN_VALIDITY_SECS
        {
            found_index = Some(i);
            break;
        }
    }

    if let Some(index) = found_index {
        // Single-use: remove the matched token, and drop expired ones
        // while the list is in hand.
        tokens.remove(index);
        tokens.retain(|record| {
            parse_record(record).is_some_and(|(_, timestamp, _)| {
                now - timestamp <= TOKEN_VALIDITY_SECS
            })
        });

        session
            .insert(CSRF_SESSION_KEY, tokens)
            .await
            .map_err(|e| anyhow::anyhow!("failed to update CSRF tokens: {e}"))?;

        return Ok(true);
    }

    Ok(false)
}

/// Split a stored `token:timestamp:action` record.
fn parse_record(record: &str) -> Option<(&str, i64, &str)> {
    let mut parts = record.splitn(3, ':');
    let token = parts.next()?;
    let timestamp = parts.next()?.parse().ok()?;
    let action = parts.next()?;
    Some((token, timestamp, action))
}
