// Auth middleware: stateless HMAC-SHA256 bearer tokens.
//
// Token format: {user_id}.{expiry_secs}.{hmac_hex}
//
// The HMAC covers "{user_id}.{expiry_secs}" signed with CEKVIRAL_TOKEN_SECRET.
// User ids may contain dots, so tokens are split from the right.
//
// Auth check (this middleware):
//   secret empty → anonymous, allow
//   Authorization: Bearer <token> → verify HMAC → verify expiry → allow as user
//   anything else → 401

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{AppState, AuthUser};

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime: 24 hours.
pub const TOKEN_TTL_SECS: u64 = 86_400;

/// Token lifetime for a TTL given in hours. Saturates instead of overflowing.
pub fn ttl_from_hours(hours: u64) -> u64 {
    hours.saturating_mul(3600)
}

/// Issue a token for `user_id`, valid for `ttl_secs`.
pub fn create_token(secret: &str, user_id: &str, ttl_secs: u64) -> String {
    let expiry = now_secs().saturating_add(ttl_secs);
    let payload = format!("{user_id}.{expiry}");
    let sig = hmac_sign(secret, &payload);
    format!("{payload}.{sig}")
}

/// Verify a token. Returns the user id if the HMAC is valid and the token
/// has not expired.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let mut parts = token.rsplitn(3, '.');
    let provided_sig = parts.next()?;
    let expiry_str = parts.next()?;
    let user_id = parts.next()?;
    if user_id.is_empty() {
        return None;
    }

    let payload = format!("{user_id}.{expiry_str}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let expiry = expiry_str.parse::<u64>().ok()?;
    if now_secs() >= expiry {
        return None;
    }
    Some(user_id.to_string())
}

/// Axum middleware: attach the caller's identity, or reject with 401 when a
/// secret is configured and no valid bearer token is present.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = &state.config.token_secret;

    let user = if secret.is_empty() {
        AuthUser(None)
    } else {
        match bearer_token(&request).and_then(|token| verify_token(secret, token)) {
            Some(user_id) => AuthUser(Some(user_id)),
            None => {
                return super::api_error(StatusCode::UNAUTHORIZED, "Authentication required")
            }
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

// --- Private helpers ---

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn hmac_sign(secret: &str, payload: &str) -> String {
    // HMAC accepts keys of any length, so this never fails.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn bearer_token(request: &Request) -> Option<&str> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
