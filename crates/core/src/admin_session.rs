//! Admin session cookie names and token signing.
//!
//! The dashboard identifies an admin by two cookies: `admin_id` (readable by
//! the browser) and `admin_token`, a signed session token of the form
//! `{issued_at}.{mac}` where `mac` is the hex HMAC-SHA256 of
//! `{admin_id}|{issued_at}` under the server's session secret. A token is
//! only accepted for the id it was issued for, and only until it is older
//! than the configured session lifetime.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Cookie carrying the admin's id. Not `HttpOnly`; the client reads it.
pub const ADMIN_ID_COOKIE: &str = "admin_id";

/// Cookie carrying the signed session token. `HttpOnly`.
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

/// Prefix of the auth provider's own session cookies, cleared on logout.
pub const PROVIDER_COOKIE_PREFIX: &str = "sb-";

/// Default admin session lifetime (8 hours).
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 8 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

fn session_mac(secret: &str, admin_id: &str, issued_at: i64) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(admin_id.as_bytes());
    mac.update(b"|");
    mac.update(issued_at.to_string().as_bytes());
    mac
}

/// Sign a session for `admin_id` issued at `issued_at` (unix seconds).
pub fn sign_admin_session(secret: &str, admin_id: &str, issued_at: i64) -> String {
    let mac = session_mac(secret, admin_id, issued_at).finalize().into_bytes();
    format!("{issued_at}.{}", hex::encode(mac))
}

/// Check a session token against an admin id at time `now`.
///
/// Rejects tokens that are malformed, signed for another id or secret,
/// issued in the future, or older than `max_age_secs`.
pub fn verify_admin_token(
    secret: &str,
    admin_id: &str,
    token: &str,
    now: i64,
    max_age_secs: i64,
) -> bool {
    let Some((issued_at, signature)) = token.split_once('.') else {
        return false;
    };
    let Ok(issued_at) = issued_at.parse::<i64>() else {
        return false;
    };
    if issued_at > now || now - issued_at > max_age_secs {
        return false;
    }
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    session_mac(secret, admin_id, issued_at)
        .verify_slice(&signature)
        .is_ok()
}
