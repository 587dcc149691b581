//! Session identity and the route guard built on it.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use crate::ids::UserId;

/// Account role carried in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Shopper.
    User,

    /// Merchant managing listings.
    Seller,

    /// Storefront administrator.
    Admin,

    /// Any role this client does not know about. Never allowed through a gate.
    #[serde(other)]
    Unknown,
}

/// Raw bearer token. Redacted in debug output and wiped on drop.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Errors decoding a session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Not three dot-separated segments.
    #[error("session token format is invalid")]
    InvalidFormat,

    /// The claims segment is not base64url.
    #[error("session token claims are not valid base64")]
    Encoding(#[source] base64::DecodeError),

    /// The claims are not the expected JSON object.
    #[error("session token claims could not be parsed")]
    Claims(#[source] serde_json::Error),

    /// The expiry is not a representable timestamp.
    #[error("session token expiry is out of range")]
    Expiry(#[source] jiff::Error),
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(alias = "userId")]
    id: UserId,
    role: Role,
    exp: i64,
}

/// Decoded identity of the signed-in user.
///
/// Passed explicitly to every operation that needs to scope or authorise a
/// request.
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed-in user.
    pub user_id: UserId,

    /// Role granted to the user.
    pub role: Role,

    /// Instant after which the session is no longer valid.
    pub expires_at: Timestamp,

    /// Token sent with every backend request.
    pub token: BearerToken,
}

impl Session {
    /// Decode the claims segment of a `header.claims.signature` token.
    ///
    /// The signature is not verified; the backend does that on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not three dot-separated segments or the
    /// claims are not base64url-encoded JSON with `id`, `role` and `exp`.
    pub fn decode(token: &str) -> Result<Self, SessionError> {
        let mut segments = token.split('.');

        let (Some(_header), Some(claims), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(SessionError::InvalidFormat);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(claims.trim_end_matches('='))
            .map_err(SessionError::Encoding)?;

        let claims: Claims = serde_json::from_slice(&bytes).map_err(SessionError::Claims)?;

        Ok(Self {
            user_id: claims.id,
            role: claims.role,
            expires_at: Timestamp::from_second(claims.exp).map_err(SessionError::Expiry)?,
            token: BearerToken::new(token),
        })
    }

    /// Whether the session has expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Enter the route.
    Allow,

    /// No usable session; sign in first.
    RedirectToLogin,

    /// Signed in, but the role may not enter.
    RedirectHome,
}

/// Guards a route by session presence, role membership and expiry.
#[derive(Debug, Clone)]
pub struct AuthGate {
    allowed: Vec<Role>,
}

impl AuthGate {
    /// A gate admitting only the given roles.
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Decide whether the session may enter the guarded route.
    pub fn check(&self, session: Option<&Session>, now: Timestamp) -> GateDecision {
        let Some(session) = session else {
            debug!("no session, redirecting to login");

            return GateDecision::RedirectToLogin;
        };

        if !self.allowed.contains(&session.role) {
            debug!(role = ?session.role, "role not allowed, redirecting home");

            return GateDecision::RedirectHome;
        }

        if session.is_expired(now) {
            debug!(expires_at = %session.expires_at, "session expired, redirecting to login");

            return GateDecision::RedirectToLogin;
        }

        GateDecision::Allow
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    pub(crate) fn token(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    pub(crate) fn user_token(user_id: u64, exp: i64) -> String {
        token(&format!(r#"{{"id":{user_id},"role":"USER","exp":{exp}}}"#))
    }
}
