/// Stateless session tokens
///
/// Sessions are represented entirely by a signed JWT; no session record is
/// kept server-side. The token carries the identity claim (user id, email,
/// display name) plus standard timestamps, signed with HS256 and a
/// process-wide secret injected at startup.
///
/// Because tokens are stateless, sign-out is a client-side discard: a token
/// remains valid until it expires or the secret rotates. This is a known
/// limitation of the design, not an oversight.
///
/// # Example
///
/// ```
/// use staffdesk_shared::auth::session::{issue_token, resolve_token, SessionClaims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = SessionClaims::new(
///     Uuid::new_v4(),
///     "user@example.com".to_string(),
///     "Jane".to_string(),
///     Duration::hours(24),
/// );
///
/// let token = issue_token(&claims, secret)?;
/// let resolved = resolve_token(&token, secret)?;
/// assert_eq!(resolved.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim value
const ISSUER: &str = "staffdesk";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,

    /// Signature check failed or payload is malformed
    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token
///
/// # Standard claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "staffdesk")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom claims
///
/// - `email`: the user's email at issue time
/// - `name`: display name, used by clients only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Email address (custom claim)
    pub email: String,

    /// Display name (custom claim)
    pub name: String,
}

impl SessionClaims {
    /// Creates session claims expiring `ttl` from now
    pub fn new(user_id: Uuid, email: String, name: String, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email,
            name,
        }
    }
}

/// Signs claims into a session token
///
/// Signed with HS256. The secret should be at least 32 bytes, randomly
/// generated, and supplied via configuration rather than hard-coded.
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn issue_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a session token and extracts its claims
///
/// Checks the signature, issuer, expiry, and not-before time. Resolution is
/// a pure function of the token and secret; it is idempotent and safe to
/// call on every request.
///
/// # Errors
///
/// - `SessionError::Expired` if the expiry claim has passed
/// - `SessionError::Invalid` for any signature or payload problem
pub fn resolve_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn sample_claims(ttl: Duration) -> SessionClaims {
        SessionClaims::new(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            "Jane".to_string(),
            ttl,
        )
    }

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = SessionClaims::new(
            user_id,
            "a@x.com".to_string(),
            "A".to_string(),
            Duration::hours(24),
        );

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "staffdesk");
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_issue_and_resolve_roundtrip() {
        let claims = sample_claims(Duration::hours(1));
        let token = issue_token(&claims, SECRET).expect("Should create token");

        let resolved = resolve_token(&token, SECRET).expect("Should resolve token");
        assert_eq!(resolved, claims);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let claims = sample_claims(Duration::hours(1));
        let token = issue_token(&claims, SECRET).expect("Should create token");

        let first = resolve_token(&token, SECRET).expect("First resolve should succeed");
        let second = resolve_token(&token, SECRET).expect("Second resolve should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_with_wrong_secret() {
        let claims = sample_claims(Duration::hours(1));
        let token = issue_token(&claims, "secret-number-one-32-bytes-long!").unwrap();

        let result = resolve_token(&token, "secret-number-two-32-bytes-long!");
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_resolve_expired_token() {
        // Negative duration = already expired
        let claims = sample_claims(Duration::seconds(-3600));
        assert!(claims.exp < Utc::now().timestamp());

        let token = issue_token(&claims, SECRET).expect("Should create token");
        let result = resolve_token(&token, SECRET);

        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_resolve_garbage_token() {
        assert!(matches!(
            resolve_token("not-a-jwt", SECRET),
            Err(SessionError::Invalid(_))
        ));
        assert!(matches!(
            resolve_token("a.b.c", SECRET),
            Err(SessionError::Invalid(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_foreign_issuer() {
        let mut claims = sample_claims(Duration::hours(1));
        claims.iss = "someone-else".to_string();
        let token = issue_token(&claims, SECRET).unwrap();

        assert!(matches!(
            resolve_token(&token, SECRET),
            Err(SessionError::Invalid(_))
        ));
    }
}
