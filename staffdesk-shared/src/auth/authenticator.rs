/// Credential authentication
///
/// Verifies an (email, password) pair against the credential store and
/// produces an [`IdentityClaim`] on success.
///
/// Unknown email and wrong password are deliberately indistinguishable to
/// the caller: both surface as [`AuthError::InvalidCredentials`], and both
/// cost one Argon2 verification so response timing does not separate them.
/// Returning differently worded errors (or returning early) would let an
/// attacker enumerate registered addresses.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;
use super::password;

/// Syntactically valid Argon2id digest that matches no password. The
/// unknown-email path verifies against it so both failure branches pay the
/// same hashing cost; otherwise response timing would reveal whether the
/// email exists.
const DUMMY_DIGEST: &str =
    "$argon2id$v=19$m=65536,t=3,p=4$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Error type for credential authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email/password pair did not match a stored credential
    ///
    /// Covers both unknown email and wrong password; the distinction is
    /// never exposed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credential store unavailable or query failed
    #[error("Credential store error: {0}")]
    StoreError(#[from] sqlx::Error),
}

/// The trusted result of a successful authentication
///
/// Derived from a verified credential (here) or from a resolved session
/// token (in the API middleware).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// User ID
    pub id: Uuid,

    /// Email address as stored
    pub email: String,

    /// Display name shown to clients
    pub display_name: String,
}

/// Normalizes an email for lookup and storage
///
/// Trimmed and lower-cased so that "  Jane@X.com " and "jane@x.com" resolve
/// to the same credential.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticates an email/password pair against the credential store
///
/// Read-only: no side effects on the store. The caller decides whether to
/// record login activity.
///
/// # Errors
///
/// - `AuthError::InvalidCredentials` on any mismatch, including a stored
///   digest that fails to parse (treated as a non-matching credential at
///   this trust boundary rather than an internal fault)
/// - `AuthError::StoreError` if the lookup itself fails
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    plaintext: &str,
) -> Result<IdentityClaim, AuthError> {
    let email = normalize_email(email);

    let Some(user) = User::find_by_email(pool, &email).await? else {
        // Burn a full verification against the dummy digest so an unknown
        // email takes as long as a wrong password.
        let _ = password::verify_password(plaintext, DUMMY_DIGEST);
        return Err(AuthError::InvalidCredentials);
    };

    let valid = password::verify_password(plaintext, &user.password_hash).unwrap_or_else(|e| {
        tracing::warn!(user_id = %user.id, error = %e, "Stored password hash failed to parse");
        false
    });

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(IdentityClaim {
        id: user.id,
        display_name: user.first_name.clone(),
        email: user.email,
    })
}
