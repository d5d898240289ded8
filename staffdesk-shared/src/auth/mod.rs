/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`authenticator`]: credential verification producing an identity claim
/// - [`session`]: stateless HS256 session tokens
/// - [`middleware`]: Axum layer binding session tokens to requests
/// - [`authorization`]: ownership guard over employee records
///
/// # Flow
///
/// Credentials are verified by [`authenticator::authenticate`], the resulting
/// claim is minted into a token by [`session::issue_token`], later requests
/// resolve the token back to a claim in [`middleware`], and the
/// [`authorization`] guard decides each employee operation from that claim.

pub mod password;
pub mod authenticator;
pub mod session;
pub mod middleware;
pub mod authorization;
