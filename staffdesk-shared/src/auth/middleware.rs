/// Session authentication middleware for Axum
///
/// Extracts the Bearer token from the Authorization header, resolves it to
/// session claims, and injects an [`AuthContext`] into request extensions.
/// Handlers read it with Axum's `Extension` extractor.
///
/// Every failure mode here (missing header, malformed header, bad signature,
/// expired token) maps to 401 so a probing caller learns nothing about why
/// the token was refused.
///
/// # Example
///
/// ```no_run
/// use axum::{Extension, Router, middleware, routing::get};
/// use staffdesk_shared::auth::middleware::{session_auth_middleware, AuthContext};
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     format!("user {}", auth.user_id)
/// }
///
/// let secret = "your-session-secret-32-bytes-min!".to_string();
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(move |req, next| {
///         session_auth_middleware(secret.clone(), req, next)
///     }));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::session::{resolve_token, SessionClaims};

/// Authenticated request context
///
/// Added to request extensions after the session token resolves. Presence of
/// this value is the proof of authentication downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email from the session claims
    pub email: String,
}

impl AuthContext {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self { user_id, email }
    }

    /// Builds the context from resolved session claims
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
        }
    }
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum MiddlewareError {
    /// Missing or non-Bearer Authorization header
    MissingCredentials,

    /// Token failed to resolve (bad signature, malformed, or expired)
    InvalidToken,
}

impl IntoResponse for MiddlewareError {
    fn into_response(self) -> Response {
        // Uniform 401 regardless of the underlying cause
        let body = Json(json!({
            "error": "unauthorized",
            "message": "Authentication required",
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Extracts the Bearer token from an Authorization header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Session authentication middleware
///
/// On success, the request proceeds with an [`AuthContext`] extension; on
/// any failure the request is rejected with 401 before reaching a handler.
pub async fn session_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, MiddlewareError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(MiddlewareError::MissingCredentials)?;

    let token = bearer_token(auth_header).ok_or(MiddlewareError::MissingCredentials)?;

    let claims = resolve_token(token, &secret).map_err(|_| MiddlewareError::InvalidToken)?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionClaims;
    use chrono::Duration;

    #[test]
    fn test_auth_context_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = SessionClaims::new(
            user_id,
            "a@x.com".to_string(),
            "A".to_string(),
            Duration::hours(1),
        );

        let context = AuthContext::from_claims(&claims);
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.email, "a@x.com");
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_middleware_error_is_uniform_401() {
        let missing = MiddlewareError::MissingCredentials.into_response();
        let invalid = MiddlewareError::InvalidToken.into_response();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
    }
}
