/// Authentication endpoints
///
/// - `POST /v1/auth/register` - Register a new user
/// - `POST /v1/auth/login` - Login and get a session token
///
/// Login failures are a single generic message for both unknown email and
/// wrong password; see [`staffdesk_shared::auth::authenticator`].

use axum::{extract::State, http::StatusCode, Json};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use serde::{Deserialize, Serialize};
use staffdesk_shared::{
    auth::{
        authenticator::{self, normalize_email},
        password, session,
    },
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (also checked for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// First name
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name must be 1-50 characters"
    ))]
    pub first_name: String,

    /// Last name
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Status message
    pub message: String,

    /// New user ID
    pub user_id: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Session token
    pub token: String,
}

/// Maps validator derive output into the API's field-level error shape
pub(crate) fn validation_errors(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "Passw0rd1",
///   "first_name": "Jane",
///   "last_name": "Doe"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: store failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate().map_err(validation_errors)?;

    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::validation("password", e))?;

    let password_hash = password::hash_password(&req.password)?;

    // The unique constraint on users.email decides duplicates; a concurrent
    // registration of the same address gets the Conflict from the same
    // constraint.
    let user = User::create(
        &state.db,
        CreateUser {
            email: normalize_email(&req.email),
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id.to_string(),
        }),
    ))
}

/// Login and obtain a session token
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "Passw0rd1"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `401 Unauthorized`: invalid credentials (cause not disclosed)
/// - `500 Internal Server Error`: store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(validation_errors)?;

    let claim = authenticator::authenticate(&state.db, &req.email, &req.password).await?;

    User::update_last_login(&state.db, claim.id).await?;

    let claims = session::SessionClaims::new(
        claim.id,
        claim.email,
        claim.display_name,
        state.token_ttl(),
    );
    let token = session::issue_token(&claims, state.session_secret())?;

    Ok(Json(LoginResponse {
        user_id: claim.id.to_string(),
        token,
    }))
}
