/// Employee CRUD endpoints
///
/// All endpoints require a session token; the router middleware rejects
/// unauthenticated requests before these handlers run. Every operation then
/// passes through the authorization guard, which confines update/delete to
/// the record's owner and scopes listing to caller-owned records.
///
/// # Endpoints
///
/// - `POST   /v1/employees` - Create employee (caller becomes owner)
/// - `GET    /v1/employees` - List caller-owned employees
/// - `PUT    /v1/employees` - Partial update (owner only, id in body)
/// - `DELETE /v1/employees` - Delete (owner only, id in body)

use axum::{extract::State, http::StatusCode, Extension, Json};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::validation_errors,
};
use serde::{Deserialize, Serialize};
use staffdesk_shared::{
    auth::{
        authenticator::normalize_email,
        authorization::{authorize, Action},
        middleware::AuthContext,
    },
    models::employee::{CreateEmployee, Employee, EmployeeRole, UpdateEmployee},
};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Validates a phone number: optional leading '+', then 2-15 digits, the
/// first being 1-9 (E.164 shape, matching what registration forms accept)
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    let valid = digits.len() >= 2
        && digits.len() <= 15
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

/// Create employee request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    /// First name
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    /// Last name
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    /// Email address (unique across all employees)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Phone number
    #[validate(custom(function = validate_phone))]
    pub phone: String,

    /// Role; defaults to Staff when omitted
    #[serde(default)]
    pub role: EmployeeRole,
}

/// Update employee request
///
/// Absent fields leave stored values untouched; presence is the marker.
/// Email, role, and the owner are not updatable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    /// Target employee ID
    pub employee_id: Uuid,

    /// New first name
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,

    /// New last name
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,

    /// New phone number
    #[validate(custom(function = validate_phone))]
    pub phone: Option<String>,
}

/// Delete employee request
#[derive(Debug, Deserialize)]
pub struct DeleteEmployeeRequest {
    /// Target employee ID
    pub employee_id: Uuid,
}

/// Employee response wrapper
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    /// Status message
    pub message: String,

    /// The affected employee
    pub employee: Employee,
}

/// List employees response
#[derive(Debug, Serialize)]
pub struct ListEmployeesResponse {
    /// Caller-owned employees
    pub employees: Vec<Employee>,
}

/// Delete employee response
#[derive(Debug, Serialize)]
pub struct DeleteEmployeeResponse {
    /// Status message
    pub message: String,
}

/// Create an employee owned by the caller
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid session token
/// - `409 Conflict`: employee email already exists
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    authorize(Some(&auth), Action::Create, None).into_result()?;

    req.validate().map_err(validation_errors)?;

    // Owner is stamped from the claim, never from the request body
    let employee = Employee::create(
        &state.db,
        CreateEmployee {
            first_name: req.first_name,
            last_name: req.last_name,
            email: normalize_email(&req.email),
            phone: req.phone,
            role: req.role,
            created_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(employee_id = %employee.id, owner = %auth.user_id, "Employee created");

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            message: "Employee created successfully".to_string(),
            employee,
        }),
    ))
}

/// List employees owned by the caller
///
/// Never returns records owned by other users.
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ListEmployeesResponse>> {
    authorize(Some(&auth), Action::List, None).into_result()?;

    let employees = Employee::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(ListEmployeesResponse { employees }))
}

/// Partially update an employee (owner only)
///
/// Only the fields present in the body are applied. The owner field cannot
/// be changed through this endpoint (it does not exist in the shape).
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid session token
/// - `403 Forbidden`: caller is not the owner
/// - `404 Not Found`: no employee with that id
/// - `422 Unprocessable Entity`: validation failed
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    req.validate().map_err(validation_errors)?;

    let existing = Employee::find_by_id(&state.db, req.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    authorize(Some(&auth), Action::Update, Some(existing.created_by)).into_result()?;

    let employee = Employee::update(
        &state.db,
        existing.id,
        UpdateEmployee {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Ok(Json(EmployeeResponse {
        message: "Employee updated successfully".to_string(),
        employee,
    }))
}

/// Delete an employee (owner only)
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid session token
/// - `403 Forbidden`: caller is not the owner
/// - `404 Not Found`: no employee with that id
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<DeleteEmployeeRequest>,
) -> ApiResult<Json<DeleteEmployeeResponse>> {
    let existing = Employee::find_by_id(&state.db, req.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    authorize(Some(&auth), Action::Delete, Some(existing.created_by)).into_result()?;

    let deleted = Employee::delete(&state.db, existing.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    tracing::info!(employee_id = %existing.id, owner = %auth.user_id, "Employee deleted");

    Ok(Json(DeleteEmployeeResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+2348012345678".to_string(),
            role: EmployeeRole::Staff,
        }
    }

    #[test]
    fn test_validate_phone_accepts_e164() {
        assert!(validate_phone("+2348012345678").is_ok());
        assert!(validate_phone("14155550123").is_ok());
        assert!(validate_phone("+49").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_garbage() {
        assert!(validate_phone("notaphone").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+").is_err());
        assert!(validate_phone("0123456").is_err()); // leading zero
        assert!(validate_phone("+1234567890123456").is_err()); // too long
        assert!(validate_phone("123-456").is_err()); // separators not allowed
    }

    #[test]
    fn test_create_request_validation() {
        assert!(valid_create().validate().is_ok());

        let bad_phone = CreateEmployeeRequest {
            phone: "notaphone".to_string(),
            ..valid_create()
        };
        assert!(bad_phone.validate().is_err());

        let bad_email = CreateEmployeeRequest {
            email: "nope".to_string(),
            ..valid_create()
        };
        assert!(bad_email.validate().is_err());

        let long_name = CreateEmployeeRequest {
            first_name: "x".repeat(51),
            ..valid_create()
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_create_request_role_defaults_to_staff() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@x.com",
                "phone": "+2348012345678"
            }"#,
        )
        .unwrap();

        assert_eq!(req.role, EmployeeRole::Staff);
    }

    #[test]
    fn test_create_request_accepts_admin_role() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@x.com",
                "phone": "+2348012345678",
                "role": "Admin"
            }"#,
        )
        .unwrap();

        assert_eq!(req.role, EmployeeRole::Admin);
    }

    #[test]
    fn test_create_request_rejects_unknown_role() {
        let result: Result<CreateEmployeeRequest, _> = serde_json::from_str(
            r#"{
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@x.com",
                "phone": "+2348012345678",
                "role": "Superuser"
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_absent_fields_stay_absent() {
        let req: UpdateEmployeeRequest = serde_json::from_str(&format!(
            r#"{{ "employee_id": "{}", "phone": "+2348012345678" }}"#,
            Uuid::new_v4()
        ))
        .unwrap();

        assert!(req.first_name.is_none());
        assert!(req.last_name.is_none());
        assert_eq!(req.phone.as_deref(), Some("+2348012345678"));
    }

    #[test]
    fn test_update_request_rejects_owner_field() {
        // created_by is not part of the update shape; supplying it cannot
        // change ownership because the field simply does not deserialize
        // into anything the UPDATE statement touches.
        let req: UpdateEmployeeRequest = serde_json::from_str(&format!(
            r#"{{ "employee_id": "{}", "created_by": "{}" }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();

        assert!(req.first_name.is_none());
        assert!(req.last_name.is_none());
        assert!(req.phone.is_none());
    }

    #[test]
    fn test_update_request_validates_present_fields_only() {
        let valid = UpdateEmployeeRequest {
            employee_id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            phone: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = UpdateEmployeeRequest {
            employee_id: Uuid::new_v4(),
            first_name: Some("x".repeat(51)),
            last_name: None,
            phone: None,
        };
        assert!(invalid.validate().is_err());
    }
}
