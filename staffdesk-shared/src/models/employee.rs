/// Employee model and database operations
///
/// Employee records are owned by the user that created them (`created_by`).
/// Ownership is stamped at insert time and there is deliberately no code
/// path that updates it afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE employee_role AS ENUM ('admin', 'staff');
///
/// CREATE TABLE employees (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     first_name VARCHAR(50) NOT NULL,
///     last_name VARCHAR(50) NOT NULL,
///     email CITEXT NOT NULL UNIQUE,
///     phone VARCHAR(20) NOT NULL,
///     role employee_role NOT NULL DEFAULT 'staff',
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Employee role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employee_role", rename_all = "lowercase")]
pub enum EmployeeRole {
    /// Administrative staff
    Admin,

    /// Regular staff (default)
    #[default]
    Staff,
}

/// Employee record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    /// Unique employee ID (UUID v4)
    pub id: Uuid,

    /// First name (≤ 50 chars)
    pub first_name: String,

    /// Last name (≤ 50 chars)
    pub last_name: String,

    /// Email address (unique across all employees)
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Role
    pub role: EmployeeRole,

    /// Owning user; set on create, immutable afterwards
    pub created_by: Uuid,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an employee
#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: EmployeeRole,

    /// Owner, stamped from the authenticated claim
    pub created_by: Uuid,
}

/// Partial update for an employee
///
/// `None` means "leave the stored value untouched" — presence is the marker,
/// not truthiness, so an update that omits a field can never clobber it.
/// Email, role, and `created_by` are not updatable through this shape.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateEmployee {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.phone.is_none()
    }
}

impl Employee {
    /// Inserts a new employee owned by `data.created_by`
    ///
    /// # Errors
    ///
    /// A duplicate email violates the unique constraint; concurrent creates
    /// of the same address resolve to exactly one success because the
    /// constraint, not a read-then-write check, enforces uniqueness.
    pub async fn create(pool: &PgPool, data: CreateEmployee) -> Result<Self, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (first_name, last_name, email, phone, role, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, phone, role, created_by,
                      created_at, updated_at
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.role)
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(employee)
    }

    /// Finds an employee by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, email, phone, role, created_by,
                   created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    /// Lists all employees owned by `owner`, newest first
    ///
    /// Records owned by other users are never returned.
    pub async fn list_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, email, phone, role, created_by,
                   created_at, updated_at
            FROM employees
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(employees)
    }

    /// Applies a partial update
    ///
    /// Only fields present in `data` are written; the UPDATE statement is
    /// built dynamically from them. Returns the updated record, or None if
    /// the id does not exist. Ownership must already have been checked by
    /// the authorization guard.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateEmployee,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            // Nothing to write; return the current row unchanged
            return Self::find_by_id(pool, id).await;
        }

        let mut query = String::from("UPDATE employees SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.first_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", first_name = ${}", bind_count));
        }
        if data.last_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", last_name = ${}", bind_count));
        }
        if data.phone.is_some() {
            bind_count += 1;
            query.push_str(&format!(", phone = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, first_name, last_name, email, phone, role, \
             created_by, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Employee>(&query).bind(id);

        if let Some(first_name) = data.first_name {
            q = q.bind(first_name);
        }
        if let Some(last_name) = data.last_name {
            q = q.bind(last_name);
        }
        if let Some(phone) = data.phone {
            q = q.bind(phone);
        }

        let employee = q.fetch_optional(pool).await?;

        Ok(employee)
    }

    /// Deletes an employee by ID
    ///
    /// Returns true if a record was removed. Ownership must already have
    /// been checked by the authorization guard.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_is_staff() {
        assert_eq!(EmployeeRole::default(), EmployeeRole::Staff);
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&EmployeeRole::Admin).unwrap(), "\"Admin\"");
        assert_eq!(serde_json::to_string(&EmployeeRole::Staff).unwrap(), "\"Staff\"");

        let role: EmployeeRole = serde_json::from_str("\"Staff\"").unwrap();
        assert_eq!(role, EmployeeRole::Staff);
    }

    #[test]
    fn test_update_employee_presence_marker() {
        let update = UpdateEmployee::default();
        assert!(update.is_empty());

        let update = UpdateEmployee {
            phone: Some("+2348012345678".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(update.first_name.is_none());
        assert!(update.last_name.is_none());
    }
}
