//! # Staffdesk Shared Library
//!
//! Shared types and business logic used by the Staffdesk API server.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, credential authentication, session tokens,
//!   request middleware, and the ownership authorization guard
//! - `models`: database models (users, employees)
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Staffdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
