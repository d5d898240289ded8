/// StaffDesk API server
///
/// HTTP layer for the employee directory: credential registration and
/// login, stateless session tokens, and ownership-scoped employee CRUD.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
