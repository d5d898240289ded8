/// Database models
///
/// # Models
///
/// - `user`: accounts that can log in and own records
/// - `employee`: employee records, scoped to their creating user

pub mod user;
pub mod employee;
