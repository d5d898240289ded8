/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: sqlx migration runner

pub mod pool;
pub mod migrations;
