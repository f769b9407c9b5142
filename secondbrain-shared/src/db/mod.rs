/// Database layer
///
/// - `pool`: PostgreSQL connection pool lifecycle and health checks
/// - `migrations`: Embedded schema migrations
///
/// Models live in the crate-level `models` module; handlers reach the
/// database through `store::PgStore`.

pub mod migrations;
pub mod pool;
