//! User and trip store backed by SQLite through SQLx.

pub mod models;
pub mod pool;
pub mod queries;

pub use models::{TripRecord, UserRecord};
pub use pool::{create_pool, health_check, run_migrations, DbPool};
