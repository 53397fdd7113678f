//! Database layer for the vidmark service.
//!
//! Provides SQLite connection pooling (via `r2d2`) and the embedded schema
//! migrations that create the marker table. The pool is built once at
//! startup and handed to the store; nothing here is process-global.
//!
//! SQLite stands in for a networked SQL server: the "create the database if
//! absent" startup step is the `SQLITE_OPEN_CREATE` flag, and the table
//! creation step is an idempotent, versioned migration. The service must not
//! accept traffic until both have succeeded.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
