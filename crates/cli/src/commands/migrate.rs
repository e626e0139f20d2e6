//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! duka-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/dashboard/migrations/` and are embedded into the
//! binary at compile time.

use super::{CommandError, database_url};

/// Run the dashboard database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to dashboard database...");
    let pool = duka_kuu_dashboard::db::create_pool(&database_url).await?;

    tracing::info!("Running dashboard migrations...");
    sqlx::migrate!("../dashboard/migrations").run(&pool).await?;

    tracing::info!("Dashboard migrations complete!");
    Ok(())
}
