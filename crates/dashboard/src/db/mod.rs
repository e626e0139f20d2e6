//! Persistence for the dashboard.
//!
//! Handlers talk to the [`Catalog`] trait only. Two implementations exist:
//!
//! - [`PgCatalog`] - `PostgreSQL` via sqlx, used in production
//! - [`MemoryCatalog`] - in-process maps, used by tests and local runs
//!
//! # Database: `dashboard` schema
//!
//! ## Tables
//!
//! - `store` - Stores and their owning user id
//! - `hero` - Hero sections (promotional banners)
//! - `category` - Product categories (each promoted by a hero)
//! - `size` / `color` - Product attributes
//! - `product` - Products (scalar fields)
//! - `image` - Product images (`ON DELETE CASCADE` from product)
//!
//! Every other foreign key is `ON DELETE RESTRICT`, so deleting a store or an
//! attribute that is still in use fails with [`RepositoryError::Conflict`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/dashboard/migrations/` and run via:
//! ```bash
//! cargo run -p duka-kuu-cli -- migrate
//! ```

pub mod catalog;
pub mod categories;
pub mod colors;
pub mod heroes;
pub mod memory;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::{Catalog, PgCatalog};
pub use memory::MemoryCatalog;

/// `PostgreSQL` SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The record is still referenced by other records.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced record does not exist in the same store.
    #[error("invalid reference: {0}")]
    InvalidReference(&'static str),
}

impl RepositoryError {
    /// Map a foreign key violation on delete to [`RepositoryError::Conflict`].
    ///
    /// Any other error is passed through as [`RepositoryError::Database`].
    pub(crate) fn restrict_violation(err: sqlx::Error, message: &str) -> Self {
        let is_fk_violation = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| code == FOREIGN_KEY_VIOLATION);

        if is_fk_violation {
            Self::Conflict(message.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_violation_passes_through_non_database_errors() {
        let err = RepositoryError::restrict_violation(sqlx::Error::RowNotFound, "in use");
        assert!(matches!(
            err,
            RepositoryError::Database(sqlx::Error::RowNotFound)
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(RepositoryError::NotFound.to_string(), "not found");
        assert_eq!(
            RepositoryError::InvalidReference("category id").to_string(),
            "invalid reference: category id"
        );
    }
}
