//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a store for an identity-provider user id
//! duka-cli store create --user user_2abc --name "Duka Kuu"
//! ```

use duka_kuu_core::{StoreName, UserId};
use duka_kuu_dashboard::db::{Catalog, PgCatalog};

use super::{CommandError, database_url};

/// Create a store owned by `user`.
///
/// # Returns
///
/// The id of the created store.
///
/// # Errors
///
/// Returns `CommandError` if the name is invalid or the insert fails.
pub async fn create(user: &str, name: &str) -> Result<String, CommandError> {
    let user_id = UserId::new(user.trim());
    if user_id.is_blank() {
        return Err(CommandError::InvalidArgument("user", user.to_owned()));
    }
    let name = StoreName::parse(name)
        .map_err(|e| CommandError::InvalidArgument("store name", e.to_string()))?;

    let pool = duka_kuu_dashboard::db::create_pool(&database_url()?).await?;
    let catalog = PgCatalog::new(pool);

    let store = catalog.create_store(&user_id, &name).await?;
    tracing::info!(
        "Store created successfully! ID: {}, Name: {}, Owner: {}",
        store.id,
        store.name,
        store.user_id
    );

    Ok(store.id.into_inner())
}
