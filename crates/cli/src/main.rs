//! Duka Kuu CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run dashboard database migrations
//! duka-cli migrate
//!
//! # Create a store for a user
//! duka-cli store create --user user_2abc --name "Duka Kuu"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "duka-cli")]
#[command(author, version, about = "Duka Kuu dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create a new store
    Create {
        /// Owner's user id (the session token's `sub`)
        #[arg(short, long)]
        user: String,

        /// Store name
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Store { action } => match action {
            StoreAction::Create { user, name } => {
                commands::store::create(&user, &name).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_store_create() {
        let cli = Cli::try_parse_from(["duka-cli", "store", "create", "-u", "user_1", "-n", "Duka"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Store {
                action: StoreAction::Create { .. }
            })
        ));
    }
}
