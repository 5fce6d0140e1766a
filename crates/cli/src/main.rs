//! Fournil CLI - Database migrations and staff management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! fournil-cli migrate storefront
//!
//! # Run back-office database migrations
//! fournil-cli migrate admin
//!
//! # Run all database migrations
//! fournil-cli migrate all
//!
//! # Create a staff account (prints the generated password once)
//! fournil-cli staff create -e elise@fournil.example -n "Élise" -r owner
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `staff create` - Create staff accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fournil-cli")]
#[command(author, version, about = "Fournil CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run back-office database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff account
    Create {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Staff display name
        #[arg(short, long)]
        name: String,

        /// Staff role (`owner`, `cook`)
        #[arg(short, long, default_value = "cook")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Staff { action } => match action {
            StaffAction::Create { email, name, role } => {
                commands::staff::create_user(&email, &name, &role).await?;
            }
        },
    }
    Ok(())
}
