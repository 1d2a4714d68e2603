// Operational CLI: run migrations, mint development tokens.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use server_core::domains::auth::JwtService;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "migrate_cli", about = "Ops hub database and auth tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Mint a development JWT for an employee
    MintToken {
        /// Employee UUID the token is for
        #[arg(long)]
        employee_id: Uuid,
        /// Email to embed in the claims
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = false)]
        admin: bool,
        #[arg(long, default_value_t = false)]
        manager: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Migrate => {
            let pool = PgPoolOptions::new()
                .max_connections(2)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("Migrations complete");
        }
        Commands::MintToken {
            employee_id,
            email,
            admin,
            manager,
        } => {
            let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_issuer);
            let token = jwt_service.create_token(employee_id, email, admin, manager)?;
            println!("{}", token);
        }
    }

    Ok(())
}
