use std::net::SocketAddr;

use clap::Parser;
use database::connection::{connect, reset_migrations, run_migrations};
use database::DbRepository;
use tracing::info;

/// A minimal question-and-answer CRUD API backed by PostgreSQL.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Drop all tables by rolling every migration back before applying them
    /// again. Destructive; intended for development only.
    #[arg(long)]
    reset_db: bool,
}

/// The main entry point for the QA API service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if one exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = configuration::load_settings()?;

    info!("Starting QA API service...");

    let db_pool = connect(&settings.database.connection_url()).await?;

    if cli.reset_db {
        info!("Reset-db flag detected: rolling back all migrations...");
        reset_migrations(&db_pool).await?;
        info!("Database reset complete, applying fresh migrations...");
    }

    info!("Running migrations...");
    run_migrations(&db_pool).await?;
    info!("Migrations completed");

    info!(
        "Connected to database '{}' as user '{}'",
        settings.database.name, settings.database.user
    );

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    web_server::run_server(addr, DbRepository::new(db_pool)).await
}
