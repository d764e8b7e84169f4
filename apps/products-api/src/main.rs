//! Products API - product catalogue REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::postgres::{self, PostgresConfig};
use domain_products::entity;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "products-api")]
#[command(about = "Product catalogue REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Drop and recreate the products table
    ResetDb,
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    install_color_eyre();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await.map(|()| ExitCode::SUCCESS),
        Commands::ResetDb => Ok(reset_db().await),
    }
}

async fn serve() -> eyre::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await
        .inspect_err(|e| error!("Failed to connect to PostgreSQL: {}", e))?;

    postgres::sync_schema(&db, entity::Entity).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let router =
        create_router::<openapi::ApiDoc>(api_routes, &state.config.server.cors_allowed_origins)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL pool");
        match db.close().await {
            Ok(()) => info!("PostgreSQL pool closed"),
            Err(e) => error!("Failed to close PostgreSQL pool: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

/// Drop and recreate the table; the outcome is logged and mapped to the exit code.
async fn reset_db() -> ExitCode {
    init_tracing(&Environment::from_env());

    let result = async {
        let config = PostgresConfig::from_env()?;
        let db = postgres::connect_from_config(config).await?;
        postgres::reset_schema(&db, entity::Entity).await?;
        db.close().await?;
        eyre::Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            info!("data deleted successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
