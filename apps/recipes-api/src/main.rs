use axum_helpers::server::{create_app, create_router};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::path::PathBuf;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, Environment};
use state::AppState;

/// HTTP service for recipes
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON configuration file; without it the environment is used
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let cli = Cli::parse();

    // Tracing goes up before config so config warnings are not lost
    init_tracing(&Environment::from_env());

    let config = match cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(&path)?
        }
        None => {
            info!("Loading configuration from environment variables");
            Config::from_env()?
        }
    };

    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Connected to recipes storage: {}/{}/{}",
        config.mongodb.redacted_url(),
        config.mongodb.database(),
        domain_recipes::mongodb::COLLECTION_NAME
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, state.config.server.timeout());

    create_app(router, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    // MongoDB client closes its pool on drop
    drop(state);
    info!("Recipes API shutdown complete");
    Ok(())
}
