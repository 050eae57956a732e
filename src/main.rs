use clap::Parser;
use foodtrucks::{
    api::{self, AppState},
    cli::{Cli, Commands},
    config::Settings,
    dataset::{self, LoadOptions},
    maps::GoogleMapsClient,
    Error, Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,foodtrucks=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host, data } => {
            serve(settings, port, host, data).await?;
        }
        Commands::Search {
            search,
            lat,
            lon,
            newest,
            debug,
            data,
        } => {
            let output = foodtrucks::cli::commands::search(
                &settings, data, search, lat, lon, newest, debug,
            )
            .await?;
            println!("{output}");
        }
    }

    Ok(())
}

async fn serve(
    mut settings: Settings,
    port: Option<u16>,
    host: Option<String>,
    data: Option<PathBuf>,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(data) = data {
        settings.dataset.path = data;
    }

    info!("Starting food truck server");
    info!("Dataset: {:?}", settings.dataset.path);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Fail fast on a missing API key rather than on the first proximity search
    let lookup = GoogleMapsClient::new(&settings.maps)?;
    info!(
        "Distance Matrix client ready (timeout: {}s, concurrency: {})",
        settings.maps.timeout_seconds, settings.maps.concurrency
    );

    let dataset = dataset::load_from_path(
        &settings.dataset.path,
        LoadOptions {
            skip_malformed: settings.dataset.skip_malformed,
        },
    )?;

    let state = AppState {
        dataset: Arc::new(dataset),
        lookup: Arc::new(lookup),
        settings: settings.clone(),
    };

    let app = api::create_router(state);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);
    info!("  GET  /foodtrucks?search=&lat=&lon=&newest&debug");
    info!("  GET  /health");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
