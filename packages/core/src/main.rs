use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

use medical_journal::api::create_router;
use medical_journal::cli::Cli;
use medical_journal::config::Config;
use medical_journal::db::create_pool;
use medical_journal::error::AppError;
use medical_journal::logging::init_logging;
use medical_journal::repository::JournalRepository;
use medical_journal::seed::seed_sample_data;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run().await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::from_env().map_err(AppError::Config)?.apply_cli(&cli);

    tracing::info!("Service starting with config: {:?}", config);

    let pool = create_pool(&config.database_url).await?;
    let repository = Arc::new(JournalRepository::new(pool));

    if config.seed_sample_data {
        seed_sample_data(&repository).await?;
    } else {
        tracing::info!("Sample data seeding disabled");
    }

    let app = create_router(repository).layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        // Keep serving; the process can still be stopped externally.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received. Stopping server.");
}
