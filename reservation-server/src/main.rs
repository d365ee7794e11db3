use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reservation_server::config::ServerConfig;
use reservation_server::service::ReservationService;
use reservation_server::storage::MemoryStorage;
use reservation_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reservation_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Reference data is loaded once; a bad data set stops startup
    info!(dir = %config.data_dir.display(), "loading reference data");
    let storage = Arc::new(MemoryStorage::load(&config.data_dir)?);
    let service = ReservationService::bootstrap(storage, config.service_config()).await?;

    let state = AppState::new(service, config.utc_offset);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "reservation server listening");
    info!("  GET  /health                                - Health check");
    info!("  GET  /api/stations                          - Station list");
    info!("  GET  /api/train/search                      - Search trains");
    info!("  GET  /api/train/seats                       - Car seat map");
    info!("  POST /api/train/reserve                     - Reserve seats");
    info!("  GET  /api/user/reservations                 - List reservations");
    info!("  POST /api/user/reservations/:id/cancel      - Cancel a reservation");

    axum::serve(listener, app).await?;
    Ok(())
}
