//! NSE Scanner API Server
//!
//! Serves settings and on-demand scans over HTTP. Scans run only when
//! `/api/scan` is called; callers decide the cadence.

use dotenvy::dotenv;
use nse_scanner::config::{get_environment, ScannerSettings};
use nse_scanner::core::http::start_server;
use nse_scanner::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let settings = ScannerSettings::from_env();
    let env = get_environment();
    info!("Starting NSE Scanner API Server");
    info!(environment = %env, "Environment");
    info!(
        port = settings.port,
        symbols = %settings.symbols.join(", "),
        benchmark = %settings.benchmark_symbol,
        timeout_secs = settings.scan_timeout.as_secs(),
        "Scanner settings"
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(settings) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
