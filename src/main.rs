use campus_lost_found::app::app::App;
use campus_lost_found::config::AppConfig;
use campus_lost_found::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file before anything reads them
    let dotenv_result = dotenv();

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| AppConfig::default().log_dir);
    let _logger = Logger::new(&log_dir)?;

    info!("Starting Campus Lost & Found backend");
    match dotenv_result {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e);
        }
    };
    app.start().await
}
