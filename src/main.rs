use dotenv::dotenv;
use salesdesk_backend::app::app::App;
use salesdesk_backend::util::logger::Logger;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the logger so RUST_LOG and FILE_LOG_LEVEL apply
    let dotenv_result = dotenv();

    // Guards must live until shutdown or buffered file logs are lost
    let _logger = Logger::new()?;

    info!("🚀 Starting Salesdesk Backend Application");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            return Err(e);
        }
    };
    app.start().await
}
