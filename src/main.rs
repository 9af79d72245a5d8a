use std::time::Duration;

use tracing::info;

use mini_drive::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = mini_drive::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        mini_drive::logging::init_console_only(&config.logging.level);
    }

    info!("mini-drive - personal file storage");

    // Database bootstrap with fixed retry
    let db = match Database::open_with_retry(
        &config.database.path,
        config.database.connect_attempts,
        Duration::from_secs(config.database.connect_retry_secs),
    )
    .await
    {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database after retries: {e}");
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to initialize web server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Web server error: {e}");
        std::process::exit(1);
    }
}
