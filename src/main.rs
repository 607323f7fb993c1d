use std::sync::Arc;

use tracing::info;

use gatepost::verification::LogMailer;
use gatepost::web::WebServer;
use gatepost::{Config, Database};

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
    if let Err(e) = gatepost::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        gatepost::logging::init_console_only(&config.logging.level);
    }

    info!("Gatepost - membership-gated bulletin board");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };
    info!("Database ready at {}", config.database.path);

    let mailer = Arc::new(LogMailer::new(config.mail.from.clone()));

    let server = match WebServer::new(&config, db, mailer) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to configure server: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting server on {}", server.addr());
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
