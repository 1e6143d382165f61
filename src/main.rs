use std::sync::Arc;

use tracing::info;

use wsn_backend::{Config, SmtpMailer, WebServer};

#[tokio::main]
async fn main() -> wsn_backend::Result<()> {
    // Load configuration; environment overrides win either way
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();
    config.validate()?;

    // Initialize logging
    if let Err(e) = wsn_backend::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        wsn_backend::logging::init_console_only(&config.logging.level);
    }

    info!("WSN-Vertrieb site backend");
    if config.mail.to.is_empty() {
        tracing::warn!("MAIL_TO is not configured; form submissions will fail until it is set");
    }

    let mailer = Arc::new(SmtpMailer::from_config(&config.mail)?);
    let server = WebServer::new(&config, mailer)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await
}
