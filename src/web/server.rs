//! Web server assembly and lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::mail::Mailer;
use crate::{Result, WsnError};

use super::handlers::AppState;
use super::middleware::RateLimitState;
use super::router::{create_health_router, create_router, create_static_router};

/// The assembled HTTP server.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Per-IP rate limiting state.
    rate_limit: Arc<RateLimitState>,
    /// Full configuration.
    config: Config,
}

impl WebServer {
    /// Wire up state from configuration and a mail transport.
    pub fn new(config: &Config, mailer: Arc<dyn Mailer>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|_| {
                WsnError::Config(format!(
                    "invalid listen address {}:{}",
                    config.server.host, config.server.port
                ))
            })?;

        let mail_to = (!config.mail.to.is_empty()).then(|| config.mail.to.clone());
        let app_state = AppState::new(mailer, mail_to, config.mail.from.clone());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            rate_limit: Arc::new(RateLimitState::new(config.server.api_rate_limit)),
            config: config.clone(),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> Router {
        let mut router = create_router(
            self.app_state.clone(),
            self.rate_limit.clone(),
            &self.config.server.cors_origins,
        )
        .merge(create_health_router());

        if let Some(static_router) = create_static_router(
            &self.config.static_site.path,
            self.config.static_site.cache_max_age_secs,
        ) {
            router = router.merge(static_router);
        }

        router.layer(CompressionLayer::new())
    }

    /// Bind and serve until SIGTERM or ctrl-c.
    pub async fn run(self) -> Result<()> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.rate_limit.clone().start_cleanup_task();
        tracing::info!("listening on http://{}", local_addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("server stopped");
        Ok(())
    }

    /// Bind and serve in the background, returning the bound address.
    ///
    /// Useful for tests binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("listening on http://{}", local_addr);

        tokio::spawn(async move {
            let service = router.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, service).await {
                tracing::error!("web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{Email, MailError};

    struct NoopMailer;

    #[async_trait::async_trait]
    impl Mailer for NoopMailer {
        async fn send(&self, _email: &Email) -> std::result::Result<(), MailError> {
            Ok(())
        }
    }

    #[test]
    fn test_new_with_valid_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;

        let server = WebServer::new(&config, Arc::new(NoopMailer)).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_new_with_invalid_addr() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();

        let result = WebServer::new(&config, Arc::new(NoopMailer));
        assert!(matches!(result, Err(WsnError::Config(_))));
    }
}
