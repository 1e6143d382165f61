//! Configuration for the site backend.
//!
//! Settings come from `config.toml` with every field defaulted, then
//! environment variables are applied on top. The deployment surface is the
//! environment (`PORT`, `MAIL_TO`, `SMTP_*`); the file exists for local
//! development convenience.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, WsnError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means permissive (site and API share a host).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Rate limit for the form API (requests per minute per client IP).
    #[serde(default = "default_api_rate_limit")]
    pub api_rate_limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_rate_limit() -> u32 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            api_rate_limit: default_api_rate_limit(),
        }
    }
}

/// Mail transport and addressing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Use implicit TLS (port 465 style). When false, STARTTLS is used if the
    /// server offers it.
    #[serde(default)]
    pub secure: bool,
    /// Accept self-signed certificates from the SMTP server.
    #[serde(default)]
    pub allow_self_signed: bool,
    /// SMTP username. Credentials are only applied when username and password
    /// are both set.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Connection timeout in seconds.
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
    /// Destination address for form notifications. Empty means unconfigured;
    /// submissions then fail at send time, the process still starts.
    #[serde(default)]
    pub to: String,
    /// Sender address.
    #[serde(default = "default_mail_from")]
    pub from: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_timeout() -> u64 {
    10
}

fn default_mail_from() -> String {
    "no-reply@wsn-vertrieb.de".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            secure: false,
            allow_self_signed: false,
            username: None,
            password: None,
            timeout_secs: default_mail_timeout(),
            to: String::new(),
            from: default_mail_from(),
        }
    }
}

/// Static site configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticSiteConfig {
    /// Path to the directory holding the site (index.html at its root).
    #[serde(default = "default_static_path")]
    pub path: String,
    /// Cache-Control max-age for served assets, in seconds.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,
}

fn default_static_path() -> String {
    "public".to_string()
}

fn default_cache_max_age() -> u64 {
    3600
}

impl Default for StaticSiteConfig {
    fn default() -> Self {
        Self {
            path: default_static_path(),
            cache_max_age_secs: default_cache_max_age(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file. Console-only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Mail transport configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Static site configuration.
    #[serde(default)]
    pub static_site: StaticSiteConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(WsnError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| WsnError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported variables: `PORT`, `MAIL_TO`, `MAIL_FROM`, `SMTP_HOST`,
    /// `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`, `SMTP_SECURE`,
    /// `SMTP_ALLOW_SELF_SIGNED`. Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = env_var("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(to) = env_var("MAIL_TO") {
            self.mail.to = to;
        }
        if let Some(from) = env_var("MAIL_FROM") {
            self.mail.from = from;
        }
        if let Some(host) = env_var("SMTP_HOST") {
            self.mail.smtp_host = host;
        }
        if let Some(port) = env_var("SMTP_PORT").and_then(|v| v.parse().ok()) {
            self.mail.smtp_port = port;
        }
        if let Some(user) = env_var("SMTP_USER") {
            self.mail.username = Some(user);
        }
        if let Some(pass) = env_var("SMTP_PASS") {
            self.mail.password = Some(pass);
        }
        if let Some(secure) = env_var("SMTP_SECURE") {
            self.mail.secure = secure == "true";
        }
        if let Some(allow) = env_var("SMTP_ALLOW_SELF_SIGNED") {
            self.mail.allow_self_signed = allow == "true";
        }
    }

    /// Validate the configuration.
    ///
    /// A missing destination address is not an error here; it is reported per
    /// submission at send time.
    pub fn validate(&self) -> Result<()> {
        match (&self.mail.username, &self.mail.password) {
            (Some(_), None) | (None, Some(_)) => Err(WsnError::Config(
                "SMTP_USER and SMTP_PASS must be configured together".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
