use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use portfolio_notification::EmailConfig;
use serde::Deserialize;
use std::env;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/send-contact";

/// Unprefixed variables from plain `.env` deployments, mapped onto config keys.
const LEGACY_ENV: [(&str, &str); 7] = [
    ("PORT", "server.port"),
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("FROM_EMAIL", "smtp.from_email"),
    ("TO_EMAIL", "smtp.to_email"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the pre-built front-end
    pub public_dir: String,
}

/// Raw SMTP settings. Every field is optional; see [`Config::email_config`].
#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub to_email: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            username: None,
            password: None,
            from_email: None,
            to_email: None,
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Relay endpoint the `send` command posts to
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (PORT, SMTP_HOST, SMTP_USER, ...)
    /// 2. Prefixed environment variables (PORTFOLIO__SMTP__HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`], reading legacy variables through `lookup`.
    pub fn load_with(
        config_path: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.public_dir", "public")?
            .set_default("client.endpoint", DEFAULT_ENDPOINT)?
            .set_default("client.timeout_secs", 30)?;

        let config_file_path = config_path
            .or_else(|| lookup("CONFIG_PATH"))
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignore if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV {
            let Some(value) = lookup(var) else {
                continue;
            };

            builder = if key.ends_with(".port") {
                let port = value
                    .trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::Message(format!("{var}={value:?}: {e}")))?;
                builder.set_override(key, i64::from(port))?
            } else {
                builder.set_override(key, value)?
            };
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.smtp.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if self.client.timeout_secs == 0 {
            return Err("Client timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    /// Resolve the mail transport settings.
    ///
    /// `None` unless host, username and password are all set and non-empty.
    /// Sender and recipient fall back to the SMTP username.
    pub fn email_config(&self) -> Option<EmailConfig> {
        let smtp = &self.smtp;
        let host = non_empty(&smtp.host)?;
        let username = non_empty(&smtp.username)?;
        let password = non_empty(&smtp.password)?;

        Some(EmailConfig {
            smtp_host: host.to_owned(),
            smtp_port: smtp.port,
            smtp_username: username.to_owned(),
            smtp_password: password.to_owned(),
            from_address: non_empty(&smtp.from_email).unwrap_or(username).to_owned(),
            contact_address: non_empty(&smtp.to_email).unwrap_or(username).to_owned(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
