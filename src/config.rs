use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub sendgrid: SendGridSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Sender identity and SendGrid credentials
///
/// Values left empty are not rejected locally; dispatch proceeds and the
/// provider turns them into a rejected send.
#[derive(Debug, Clone, Deserialize)]
pub struct SendGridSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub template_id: String,
}

impl Default for SendGridSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            from_name: String::new(),
            from_email: String::new(),
            template_id: String::new(),
        }
    }
}

fn default_api_base() -> String { "https://api.sendgrid.com".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local config file (config/local.toml, for development overrides)
    /// 4. Environment variables (prefixed with MAILFORM_)
    /// 5. Plain SENDGRID_* environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with MAILFORM_)
            // e.g., MAILFORM_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MAILFORM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply the SendGrid-conventional environment variable names
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MAILFORM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Override SendGrid settings from the provider's conventional variable
/// names (SENDGRID_API_KEY and friends), checked before the prefixed form
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("SENDGRID_API_KEY")
        .or_else(|_| env::var("MAILFORM_SENDGRID__API_KEY"))
        .ok();
    let from_name = env::var("SENDGRID_FROM_NAME").ok();
    let from_email = env::var("SENDGRID_FROM_EMAIL").ok();
    let template_id = env::var("SENDGRID_TEMPLATE_ID").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("sendgrid.api_key", api_key)?;
    }
    if let Some(from_name) = from_name {
        builder = builder.set_override("sendgrid.from_name", from_name)?;
    }
    if let Some(from_email) = from_email {
        builder = builder.set_override("sendgrid.from_email", from_email)?;
    }
    if let Some(template_id) = template_id {
        builder = builder.set_override("sendgrid.template_id", template_id)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_settings() {
        let settings = ServerSettings::default();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert!(settings.workers.is_none());
    }

    #[test]
    fn test_default_sendgrid_settings() {
        let settings = SendGridSettings::default();
        assert_eq!(settings.api_base, "https://api.sendgrid.com");
        assert!(settings.api_key.is_empty());
        assert!(settings.from_name.is_empty());
        assert!(settings.from_email.is_empty());
        assert!(settings.template_id.is_empty());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
