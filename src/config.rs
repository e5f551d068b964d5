use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub webhook: WebhookSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSettings {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// Optional TOML file overriding the embedded seed catalog
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

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

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with STEP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with STEP_)
            // e.g., STEP_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STEP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STEP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known bare environment variables into config values
///
/// The secrets usually arrive as plain `GEMINI_API_KEY` /
/// `WEBHOOK_URL` rather than the prefixed form, so both spellings work.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let gemini_api_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("STEP_GEMINI__API_KEY"))
        .ok();
    let webhook_url = env::var("WEBHOOK_URL")
        .or_else(|_| env::var("STEP_WEBHOOK__URL"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = gemini_api_key {
        builder = builder.set_override("gemini.api_key", api_key)?;
    }
    if let Some(url) = webhook_url {
        builder = builder.set_override("webhook.url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_default_gemini_model() {
        assert_eq!(default_gemini_model(), "gemini-3-flash-preview");
    }
}
