use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub summarizer: SummarizerSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
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
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerSettings {
    #[serde(default = "default_summarizer_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_summarizer_model")]
    pub model: String,
    #[serde(default = "default_summarizer_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_summary_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_summary_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            endpoint: default_summarizer_endpoint(),
            api_key: None,
            model: default_summarizer_model(),
            timeout_secs: default_summarizer_timeout(),
            cache_size: default_summary_cache_size(),
            cache_ttl_secs: default_summary_cache_ttl(),
        }
    }
}

fn default_summarizer_endpoint() -> String { "https://api.openai.com/v1".to_string() }
fn default_summarizer_model() -> String { "gpt-4o-mini".to_string() }
fn default_summarizer_timeout() -> u64 { 10 }
fn default_summary_cache_size() -> u64 { 1000 }
fn default_summary_cache_ttl() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            summary_max_chars: default_summary_max_chars(),
        }
    }
}

fn default_summary_max_chars() -> usize { crate::core::DEFAULT_SUMMARY_CHARS }

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
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TABLEMATE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TABLEMATE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TABLEMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TABLEMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the loaded config
///
/// DATABASE_URL wins over database.url; OPENAI_API_KEY fills
/// summarizer.api_key.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        builder = builder.set_override("summarizer.api_key", api_key)?;
    }

    builder.build()
}
