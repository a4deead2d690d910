use anyhow::Result;
use config::Config;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_LOCALE, DEFAULT_TIME_ZONE, DEFAULT_TOKEN_TTL_HOURS,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub i18n: I18nConfig,
    pub api: ApiConfig,
}

/// External login providers supported by the identity linking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Github,
    Twitter,
}

impl Provider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Twitter => "twitter",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "github" => Some(Self::Github),
            "twitter" => Some(Self::Twitter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    pub key: String,
    pub secret: String,
}

// Settings are logged at startup; the secret must not end up there.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("key", &self.key)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Administrator created at startup when no user with this login exists.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdminConfig {
    pub login: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token_ttl_hours: u32,
    pub github: Option<ProviderConfig>,
    pub twitter: Option<ProviderConfig>,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl AuthConfig {
    /// ## Summary
    /// Returns the credentials of a provider, or `None` if it is not configured.
    #[must_use]
    pub fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::Github => self.github.as_ref(),
            Provider::Twitter => self.twitter.as_ref(),
        }
    }

    /// ## Summary
    /// Lists the providers that have credentials configured.
    #[must_use]
    pub fn enabled_providers(&self) -> Vec<Provider> {
        [Provider::Github, Provider::Twitter]
            .into_iter()
            .filter(|p| self.provider(*p).is_some())
            .collect()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            github: None,
            twitter: None,
            bootstrap_admin: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    pub default_locale: String,
    pub default_time_zone: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub version: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_API_VERSION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(environment())
    }

    fn load_from(environment: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "debug")?
            .set_default("auth.token_ttl_hours", i64::from(DEFAULT_TOKEN_TTL_HOURS))?
            .set_default("i18n.default_locale", DEFAULT_LOCALE)?
            .set_default("i18n.default_time_zone", DEFAULT_TIME_ZONE)?
            .set_default("api.version", i64::from(DEFAULT_API_VERSION))?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env file
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// `OPENMENSA_` followed by the key path, nested keys joined by `__`,
/// e.g. `OPENMENSA_SERVER__PORT` or `OPENMENSA_AUTH__GITHUB__KEY`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("OPENMENSA")
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
