use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Bearer tokens issued by `/auth/login` and stored in `user_sessions`.
    Session,
    /// One configured bearer token for single-operator installs.
    StaticToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub session_ttl_hours: u32,
    pub static_token: Option<StaticTokenAuthConfig>,
}

#[derive(Clone, Deserialize)]
pub struct StaticTokenAuthConfig {
    pub token: String,
    pub username: String,
    pub role: String,
}

impl std::fmt::Debug for StaticTokenAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenAuthConfig")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// IANA timezone used to interpret calendar dates. Server local time when unset.
    pub timezone: Option<String>,
}

impl RegistryConfig {
    /// ## Summary
    /// Resolves the configured office timezone.
    ///
    /// ## Errors
    /// Returns an error if the configured name is not a known IANA timezone.
    pub fn office_timezone(&self) -> crate::error::CoreResult<crate::types::OfficeTimezone> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(crate::types::OfficeTimezone::Local),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(crate::types::OfficeTimezone::Named)
                .map_err(|_err| {
                    crate::error::CoreError::ConfigError(format!("unknown timezone: {name}"))
                }),
        }
    }
}

/// ## Summary
/// Environment source for settings. `__` separates nesting levels so that
/// snake_case keys survive, e.g. `AUTH__SESSION_TTL_HOURS` sets
/// `auth.session_ttl_hours`.
fn environment() -> config::Environment {
    config::Environment::default()
        .convert_case(config::Case::Snake)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// environment variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "session")?
            .set_default("auth.session_ttl_hours", 24)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env file and process environment
            .add_source(environment())
            .build()?
            .try_deserialize::<Settings>()?)
    }
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
