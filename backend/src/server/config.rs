//! Process configuration resolved once at startup.
//!
//! A deployment profile selects defaults for the database URL and debug
//! flag; individual environment variables override them. Parsing goes
//! through an injected variable lookup so tests never mutate the process
//! environment.

use std::net::SocketAddr;

/// Deployment profile selecting configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Local development against a throwaway database.
    Development,
    /// Test runs against a dedicated database.
    Testing,
    /// Production: no database default, debug off.
    Production,
}

impl Profile {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "testing" => Some(Self::Testing),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    fn default_database_url(self) -> Option<&'static str> {
        match self {
            Self::Development => Some("postgres://localhost:5432/posts"),
            Self::Testing => Some("postgres://localhost:5432/posts-test"),
            Self::Production => None,
        }
    }

    const fn default_debug(self) -> bool {
        !matches!(self, Self::Production)
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The profile name is not one of the known profiles.
    #[error("unknown profile '{value}', expected development, testing or production")]
    UnknownProfile {
        /// The rejected profile value.
        value: String,
    },
    /// Production runs must name their database explicitly.
    #[error("DATABASE_URL must be set when running the production profile")]
    MissingDatabaseUrl,
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr {
        /// The rejected bind address value.
        value: String,
    },
}

/// Runtime configuration for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Active deployment profile.
    pub profile: Profile,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Debug flag; currently informational, surfaced in startup logs.
    pub debug: bool,
    /// Maximum number of pooled database connections.
    pub pool_max_size: u32,
}

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown `BLOGFUL_PROFILE`, a missing
    /// database URL in production, or an unparseable `BLOGFUL_BIND_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an injected variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let profile = match lookup("BLOGFUL_PROFILE") {
            Some(raw) => {
                Profile::parse(&raw).ok_or(ConfigError::UnknownProfile { value: raw })?
            }
            None => Profile::Development,
        };

        let database_url = lookup("DATABASE_URL")
            .or_else(|| profile.default_database_url().map(str::to_owned))
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let bind_addr = match lookup("BLOGFUL_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr { value: raw })?,
            None => SocketAddr::from(DEFAULT_BIND_ADDR),
        };

        let debug = match lookup("BLOGFUL_DEBUG") {
            Some(raw) => raw != "0",
            None => profile.default_debug(),
        };

        Ok(Self {
            profile,
            database_url,
            bind_addr,
            debug,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        })
    }
}
