//! Application settings loaded via OrthoConfig and the validated server
//! configuration derived from them.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Longest accepted access token lifetime: seven days.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

const DEFAULT_PORT: u16 = 8080;

/// Raw settings read from CLI arguments, `FEEDBACK_*` environment variables
/// and configuration files.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEEDBACK")]
pub struct AppSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub token_secret: Option<String>,
    /// Access token lifetime in minutes.
    #[ortho_config(default = 30)]
    pub token_ttl_minutes: i64,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

/// Reasons the loaded settings cannot start a server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("FEEDBACK_TOKEN_SECRET must be set")]
    MissingTokenSecret,
    #[error("token secret must be at least {MIN_TOKEN_SECRET_LEN} bytes, got {actual}")]
    TokenSecretTooShort { actual: usize },
    #[error("token lifetime must be positive, got {minutes} minutes")]
    NonPositiveTokenTtl { minutes: i64 },
    #[error("token lifetime must be at most {MAX_TOKEN_TTL_MINUTES} minutes, got {minutes}")]
    TokenTtlTooLong { minutes: i64 },
    #[error("pool size must be at least 1")]
    EmptyPool,
}

/// Validated configuration consumed by [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) pool_max_size: u32,
}

impl ServerConfig {
    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl TryFrom<AppSettings> for ServerConfig {
    type Error = SettingsError;

    fn try_from(settings: AppSettings) -> Result<Self, Self::Error> {
        let AppSettings {
            bind_addr,
            database_url,
            token_secret,
            token_ttl_minutes,
            pool_max_size,
        } = settings;

        let secret = Zeroizing::new(token_secret.ok_or(SettingsError::MissingTokenSecret)?);
        if secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(SettingsError::TokenSecretTooShort {
                actual: secret.len(),
            });
        }
        if token_ttl_minutes <= 0 {
            return Err(SettingsError::NonPositiveTokenTtl {
                minutes: token_ttl_minutes,
            });
        }
        let token_ttl = chrono::Duration::try_minutes(token_ttl_minutes)
            .filter(|_| token_ttl_minutes <= MAX_TOKEN_TTL_MINUTES)
            .ok_or(SettingsError::TokenTtlTooLong {
                minutes: token_ttl_minutes,
            })?;
        if pool_max_size == 0 {
            return Err(SettingsError::EmptyPool);
        }

        Ok(Self {
            bind_addr: bind_addr
                .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))),
            database_url: database_url.filter(|url| !url.trim().is_empty()),
            token_secret: Zeroizing::new(secret.as_bytes().to_vec()),
            token_ttl,
            pool_max_size,
        })
    }
}
