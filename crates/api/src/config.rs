//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use printstock_auth::DEFAULT_SESSION_TTL_HOURS;
use printstock_observability::LogFormat;

pub const ENV_BIND: &str = "PRINTSTOCK_BIND";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATA_FILE: &str = "PRINTSTOCK_DATA_FILE";
pub const ENV_STAFF_PASSWORD: &str = "PRINTSTOCK_STAFF_PASSWORD";
pub const ENV_ADMIN_PASSWORD: &str = "PRINTSTOCK_ADMIN_PASSWORD";
pub const ENV_SESSION_TTL_HOURS: &str = "PRINTSTOCK_SESSION_TTL_HOURS";
pub const ENV_STATIC_DIR: &str = "PRINTSTOCK_STATIC_DIR";
pub const ENV_LOG_FORMAT: &str = "PRINTSTOCK_LOG_FORMAT";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "data/stock.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub data_file: PathBuf,
    pub staff_password: String,
    pub admin_password: String,
    pub session_ttl: Duration,
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = match (get(ENV_BIND), get(ENV_PORT)) {
            (Some(addr), _) => addr.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                key: ENV_BIND,
                message: format!("{e}"),
            })?,
            (None, Some(port)) => {
                let port: u16 = port.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: ENV_PORT,
                    message: format!("{e}"),
                })?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        };

        let session_ttl = match get(ENV_SESSION_TTL_HOURS) {
            Some(raw) => {
                let hours: i64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: ENV_SESSION_TTL_HOURS,
                    message: format!("{e}"),
                })?;
                if !(1..=24 * 365).contains(&hours) {
                    return Err(ConfigError::Invalid {
                        key: ENV_SESSION_TTL_HOURS,
                        message: format!("{hours} is outside 1..=8760"),
                    });
                }
                Duration::hours(hours)
            }
            None => Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        };

        Ok(Self {
            bind,
            data_file: get(ENV_DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            staff_password: get(ENV_STAFF_PASSWORD).ok_or(ConfigError::Missing(ENV_STAFF_PASSWORD))?,
            admin_password: get(ENV_ADMIN_PASSWORD).ok_or(ConfigError::Missing(ENV_ADMIN_PASSWORD))?,
            session_ttl,
            static_dir: get(ENV_STATIC_DIR).map(PathBuf::from),
            log_format: get(ENV_LOG_FORMAT)
                .map(|v| LogFormat::from_name(&v))
                .unwrap_or_default(),
        })
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("data_file", &self.data_file)
            .field("staff_password", &"<redacted>")
            .field("admin_password", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl.num_hours())
            .field("static_dir", &self.static_dir)
            .field("log_format", &self.log_format)
            .finish()
    }
}
