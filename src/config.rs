//! Server configuration from environment variables.

use std::path::PathBuf;

/// Settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Roster CSV; the built-in roster is used when unset.
    pub teams_csv: Option<PathBuf>,
    /// When set, recording real results requires a matching `x-admin-token` header.
    pub admin_token: Option<String>,
    /// Prediction sheets idle for this long are dropped.
    pub sheet_ttl_hours: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_sheet_ttl_hours() -> u32 {
    12
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            teams_csv: None,
            admin_token: None,
            sheet_ttl_hours: default_sheet_ttl_hours(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `TEAMS_CSV`, `ADMIN_TOKEN` and `SHEET_TTL_HOURS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with a custom variable source.
    /// Blank values count as unset; unparseable numbers fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT '{}'", raw);
                defaults.port
            }),
            None => defaults.port,
        };
        let sheet_ttl_hours = match get("SHEET_TTL_HOURS") {
            Some(raw) => match raw.parse() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    log::warn!("Ignoring invalid SHEET_TTL_HOURS '{}'", raw);
                    defaults.sheet_ttl_hours
                }
            },
            None => defaults.sheet_ttl_hours,
        };

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            teams_csv: get("TEAMS_CSV").map(PathBuf::from),
            admin_token: get("ADMIN_TOKEN"),
            sheet_ttl_hours,
        }
    }
}
