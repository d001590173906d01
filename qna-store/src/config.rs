//! Connection settings loaded from environment variables.

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// PostgreSQL connection settings.
///
/// # Env
/// - `DB_HOST` (default `localhost`)
/// - `DB_PORT` (default `5432`)
/// - `DB_NAME` (default `chatwithnotes`)
/// - `DB_USER` (default `chatuser`)
/// - `DB_PASSWORD` (default empty)
/// - `DB_CONNECT_TIMEOUT_SECS` (default `5`)
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub connect_timeout: Duration,
    pub max_connections: u32,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            database: "chatwithnotes".into(),
            user: "chatuser".into(),
            password: String::new(),
            connect_timeout: Duration::from_secs(5),
            max_connections: 5,
        }
    }
}

impl DbConfig {
    /// Build from environment variables with defaults for anything unset.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            host: env("DB_HOST", &d.host),
            port: parse("DB_PORT", d.port),
            database: env("DB_NAME", &d.database),
            user: env("DB_USER", &d.user),
            password: env("DB_PASSWORD", &d.password),
            connect_timeout: Duration::from_secs(parse("DB_CONNECT_TIMEOUT_SECS", 5u64)),
            max_connections: parse("DB_MAX_CONNECTIONS", d.max_connections),
        }
    }

    pub(crate) fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let cfg = DbConfig {
            password: "hunter2".into(),
            ..DbConfig::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("chatwithnotes"));
    }
}
