use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

use crate::queries::SearchMode;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub search_mode: SearchMode,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("PGURL").context("missing PGURL")?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 3000)?;
        let case_sensitive = parse_var("SEARCH_CASE_SENSITIVE", false)?;
        let max_connections = parse_var("DB_MAX_CONNECTIONS", 20)?;
        let acquire_timeout = Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5)?);

        Ok(Self {
            database_url,
            host,
            port,
            search_mode: SearchMode::from_case_sensitive(case_sensitive),
            max_connections,
            acquire_timeout,
        })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// `.env` is a development convenience; production reads the real environment only.
pub fn is_production() -> bool {
    std::env::var("APP_ENV").is_ok_and(|env| env.eq_ignore_ascii_case("production"))
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
