use std::fmt::Display;
use std::str::FromStr;

use anyhow::Context;
use tracing::info;

const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// The shared secret gating every mutating admin operation.
    pub admin_password: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: try_load("PORT", "4000")?,
            database_url: dotenv::var("DATABASE_URL").context("DATABASE_URL not set")?,
            admin_password: dotenv::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD not set")?,
            allowed_origins: dotenv::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ORIGINS.to_owned())
                .split(',')
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    dotenv::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_owned()
        })
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {key}: {e}"))
}
