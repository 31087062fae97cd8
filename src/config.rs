use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, macros::datetime, Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND {:?} (expected redis or memory)", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub redis_url: String,
    pub store_backend: StoreBackend,
    pub food_catalog_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend = std::env::var("STORE_BACKEND")
            .map(|v| v.parse::<StoreBackend>())
            .unwrap_or(Ok(StoreBackend::Redis))?;
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };
        Ok(Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://redis:6379/0".into()),
            store_backend,
            food_catalog_path: std::env::var("FOOD_CATALOG_PATH")
                .unwrap_or_else(|_| "foundation_foods.json".into())
                .into(),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
        })
    }
}

/// Settings shared by the ephemeris tools.
#[derive(Debug, Clone)]
pub struct AstroConfig {
    pub ephemeris_path: PathBuf,
    pub moon_data_path: PathBuf,
    pub moon_start: OffsetDateTime,
    pub moon_end: OffsetDateTime,
    pub moon_step: Duration,
}

impl AstroConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let moon_start = env_datetime("MOON_START")?.unwrap_or(datetime!(2025-01-01 0:00 UTC));
        let moon_end = env_datetime("MOON_END")?.unwrap_or(datetime!(2026-01-01 0:00 UTC));
        anyhow::ensure!(moon_start < moon_end, "MOON_START must be before MOON_END");

        let step_minutes = std::env::var("MOON_STEP_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(60);

        Ok(Self {
            ephemeris_path: std::env::var("EPHEMERIS_PATH")
                .unwrap_or_else(|_| "de421.bsp".into())
                .into(),
            moon_data_path: std::env::var("MOON_DATA_PATH")
                .unwrap_or_else(|_| "moon_data.json".into())
                .into(),
            moon_start,
            moon_end,
            moon_step: Duration::minutes(step_minutes),
        })
    }
}

fn env_datetime(name: &str) -> anyhow::Result<Option<OffsetDateTime>> {
    match std::env::var(name) {
        Ok(v) => OffsetDateTime::parse(&v, &Rfc3339)
            .map(Some)
            .with_context(|| format!("{} must be an RFC 3339 timestamp", name)),
        Err(_) => Ok(None),
    }
}
