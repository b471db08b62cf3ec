use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::history::store::MAX_VERSIONS;

/// Where version histories are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Redis,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "redis" => Ok(StorageBackend::Redis),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("Unknown STORAGE_BACKEND '{other}' (expected memory, redis or postgres)"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub max_versions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend: StorageBackend = std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse()?;

        let config = Config {
            storage_backend,
            database_url: std::env::var("DATABASE_URL").ok(),
            redis_url: std::env::var("REDIS_URL").ok(),
            max_versions: std::env::var("MAX_VERSIONS")
                .unwrap_or_else(|_| MAX_VERSIONS.to_string())
                .parse::<usize>()
                .context("MAX_VERSIONS must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_versions == 0 {
            bail!("MAX_VERSIONS must be at least 1");
        }
        match self.storage_backend {
            StorageBackend::Redis if self.redis_url.is_none() => {
                bail!("Required environment variable 'REDIS_URL' is not set (STORAGE_BACKEND=redis)")
            }
            StorageBackend::Postgres if self.database_url.is_none() => {
                bail!("Required environment variable 'DATABASE_URL' is not set (STORAGE_BACKEND=postgres)")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: StorageBackend) -> Config {
        Config {
            storage_backend: backend,
            database_url: None,
            redis_url: None,
            max_versions: MAX_VERSIONS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!(" Redis ".parse::<StorageBackend>().unwrap(), StorageBackend::Redis);
        assert_eq!("postgresql".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_memory_needs_no_urls() {
        assert!(config(StorageBackend::Memory).validate().is_ok());
    }

    #[test]
    fn test_redis_requires_url() {
        let mut c = config(StorageBackend::Redis);
        assert!(c.validate().is_err());
        c.redis_url = Some("redis://localhost:6379".to_string());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut c = config(StorageBackend::Postgres);
        assert!(c.validate().is_err());
        c.database_url = Some("postgres://localhost/cv".to_string());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_max_versions_rejected() {
        let mut c = config(StorageBackend::Memory);
        c.max_versions = 0;
        assert!(c.validate().is_err());
    }
}
