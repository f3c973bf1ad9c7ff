use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_address")]
    pub address: IpAddr,
    pub port: u16,
    pub database: Database,
    pub limits: Limits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub kind: DatabaseKind,
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    pub max_body_size: usize,
}

impl Config {
    /// Read and parse a TOML config file.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(source).context("failed to deserialize config")?;
        if config.database.kind == DatabaseKind::Postgres && config.database.url.is_none() {
            anyhow::bail!("database.url is required for the postgres database");
        }
        Ok(config)
    }
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_postgres_config() {
        let config = Config::parse(
            r#"
            port = 8080

            [database]
            kind = "postgres"
            url = "postgres://localhost/pastes"

            [limits]
            max_body_size = 4096
            "#,
        )
        .unwrap();

        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.kind, DatabaseKind::Postgres);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.limits.max_body_size, 4096);
    }

    #[test]
    fn memory_database_needs_no_url() {
        let config = Config::parse(
            r#"
            address = "0.0.0.0"
            port = 3000

            [database]
            kind = "memory"

            [limits]
            max_body_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.database.kind, DatabaseKind::Memory);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        let result = Config::parse(
            r#"
            port = 8080

            [database]
            kind = "postgres"

            [limits]
            max_body_size = 1024
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_database_kind_is_rejected() {
        let result = Config::parse(
            r#"
            port = 8080

            [database]
            kind = "sqlite"

            [limits]
            max_body_size = 1024
            "#,
        );

        assert!(result.is_err());
    }
}
