//! Configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. Sources are merged in the following order (later sources
//! override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `LARDER_`
//! 3. **DATABASE_URL** - special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment
//! variables, e.g. `LARDER_POOL__MAX_CONNECTIONS=8`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Connection pool settings
    pub pool: PoolSettings,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://data/larder.db`
    pub url: String,
}

/// Connection pool settings controlling SQLx pool behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Seconds to wait for a connection before giving up
    pub acquire_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            pool: PoolSettings::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/larder.db".to_string(),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file merged with `LARDER_` environment
    /// variables. `DATABASE_URL` takes precedence over everything for the
    /// database URL.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("LARDER_").split("__"));

        if let Ok(url) = std::env::var("DATABASE_URL") {
            figment = figment.merge(Serialized::default("database.url", url));
        }

        figment.extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load("missing.yaml").expect("defaults should load");
            assert_eq!(config.database.url, "sqlite://data/larder.db");
            assert_eq!(config.pool.max_connections, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                database:
                  url: sqlite://from-yaml.db
                pool:
                  max_connections: 2
                "#,
            )?;
            jail.set_env("LARDER_POOL__MAX_CONNECTIONS", "9");

            let config = Config::load("config.yaml").expect("config should load");
            assert_eq!(config.database.url, "sqlite://from-yaml.db");
            assert_eq!(config.pool.max_connections, 9);
            Ok(())
        });
    }

    #[test]
    fn test_database_url_wins() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "database:\n  url: sqlite://from-yaml.db\n")?;
            jail.set_env("DATABASE_URL", "sqlite://from-env.db");

            let config = Config::load("config.yaml").expect("config should load");
            assert_eq!(config.database.url, "sqlite://from-env.db");
            Ok(())
        });
    }
}
