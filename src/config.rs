//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//! - built-in defaults (`Config::default()`)
//! - `config.toml` in the working directory
//! - `CADASTRO_*` env vars, nested with `__` (e.g. `CADASTRO_BASIC__LISTEN_ADDR`)
//! - plain `DATABASE_URL` / `LOGLEVEL`

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Absolute base used for hypermedia links. Falls back to the `Host` header.
    pub public_url: Option<Url>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:cadastro.db".to_string(),
            loglevel: "info".to_string(),
            public_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("CADASTRO_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "LOGLEVEL"])
                    .map(|key| format!("basic.{}", key.as_str().to_ascii_lowercase()).into()),
            )
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_file_and_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [basic]
                listen_addr = "127.0.0.1:9000"

                [pagination]
                default_size = 5
                "#,
            )?;
            jail.set_env("CADASTRO_PAGINATION__MAX_SIZE", "50");
            jail.set_env("DATABASE_URL", "sqlite::memory:");

            let cfg = Config::load()?;
            assert_eq!(cfg.basic.listen_addr, "127.0.0.1:9000");
            assert_eq!(cfg.basic.database_url, "sqlite::memory:");
            assert_eq!(cfg.pagination.default_size, 5);
            assert_eq!(cfg.pagination.max_size, 50);
            assert!(cfg.basic.public_url.is_none());
            Ok(())
        });
    }
}
