mod basic;

pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "PERSONS_";

impl Config {
    /// Builds a Figment that merges defaults, an optional TOML file and `PERSONS_*` env vars.
    ///
    /// Nested keys use `__` in env names, e.g. `PERSONS_BASIC__LISTEN_PORT=9000`.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        let path = path.as_ref();
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.is_file() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from `config.toml` (if present) and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(DEFAULT_CONFIG_FILE).extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::time::Duration;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment("missing.toml").extract()?;
            assert_eq!(cfg.basic.listen_port, 8080);
            assert_eq!(cfg.basic.database_url, "sqlite://persons.db");
            assert_eq!(cfg.basic.query_timeout(), Duration::from_secs(5));
            Ok(())
        });
    }

    #[test]
    fn toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "persons.toml",
                r#"
                [basic]
                listen_port = 9000
                database_url = "sqlite://from-file.db"
                "#,
            )?;
            jail.set_env("PERSONS_BASIC__LISTEN_PORT", "9100");

            let cfg: Config = Config::figment("persons.toml").extract()?;
            assert_eq!(cfg.basic.listen_port, 9100);
            assert_eq!(cfg.basic.database_url, "sqlite://from-file.db");
            assert_eq!(cfg.basic.loglevel, "info");
            Ok(())
        });
    }
}
