//! Layered runtime configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `config.toml` (or the file passed with `--config`)
//! 3. Environment variables prefixed with `REGISTRY_`, sections split by `__`
//!    (e.g. `REGISTRY_STORAGE__PATIENTS_URL`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "REGISTRY_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

/// Connection targets for the two storage roles. Pointing both at the same
/// URL makes them share one pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub credentials_url: String,
    pub patients_url: String,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_url: "sqlite:login.sqlite".to_string(),
            patients_url: "sqlite:patients.sqlite".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub templates_dir: PathBuf,
    pub style_dir: PathBuf,
    pub img_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            style_dir: PathBuf::from("style"),
            img_dir: PathBuf::from("img"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// PBKDF2 rounds used when seeding new password hashes. Existing hashes
    /// carry their own round count.
    pub pbkdf2_iterations: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: crate::service::password::PBKDF2_ITERATIONS,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load_from(Path::new("missing.toml"))?;
            assert_eq!(cfg.basic.listen_addr, "0.0.0.0:8080");
            assert_eq!(cfg.storage.max_connections, 5);
            assert_eq!(cfg.assets.templates_dir, PathBuf::from("templates"));
            Ok(())
        });
    }

    #[test]
    fn toml_and_env_layers_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "registry.toml",
                r#"
                [storage]
                credentials_url = "sqlite:creds.sqlite"
                patients_url = "sqlite:creds.sqlite"
                max_connections = 2
                "#,
            )?;
            jail.set_env("REGISTRY_BASIC__LOGLEVEL", "debug");
            jail.set_env("REGISTRY_STORAGE__MAX_CONNECTIONS", "9");

            let cfg = Config::load_from(Path::new("registry.toml"))?;
            assert_eq!(cfg.basic.loglevel, "debug");
            assert_eq!(cfg.storage.credentials_url, "sqlite:creds.sqlite");
            assert_eq!(cfg.storage.patients_url, "sqlite:creds.sqlite");
            assert_eq!(cfg.storage.max_connections, 9);
            Ok(())
        });
    }
}
