use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration, sourced from `PAWTRACK_*` environment variables
/// (a `.env` file is loaded at startup before this is read).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:pawtrack.sqlite".to_string(),
            loglevel: "info".to_string(),
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("PAWTRACK_"))
            .extract()
            .expect("invalid PAWTRACK_* configuration")
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
