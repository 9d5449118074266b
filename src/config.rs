use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    #[default]
    Graphql,
    Rest,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub github_token: Option<String>,
    #[serde(default)]
    pub api: ApiFlavor,
    pub store_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("api", &self.api)
            .field("store_path", &self.store_path)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api: ApiFlavor::Graphql,
            store_path: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(api_override: Option<ApiFlavor>) -> Self {
        let config_file = config_dir().join("branchscope").join("config.toml");
        Self::load_from(&config_file, api_override)
    }

    fn load_from(config_file: &Path, api_override: Option<ApiFlavor>) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(config_file));
        }

        figment = figment.merge(Env::prefixed("BRANCHSCOPE_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        if let Some(api) = api_override {
            figment = figment.merge(Serialized::default("api", api));
        }

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                Config::default()
            }
        }
    }

    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| config_dir().join("branchscope").join("store.toml"))
    }

    pub fn resolved_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join("branchscope").join("branchscope.log"))
    }
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
