//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. Legacy migration-script variables (`STRAPI_URL`, `STRAPI_TOKEN`,
//!    `CONTENT_FILE`, `MEDIA_DIR`)
//! 3. Project-level `folio.toml`
//! 4. User-level `~/.config/folio/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_REMOTE__TOKEN` -> `remote.token`,
//! `FOLIO_SOURCE__MEDIA_DIR` -> `source.media_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv().expect("config");
//! if config.remote.is_configured() {
//!     println!("backend: {}", config.remote.base_url);
//! }
//! ```

mod error;
mod remote;
mod run;
mod source;

pub use error::ConfigError;
pub use remote::RemoteConfig;
pub use run::RunConfig;
pub use source::SourceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the project-local config.
pub const LOCAL_CONFIG_FILE: &str = "folio.toml";

/// Legacy variable names and the config keys they feed.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("STRAPI_URL", "remote.base_url"),
    ("STRAPI_TOKEN", "remote.token"),
    ("CONTENT_FILE", "source.content_file"),
    ("MEDIA_DIR", "source.media_dir"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a provider fails or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy script variables
        figment = figment.merge(Self::legacy_env());

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// Map the unprefixed variable names older setups used onto config keys.
    fn legacy_env() -> Env {
        let names: Vec<&'static str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| key.as_str().to_owned().into(), |(_, target)| (*target).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }
}
