// src/config/app.rs
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::consts::{FAST_KDF_ITERATIONS, PASSPHRASE_KDF_ITERATIONS};
use crate::crypto::{FieldCipher, KeyProvider, PassphraseKey, UserKeyFile};
use crate::db::EntryStore;
use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub database: PathBuf,
    /// Overrides the per-user default location of the user key file
    pub key_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Keys {
    #[serde(default)]
    pub source: KeySource,
}

/// Where field key material comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    #[default]
    User,
    /// Passphrase read from `KVV_PASSPHRASE`; never from the config file
    Passphrase,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Features {
    pub skip_kdf_slowdown: bool,
}

impl Default for Paths {
    fn default() -> Self {
        default_paths()
    }
}

impl Default for Features {
    fn default() -> Self {
        default_features()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            keys: default_keys(),
            features: default_features(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Environment wins over the file: `KVV_DB`, `KVV_KEY_FILE`, `KVV_PASSPHRASE`
    pub fn apply_env(&mut self) {
        if let Ok(db) = env::var(ENV_DB) {
            self.paths.database = PathBuf::from(db);
        }
        if let Ok(key_file) = env::var(ENV_KEY_FILE) {
            self.paths.key_file = Some(PathBuf::from(key_file));
        }
        if env::var_os(ENV_PASSPHRASE).is_some() {
            self.keys.source = KeySource::Passphrase;
        }
    }

    pub fn kdf_iterations(&self) -> u32 {
        if self.features.skip_kdf_slowdown {
            FAST_KDF_ITERATIONS
        } else {
            PASSPHRASE_KDF_ITERATIONS
        }
    }

    pub fn key_provider(&self) -> Result<Box<dyn KeyProvider>> {
        match self.keys.source {
            KeySource::User => {
                let provider = match &self.paths.key_file {
                    Some(path) => UserKeyFile::new(path),
                    None => UserKeyFile::default_location()?,
                };
                debug!(path = %provider.path().display(), "using user key file");
                Ok(Box::new(provider))
            }
            KeySource::Passphrase => {
                let passphrase = env::var(ENV_PASSPHRASE).map_err(|_| {
                    CoreError::Config(format!(
                        "key source is passphrase but {ENV_PASSPHRASE} is not set"
                    ))
                })?;
                Ok(Box::new(PassphraseKey::with_iterations(
                    passphrase,
                    self.kdf_iterations(),
                )))
            }
        }
    }

    /// Build the cipher from the configured provider and open the store
    pub fn open_store(&self) -> Result<EntryStore> {
        let provider = self.key_provider()?;
        let cipher = FieldCipher::new(provider.as_ref())?;
        EntryStore::open(&self.paths.database, cipher)
    }
}

/// Load from `KVV_CONFIG` (default `kvv-config.toml`), then apply env overrides
///
/// A missing file is not an error; built-in defaults are used instead.
pub fn load() -> Result<Config> {
    let config_path = env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        Config::from_file(&config_path)?
    } else {
        warn!(path = %config_path, "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_env();
    Ok(conf)
}
