// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Features, Keys, Paths};
use crate::consts::DEFAULT_DB_PATH;

pub const DEFAULT_CONFIG_FILE: &str = "kvv-config.toml";

pub const ENV_CONFIG: &str = "KVV_CONFIG";
pub const ENV_DB: &str = "KVV_DB";
pub const ENV_KEY_FILE: &str = "KVV_KEY_FILE";
pub const ENV_PASSPHRASE: &str = "KVV_PASSPHRASE";

pub fn default_paths() -> Paths {
    Paths {
        database: PathBuf::from(DEFAULT_DB_PATH),
        key_file: None,
    }
}

pub fn default_keys() -> Keys {
    Keys::default()
}

pub fn default_features() -> Features {
    Features {
        skip_kdf_slowdown: false,
    }
}
