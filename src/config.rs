use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_VERSION: u64 = 1;

pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("daybook")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct DaybookConfig {
    pub api_base_url: String,
    pub data_directory: PathBuf,
    pub debug_logging: bool,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_directory: default_data_dir(),
            debug_logging: false,
        }
    }
}

impl DaybookConfig {
    /// Directory holding the key-value storage files (session record etc).
    pub fn storage_dir(&self) -> PathBuf {
        self.data_directory.join("storage")
    }

    pub fn todos_url(&self) -> String {
        format!("{}/todos", self.api_base_url.trim_end_matches('/'))
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.api_base_url.trim_end_matches('/'))
    }

    /// Ensure the data directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.storage_dir())
    }
}
