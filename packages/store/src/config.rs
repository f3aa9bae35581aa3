//! # Client configuration — `medsync.toml`
//!
//! Defines where the portal finds its backend and how it names the keys it
//! keeps in browser storage.
//!
//! ## Structure
//!
//! ```toml
//! [backend]
//! base_url = "https://medsync-backend-yk9h.onrender.com"
//!
//! [storage]
//! key_prefix = "med_"
//! ```
//!
//! The backend origin is compiled in. Setting `MEDSYNC_BACKEND_URL` at build
//! time replaces the default; native builds also read a `medsync.toml`
//! through [`ClientConfig::load`]. A missing or empty file is equivalent
//! to the default configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_URL: &str = "https://medsync-backend-yk9h.onrender.com";

/// Top-level configuration stored in `medsync.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin every endpoint is resolved against, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    option_env!("MEDSYNC_BACKEND_URL")
        .unwrap_or(DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Browser storage naming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "med_".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            storage: StorageConfig::default(),
        }
    }

    /// Builder method to change the storage key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage.key_prefix = prefix.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "medsync.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read `medsync.toml` from `dir`.
    ///
    /// A missing file gives the default configuration. So does an invalid
    /// one, after a warning.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(dir: &std::path::Path) -> Self {
        let path = dir.join(Self::filename());
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        Self::from_toml(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            Self::default()
        })
    }
}
