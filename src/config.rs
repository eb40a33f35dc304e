// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Result, SpmError};
use config::{Config, Environment, File, FileFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "spm-search";
const HOME_ENV_VAR: &str = "SPM_SEARCH_HOME";
const ENV_PREFIX: &str = "SPM_SEARCH";

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://swiftpackageindex.com";
pub const DEFAULT_DOCUMENT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub documents: DocumentsConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_document_base_url")]
    pub base_url: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            base_url: default_document_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the built-in User-Agent header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_document_base_url() -> String {
    DEFAULT_DOCUMENT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Loads configuration from the default location, then the environment.
pub fn new_search_config() -> Result<SearchConfig> {
    SearchConfig::load(config_file_path().as_deref())
}

/// `$SPM_SEARCH_HOME/config.toml`, else the platform config directory.
pub fn config_file_path() -> Option<PathBuf> {
    match env::var_os(HOME_ENV_VAR) {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home).join(CONFIG_FILE_NAME)),
        _ => dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)),
    }
}

impl SearchConfig {
    /// Layers built-in defaults, the optional TOML file, and `SPM_SEARCH_*`
    /// environment variables (`__` separates nested keys).
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            if path.exists() {
                debug!("Loading config from {path:?}");
            } else {
                debug!("Config file not found at {path:?}, using defaults");
            }
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SpmError::ConfigFile(format!("Failed to load configuration: {e}")))?;

        let config: SearchConfig = settings
            .try_deserialize()
            .map_err(|e| SpmError::InvalidConfig(format!("Failed to read configuration: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(SpmError::InvalidConfig(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }
        validate_base_url("catalog.base_url", &self.catalog.base_url)?;
        validate_base_url("documents.base_url", &self.documents.base_url)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SpmError::ConfigFile(format!("Failed to serialize config: {e}")))
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let url = url::Url::parse(value)
        .map_err(|e| SpmError::InvalidConfig(format!("{key} '{value}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(SpmError::InvalidConfig(format!(
            "{key} must use http or https, got '{scheme}'"
        ))),
    }
}
