use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::filter::{DEFAULT_PAGE_LIMIT, FilterSelection, FilterValue, Page};
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const CONFIG_FILE_NAME: &str = "config.json";
const API_URL_VAR: &str = "TICKETDESK_API_URL";
const PAGE_LIMIT_VAR: &str = "TICKETDESK_PAGE_LIMIT";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page: Page,
    pub default_filters: FilterSelection,
}

/// Values persisted by `config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_priority: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_base_url: Option<String>,
    pub page_limit: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var(API_URL_VAR).ok(),
            page_limit: env::var(PAGE_LIMIT_VAR).ok(),
        }
    }
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(&stored, &EnvOverrides::from_env())
    }

    /// Environment wins over the stored file, which wins over defaults.
    pub fn resolve(stored: &StoredConfig, env: &EnvOverrides) -> AppResult<Self> {
        let api_base_url = non_empty(env.api_base_url.as_deref())
            .or_else(|| non_empty(stored.api_base_url.as_deref()))
            .unwrap_or(DEFAULT_API_URL)
            .to_string();
        Url::parse(&api_base_url).map_err(|err| {
            AppError::Configuration(format!("invalid API base URL '{api_base_url}': {err}"))
        })?;

        let limit = match non_empty(env.page_limit.as_deref())
            .or_else(|| non_empty(stored.page_limit.as_deref()))
        {
            Some(raw) => parse_limit(raw)?,
            None => DEFAULT_PAGE_LIMIT,
        };

        Ok(Self {
            api_base_url,
            page: Page { skip: 0, limit },
            default_filters: FilterSelection {
                status: FilterValue::parse(stored.default_status.as_deref()),
                priority: FilterValue::parse(stored.default_priority.as_deref()),
                category: FilterValue::All,
            },
        })
    }
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    ProjectDirs::from("dev", "ticketdesk", "ticketdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AppError::Configuration("cannot determine config directory".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

pub fn parse_limit(raw: &str) -> AppResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(AppError::Configuration(format!(
            "page limit must be a positive integer, got '{raw}'"
        ))),
        Ok(limit) => Ok(limit),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
