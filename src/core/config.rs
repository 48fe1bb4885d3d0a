use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable holding the exchange rate service access key.
pub const ACCESS_KEY_ENV: &str = "EXCHANGE_RATE_API_KEY";

pub const DEFAULT_EXCHANGERATE_BASE_URL: &str = "https://api.exchangerate.host";

#[derive(Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub access_key: Option<String>,
}

impl std::fmt::Debug for ExchangeRateProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateProviderConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchangerate: Option<ExchangeRateProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchangerate: Some(ExchangeRateProviderConfig {
                base_url: DEFAULT_EXCHANGERATE_BASE_URL.to_string(),
                access_key: None,
            }),
        }
    }
}

/// Default purchase details used when the command line leaves them out.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FundConfig {
    pub name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
    pub current_price: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub fund: FundConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fundvs", "fundvs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn exchangerate_base_url(&self) -> &str {
        self.providers
            .exchangerate
            .as_ref()
            .map_or(DEFAULT_EXCHANGERATE_BASE_URL, |p| &p.base_url)
    }

    /// Resolves the access key from the config file, then the environment.
    pub fn access_key(&self) -> Option<String> {
        self.access_key_or(std::env::var(ACCESS_KEY_ENV).ok())
    }

    fn access_key_or(&self, env_value: Option<String>) -> Option<String> {
        self.providers
            .exchangerate
            .as_ref()
            .and_then(|p| p.access_key.clone())
            .or(env_value)
            .filter(|key| !key.trim().is_empty())
    }
}
