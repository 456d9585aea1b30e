//! Configuration file support for Daytally.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/daytally/config.toml`.
//! API keys may also be supplied via the `WEATHER_API_KEY` and
//! `OPENROUTER_API_KEY` environment variables, which take precedence
//! over the file.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub nutrition: NutritionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Default user identity for commands that do not pass `--user`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub default_id: i64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_id: default_user_id(),
        }
    }
}

/// Weather lookup configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_lookup_timeout")]
    pub timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_weather_url(),
            api_key: None,
            timeout_seconds: default_lookup_timeout(),
        }
    }
}

/// Nutrition lookup configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default = "default_nutrition_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_nutrition_model")]
    pub model: String,

    #[serde(default = "default_lookup_timeout")]
    pub timeout_seconds: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_url: default_nutrition_url(),
            api_key: None,
            model: default_nutrition_model(),
            timeout_seconds: default_lookup_timeout(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("daytally")
}

fn default_user_id() -> i64 {
    1
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".into()
}

fn default_nutrition_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".into()
}

fn default_nutrition_model() -> String {
    "openai/gpt-5-nano".into()
}

fn default_lookup_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("daytally").join("config.toml")
    }

    /// Let environment variables override API keys from the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("WEATHER_API_KEY") {
            if !key.is_empty() {
                self.weather.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                self.nutrition.api_key = Some(key);
            }
        }
    }
}
