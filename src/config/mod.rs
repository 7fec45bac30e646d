use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{JuchaError, Result};

const CONFIG_DIR_NAME: &str = ".jucha";
const CONFIG_FILE_NAME: &str = "config.yaml";

// Environment fallbacks, matching the names the original service deployed with
const ENV_KAKAO: &str = "KAKAO_REST_API_KEY";
const ENV_SEOUL: &str = "SEOUL_DATA_API_KEY";
const ENV_GYEONGGI: &str = "GYEONGGI_DATA_API_KEY";
const ENV_MOLIT: &str = "PUBLIC_DATA_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Kakao Local configuration
    #[serde(default)]
    pub kakao: ApiConfig,

    /// Seoul open-data configuration
    #[serde(default)]
    pub seoul: ApiConfig,

    /// Gyeonggi data-dream configuration
    #[serde(default)]
    pub gyeonggi: ApiConfig,

    /// National registry configuration
    #[serde(default)]
    pub molit: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| JuchaError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        let config_dir = Self::config_path()?;

        // Keys live here; keep the directory private
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                JuchaError::Config(format!("Failed to create config directory: {}", e))
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, permissions).map_err(|e| {
                    JuchaError::Config(format!("Failed to set directory permissions: {}", e))
                })?;
            }
        }

        let config_file = Self::config_file_path()?;

        if !config_file.exists() {
            let default_config = Self::default();
            let yaml = serde_yaml::to_string(&default_config)
                .map_err(|e| JuchaError::Config(format!("Failed to serialize config: {}", e)))?;

            fs::write(&config_file, yaml)
                .map_err(|e| JuchaError::Config(format!("Failed to write config file: {}", e)))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o600);
                fs::set_permissions(&config_file, permissions).map_err(|e| {
                    JuchaError::Config(format!("Failed to set file permissions: {}", e))
                })?;
            }
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| JuchaError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| JuchaError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| JuchaError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_file, yaml)
            .map_err(|e| JuchaError::Config(format!("Failed to write config file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&config_file, permissions).map_err(|e| {
                JuchaError::Config(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    /// Kakao Local API key (file value wins over environment)
    pub fn kakao_api_key(&self) -> Option<String> {
        self.kakao.key.clone().or_else(|| env::var(ENV_KAKAO).ok())
    }

    /// Seoul open-data API key
    pub fn seoul_api_key(&self) -> Option<String> {
        self.seoul.key.clone().or_else(|| env::var(ENV_SEOUL).ok())
    }

    /// Gyeonggi data-dream API key
    pub fn gyeonggi_api_key(&self) -> Option<String> {
        self.gyeonggi
            .key
            .clone()
            .or_else(|| env::var(ENV_GYEONGGI).ok())
    }

    /// National registry API key
    pub fn molit_api_key(&self) -> Option<String> {
        self.molit.key.clone().or_else(|| env::var(ENV_MOLIT).ok())
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "kakao.key" => self.kakao.key = Some(value.to_string()),
            "seoul.key" => self.seoul.key = Some(value.to_string()),
            "gyeonggi.key" => self.gyeonggi.key = Some(value.to_string()),
            "molit.key" => self.molit.key = Some(value.to_string()),
            _ => {
                return Err(JuchaError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        self.save()?;
        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "kakao.key" => self.kakao.key.clone(),
            "seoul.key" => self.seoul.key.clone(),
            "gyeonggi.key" => self.gyeonggi.key.clone(),
            "molit.key" => self.molit.key.clone(),
            _ => None,
        }
    }
}
