//! Application configuration.
//!
//! Stored as pretty-printed JSON in `config.json` inside the
//! [`DataStorage`] directory. A missing file means defaults. Values from the
//! environment (including a `.env` file) take precedence over the file:
//!
//! | Variable | Overrides |
//! |---|---|
//! | `ECOTECH_DB_PATH` | `database.path` |
//! | `ECOTECH_DB_FALLBACK` | `database.fallback_path` |
//! | `ECOTECH_INDICATOR_URL` | `indicators.base_url` |
//!
//! Overrides are applied on [`Config::read`] only; [`Config::save`] writes
//! whatever the struct holds.

use super::data_storage::DataStorage;
use crate::api::mindicador::IndicatorApiConfig;
use crate::db::db::DatabaseConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_DB_PATH: &str = "ECOTECH_DB_PATH";
pub const ENV_DB_FALLBACK: &str = "ECOTECH_DB_FALLBACK";
pub const ENV_INDICATOR_URL: &str = "ECOTECH_INDICATOR_URL";

/// A section offered by the configuration wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub indicators: IndicatorApiConfig,
}

impl Config {
    /// The stored configuration with environment overrides applied.
    pub fn read() -> Result<Config> {
        let mut config = Self::read_stored()?;
        config.apply_env();
        Ok(config)
    }

    /// The configuration as saved on disk, or the defaults when there is no file.
    pub fn read_stored() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(config_file_path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Replaces values with the ones set in the environment.
    pub fn apply_env(&mut self) {
        if let Some(path) = non_empty_var(ENV_DB_PATH) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(path) = non_empty_var(ENV_DB_FALLBACK) {
            self.database.fallback_path = Some(PathBuf::from(path));
        }
        if let Some(url) = non_empty_var(ENV_INDICATOR_URL) {
            self.indicators.base_url = url;
        }
    }

    /// Interactive wizard over the existing (or default) configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read_stored()?;

        let modules = [
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            IndicatorApiConfig::module(),
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(config.database.path.display().to_string())
                        .interact_text()?;
                    let fallback: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabaseFallback.to_string())
                        .default(
                            config
                                .database
                                .fallback_path
                                .as_ref()
                                .map(|p| p.display().to_string())
                                .unwrap_or_default(),
                        )
                        .allow_empty(true)
                        .interact_text()?;

                    config.database.path = PathBuf::from(path.trim());
                    config.database.fallback_path = Some(fallback.trim()).filter(|f| !f.is_empty()).map(PathBuf::from);
                }
                "indicators" => config.indicators = IndicatorApiConfig::init(&config.indicators)?,
                _ => {}
            }
        }

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
