use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::deck::DeckSettings;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "autodeck";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Startup defaults. Durations are whole seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durations: Option<Vec<u64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_delay: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

pub const KEYS: &[&str] = &[
    "defaults.duration",
    "defaults.durations",
    "defaults.autoplay",
    "defaults.auto_hide",
    "defaults.hide_delay",
    "defaults.theme",
];

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `autodeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# autodeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.duration" => defaults.duration = Some(parse_seconds(key, value)?),
            "defaults.durations" => {
                let values = value
                    .split(',')
                    .map(|v| parse_seconds(key, v.trim()))
                    .collect::<Result<Vec<_>>>()?;
                defaults.durations = Some(values);
            }
            "defaults.autoplay" => defaults.autoplay = Some(parse_bool(key, value)?),
            "defaults.auto_hide" => defaults.auto_hide = Some(parse_bool(key, value)?),
            "defaults.hide_delay" => defaults.hide_delay = Some(parse_seconds(key, value)?),
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    /// Presenter settings from this config, falling back to built-in defaults.
    ///
    /// Zero durations from a hand-edited file are ignored with a warning.
    pub fn deck_settings(&self) -> DeckSettings {
        let mut settings = DeckSettings::default();
        let Some(defaults) = &self.defaults else {
            return settings;
        };
        if let Some(duration) = positive_seconds("defaults.duration", defaults.duration) {
            settings.duration = duration;
        }
        if let Some(list) = &defaults.durations {
            let durations: Vec<Duration> = list
                .iter()
                .filter_map(|&secs| positive_seconds("defaults.durations", Some(secs)))
                .collect();
            if !durations.is_empty() {
                settings.durations = durations;
            }
        }
        if let Some(autoplay) = defaults.autoplay {
            settings.autoplay = autoplay;
        }
        if let Some(auto_hide) = defaults.auto_hide {
            settings.auto_hide = auto_hide;
            // A pinned panel stays pinned even when autoplay starts.
            settings.autoplay_enables_auto_hide = auto_hide;
        }
        if let Some(delay) = positive_seconds("defaults.hide_delay", defaults.hide_delay) {
            settings.hide_delay = delay;
        }
        settings
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be a positive number of seconds."),
    }
}

fn positive_seconds(key: &str, secs: Option<u64>) -> Option<Duration> {
    match secs? {
        0 => {
            log::warn!("ignoring {key}: 0, must be a positive number of seconds");
            None
        }
        secs => Some(Duration::from_secs(secs)),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}
