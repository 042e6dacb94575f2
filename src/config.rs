use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::picker::{WeekStart, DATE_FORMAT};

const CONFIG_PATH_ENV_VAR: &str = "DATEPICK_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("datepick").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".datepick.toml"));
    }

    locations
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub today_char: Option<char>,
    pub focus_char: Option<char>,
    pub selected_char: Option<char>,
    pub range_char: Option<char>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            today_char: Some('*'),
            focus_char: None,
            selected_char: None,
            range_char: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub week_start: WeekStart,
    pub date_format: String,
    pub separator: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate_ms: 500,
            week_start: WeekStart::default(),
            date_format: DATE_FORMAT.to_owned(),
            separator: " ".to_owned(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        check_date_format(&config.date_format)?;

        if config.tick_rate_ms == 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "tick_rate_ms must be greater than zero",
            ));
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|err| {
            let msg = format!(
                "{}: {}",
                path.display(),
                err.message.as_deref().unwrap_or_default()
            );
            err.with_msg(&msg)
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Loads `path` if given, otherwise the first existing file of the default
/// locations, otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Using config file '{}'", location.display());
            Config::load(&location)
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn check_date_format(format: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        Err(Error::new(
            ErrorKind::ConfigParse,
            &format!("invalid date format '{}'", format),
        ))
    } else {
        Ok(())
    }
}
