use crate::error::{Result, RolodexError};
use crate::model::FieldRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_AUTO_SAVE_LABEL: &str = "auto_save";
const DEFAULT_BIRTHDAY_WINDOW_DAYS: i64 = 7;
const DEFAULT_GREETING: &str = "Happy birthday, {name}!";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration for rolodex, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Label used for the automatic save between sessions
    #[serde(default = "default_auto_save_label")]
    pub auto_save_label: String,

    #[serde(default = "default_true")]
    pub check_phone: bool,

    #[serde(default = "default_true")]
    pub check_email: bool,

    /// How many days ahead `congratulate` looks when no number is given
    #[serde(default = "default_birthday_window_days")]
    pub birthday_window_days: i64,

    /// Greeting template; `{name}` and `{days}` are substituted
    #[serde(default = "default_greeting")]
    pub greeting: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_auto_save_label() -> String {
    DEFAULT_AUTO_SAVE_LABEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_birthday_window_days() -> i64 {
    DEFAULT_BIRTHDAY_WINDOW_DAYS
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            auto_save_label: default_auto_save_label(),
            check_phone: true,
            check_email: true,
            birthday_window_days: DEFAULT_BIRTHDAY_WINDOW_DAYS,
            greeting: default_greeting(),
            log_level: default_log_level(),
        }
    }
}

impl RolodexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RolodexConfig = serde_json::from_str(&content).map_err(|e| {
            RolodexError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Like [`RolodexConfig::load`], but writes the defaults out on first run
    /// so there is a file to edit.
    pub fn load_or_init<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(config_dir);
        }
        let config = Self::default();
        config.save(config_dir)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn field_rules(&self) -> FieldRules {
        FieldRules {
            check_phone: self.check_phone,
            check_email: self.check_email,
        }
    }

    pub fn greeting_for(&self, name: &str, days: i64) -> String {
        self.greeting
            .replace("{name}", name)
            .replace("{days}", &days.to_string())
    }
}
