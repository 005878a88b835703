// Configuration management
use crate::error::{JekinError, Result};
use crate::pdb::DEFAULT_BRIEFING_HOUR;
use crate::status::{CheckInPolicy, DEFAULT_DOMESTIC_LABEL, DEFAULT_INTERNATIONAL_LABEL};
use crate::window::LeadTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ZONE: &str = "Pacific/Efate";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub zone: ZoneConfig,
    #[serde(default)]
    pub checkin: CheckInConfig,
    #[serde(default)]
    pub pdb: PdbConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// IANA name of the zone server timestamps are written in
    #[serde(default = "default_zone")]
    pub name: String,
}

fn default_zone() -> String {
    DEFAULT_ZONE.to_string()
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            name: default_zone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInConfig {
    #[serde(default = "default_international_lead_hours")]
    pub international_lead_hours: f64,
    #[serde(default = "default_domestic_lead_hours")]
    pub domestic_lead_hours: f64,
    #[serde(default = "default_international_label")]
    pub international_label: String,
    #[serde(default = "default_domestic_label")]
    pub domestic_label: String,
}

fn default_international_lead_hours() -> f64 {
    2.5
}

fn default_domestic_lead_hours() -> f64 {
    1.0
}

fn default_international_label() -> String {
    DEFAULT_INTERNATIONAL_LABEL.to_string()
}

fn default_domestic_label() -> String {
    DEFAULT_DOMESTIC_LABEL.to_string()
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            international_lead_hours: default_international_lead_hours(),
            domestic_lead_hours: default_domestic_lead_hours(),
            international_label: default_international_label(),
            domestic_label: default_domestic_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdbConfig {
    #[serde(default = "default_briefing_hour")]
    pub briefing_hour: u32,
}

fn default_briefing_hour() -> u32 {
    DEFAULT_BRIEFING_HOUR
}

impl Default for PdbConfig {
    fn default() -> Self {
        Self {
            briefing_hour: default_briefing_hour(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between automatic re-evaluations
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval_secs() -> u64 {
    60
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Get the config directory path
    ///
    /// Priority:
    /// 1. XDG_CONFIG_HOME/jekin (if env var is set)
    /// 2. ~/.config/jekin (if ~/.config exists)
    /// 3. ~/.jekin (fallback on Unix, doesn't create ~/.config)
    /// 4. Platform default on Windows
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join("jekin"));
        }

        #[cfg(unix)]
        {
            if let Some(home_dir) = dirs::home_dir() {
                let xdg_config = home_dir.join(".config");

                if xdg_config.exists() {
                    return Ok(xdg_config.join("jekin"));
                }

                return Ok(home_dir.join(".jekin"));
            }
        }

        #[cfg(not(unix))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                return Ok(config_dir.join("jekin"));
            }
        }

        Err(JekinError::ConfigError(
            "Could not determine config directory".to_string(),
        ))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, environment variables, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_file_path()?)?;
        config.apply_env();
        Ok(config)
    }

    /// Load a specific file, falling back to defaults if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        tracing::debug!("Loading config from: {}", path.display());
        let contents = fs::read_to_string(path)
            .map_err(|e| JekinError::ConfigError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| JekinError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    fn apply_env(&mut self) {
        if let Ok(zone) = std::env::var("JEKIN_TIMEZONE") {
            tracing::debug!("Using JEKIN_TIMEZONE from environment: {}", zone);
            self.zone.name = zone;
        }

        if let Ok(url) = std::env::var("JEKIN_ITINERARY_URL") {
            tracing::debug!("Using JEKIN_ITINERARY_URL from environment: {}", url);
            self.source.url = Some(url);
        }

        if let Ok(token) = std::env::var("JEKIN_API_TOKEN") {
            tracing::debug!("Using JEKIN_API_TOKEN from environment");
            self.source.token = Some(token);
        }
    }

    /// Create a sample config file with comments
    pub fn create_sample() -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        Self::write_sample(&config_path)?;
        Ok(config_path)
    }

    fn write_sample(config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).map_err(|e| {
                    JekinError::ConfigError(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        // Don't overwrite existing config
        if config_path.exists() {
            return Err(JekinError::ConfigError(format!(
                "Config file already exists at: {}",
                config_path.display()
            )));
        }

        fs::write(config_path, SAMPLE_CONFIG)
            .map_err(|e| JekinError::ConfigError(format!("Failed to write sample config: {}", e)))?;

        Ok(())
    }

    pub fn zone(&self) -> Result<Tz> {
        self.zone
            .name
            .trim()
            .parse::<Tz>()
            .map_err(|_| JekinError::UnknownTimeZone(self.zone.name.clone()))
    }

    /// Validate the check-in settings and build the evaluation policy
    pub fn policy(&self) -> Result<CheckInPolicy> {
        Ok(CheckInPolicy {
            zone: self.zone()?,
            international_lead: LeadTime::from_hours(self.checkin.international_lead_hours)?,
            domestic_lead: LeadTime::from_hours(self.checkin.domestic_lead_hours)?,
            international_label: self.checkin.international_label.clone(),
            domestic_label: self.checkin.domestic_label.clone(),
        })
    }

    pub fn briefing_hour(&self) -> Result<u32> {
        if self.pdb.briefing_hour > 23 {
            return Err(JekinError::ConfigError(format!(
                "pdb.briefing_hour must be 0-23, got {}",
                self.pdb.briefing_hour
            )));
        }
        Ok(self.pdb.briefing_hour)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.watch.refresh_interval_secs.max(1))
    }

    /// Itinerary URL, ignoring blank entries left over from the sample file
    pub fn source_url(&self) -> Option<&str> {
        self.source.url.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn source_token(&self) -> Option<&str> {
        self.source.token.as_deref().filter(|s| !s.trim().is_empty())
    }
}

const SAMPLE_CONFIG: &str = r#"# jekin configuration
# Location priority:
#   1. $XDG_CONFIG_HOME/jekin/config.toml (if XDG_CONFIG_HOME is set)
#   2. ~/.config/jekin/config.toml (if ~/.config exists)
#   3. ~/.jekin/config.toml (fallback)
#
# Environment overrides:
#   JEKIN_TIMEZONE
#   JEKIN_ITINERARY_URL
#   JEKIN_API_TOKEN

[zone]
# Time zone server timestamps are written in (IANA name)
name = "Pacific/Efate"

[checkin]
# Hours before departure that phone check-in opens (minimum 1)
international_lead_hours = 2.5
domestic_lead_hours = 1.0
international_label = "JEK IN"
domestic_label = "DOMESTIK JEK IN"

[pdb]
# Hour of day a pre-departure briefing starts
briefing_hour = 8

[watch]
# Seconds between automatic refreshes
refresh_interval_secs = 60

[source]
# Itinerary endpoint returning { "flights": [...], "pdb": {...} }
# Example: url = "https://api.example.org/worker/itinerary"
url = ""

# Optional bearer token for the endpoint
token = ""
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_build_default_policy() {
        let config = Config::default();
        let policy = config.policy().unwrap();
        assert_eq!(policy.zone, chrono_tz::Pacific::Efate);
        assert_eq!(policy.international_lead, LeadTime::INTERNATIONAL_DEFAULT);
        assert_eq!(policy.domestic_lead, LeadTime::DOMESTIC_DEFAULT);
        assert_eq!(policy.international_label, "JEK IN");
        assert_eq!(config.briefing_hour().unwrap(), 8);
        assert_eq!(config.refresh_interval().as_secs(), 60);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.zone.name, DEFAULT_ZONE);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[checkin]\ninternational_lead_hours = 3.0\n\n[watch]\nrefresh_interval_secs = 30\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.checkin.international_lead_hours, 3.0);
        assert_eq!(config.checkin.domestic_lead_hours, 1.0);
        assert_eq!(config.watch.refresh_interval_secs, 30);
        assert_eq!(config.zone.name, DEFAULT_ZONE);
    }

    #[test]
    fn test_sample_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jekin").join("config.toml");
        Config::write_sample(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.policy().is_ok());
        assert!(config.source_url().is_none());
        assert!(config.source_token().is_none());

        // Second write must not clobber the first
        assert!(Config::write_sample(&path).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = Config::default();
        config.zone.name = "Mars/Olympus_Mons".to_string();
        assert!(matches!(config.policy(), Err(JekinError::UnknownTimeZone(_))));

        let mut config = Config::default();
        config.checkin.domestic_lead_hours = 0.5;
        assert!(matches!(config.policy(), Err(JekinError::InvalidLeadTime(_))));

        let mut config = Config::default();
        config.checkin.international_lead_hours = 1e10;
        assert!(matches!(config.policy(), Err(JekinError::InvalidLeadTime(_))));

        let mut config = Config::default();
        config.pdb.briefing_hour = 25;
        assert!(config.briefing_hour().is_err());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[checkin\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(JekinError::ConfigError(_))
        ));
    }
}
