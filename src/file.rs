//! Human-edited TOML form of the configuration.
//!
//! ```toml
//! [display]
//! night_start = "22:00"
//! night_brightness = 16
//! day_start = "07:00"
//! day_brightness = 255
//!
//! [wifi]
//! ssid = "home"
//! key = "secret"
//!
//! [ntp]
//! server = "pool.ntp.org"
//! interval = 3600
//! ```
//!
//! Missing sections and keys fall back to the factory defaults.

use std::{fs, path::Path};

use chrono::{NaiveTime, Timelike};
use tracing::{debug, warn};

use crate::{
    error::{ConfigError, Result},
    record::{ConfigurationRecord, Field, MINUTES_PER_DAY},
    text::BoundedText,
};

/// What the loader does with text that does not fit a device field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TextPolicy {
    #[default]
    Reject,
    Truncate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub display: Display,
    pub wifi: Wifi,
    pub ntp: Ntp,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Display {
    pub night_start: StartTime,
    pub night_brightness: u8,
    pub day_start: StartTime,
    pub day_brightness: u8,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            night_start: StartTime::from_minutes(22 * 60),
            night_brightness: 16,
            day_start: StartTime::from_minutes(7 * 60),
            day_brightness: 255,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Wifi {
    pub ssid: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ntp {
    pub server: String,
    pub interval: u32,
}

impl Default for Ntp {
    fn default() -> Self {
        Self {
            server: "pool.ntp.org".to_string(),
            interval: 3600,
        }
    }
}

/// A start time as written in the file: `"HH:MM"` or raw minutes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum StartTime {
    Minutes(u16),
    Clock(String),
}

impl StartTime {
    /// Writes minutes as `"HH:MM"` when they name a time of day.
    pub fn from_minutes(minutes: u16) -> Self {
        if minutes >= MINUTES_PER_DAY {
            return StartTime::Minutes(minutes);
        }

        match NaiveTime::from_hms_opt(u32::from(minutes / 60), u32::from(minutes % 60), 0) {
            Some(time) => StartTime::Clock(time.format("%H:%M").to_string()),
            None => StartTime::Minutes(minutes),
        }
    }

    pub fn to_minutes(&self, field: Field) -> Result<u16> {
        match self {
            StartTime::Minutes(minutes) => Ok(*minutes),
            StartTime::Clock(clock) => {
                let Ok(time) = NaiveTime::parse_from_str(clock.trim(), "%H:%M") else {
                    return Err(ConfigError::InvalidTimeOfDay {
                        field,
                        value: clock.clone(),
                    });
                };

                // At most 23 * 60 + 59.
                Ok((time.hour() * 60 + time.minute()) as u16)
            }
        }
    }
}

impl ConfigFile {
    pub fn from_record(record: &ConfigurationRecord) -> Self {
        Self {
            display: Display {
                night_start: StartTime::from_minutes(record.night_mode_start),
                night_brightness: record.night_mode_bright,
                day_start: StartTime::from_minutes(record.day_mode_start),
                day_brightness: record.day_mode_bright,
            },
            wifi: Wifi {
                ssid: record.wifi_ssid.to_string(),
                key: record.wifi_key.to_string(),
            },
            ntp: Ntp {
                server: record.ntp_server.to_string(),
                interval: record.ntp_interval,
            },
        }
    }

    pub fn into_record(self, policy: TextPolicy) -> Result<ConfigurationRecord> {
        Ok(ConfigurationRecord {
            night_mode_start: self.display.night_start.to_minutes(Field::NightModeStart)?,
            night_mode_bright: self.display.night_brightness,
            day_mode_start: self.display.day_start.to_minutes(Field::DayModeStart)?,
            day_mode_bright: self.display.day_brightness,
            wifi_ssid: bounded(&self.wifi.ssid, Field::WifiSsid, policy)?,
            wifi_key: bounded(&self.wifi.key, Field::WifiKey, policy)?,
            ntp_server: bounded(&self.ntp.server, Field::NtpServer, policy)?,
            ntp_interval: self.ntp.interval,
        })
    }
}

fn bounded(value: &str, field: Field, policy: TextPolicy) -> Result<BoundedText> {
    match (BoundedText::try_new(value), policy) {
        (Ok(text), _) => Ok(text),
        (Err(source), TextPolicy::Reject) => Err(ConfigError::Text { field, source }),
        (Err(source), TextPolicy::Truncate) => {
            let text = BoundedText::truncated(value);
            warn!(%field, %source, kept = text.len(), "truncating text field");
            Ok(text)
        }
    }
}

pub fn parse(source: &str, policy: TextPolicy) -> Result<ConfigurationRecord> {
    let file: ConfigFile = toml::from_str(source)?;
    file.into_record(policy)
}

pub fn to_string(record: &ConfigurationRecord) -> Result<String> {
    Ok(toml::to_string_pretty(&ConfigFile::from_record(record))?)
}

/// The factory defaults as a TOML document.
pub fn default_document() -> Result<String> {
    Ok(toml::to_string_pretty(&ConfigFile::default())?)
}

pub fn load(path: &Path, policy: TextPolicy) -> Result<ConfigurationRecord> {
    debug!(path = %path.display(), ?policy, "loading config");
    let source = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse(&source, policy)
}

pub fn save(path: &Path, record: &ConfigurationRecord) -> Result<()> {
    debug!(path = %path.display(), "saving config");
    let source = to_string(record)?;
    fs::write(path, source).map_err(|e| ConfigError::io(path, e))
}
