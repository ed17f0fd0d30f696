use std::fmt;

use crate::text::BoundedText;

/// Minutes in a day; start times at or above this have no clock reading.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Operating parameters of the clock, as a flat value.
///
/// Nothing here is range checked. Start times are minutes after midnight and
/// `ntp_interval` is in seconds; see [`crate::check`] for advisory checks.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub night_mode_start: u16,
    pub night_mode_bright: u8,
    pub day_mode_start: u16,
    pub day_mode_bright: u8,
    pub wifi_ssid: BoundedText,
    pub wifi_key: BoundedText,
    pub ntp_server: BoundedText,
    pub ntp_interval: u32,
}

impl fmt::Debug for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRecord")
            .field("night_mode_start", &self.night_mode_start)
            .field("night_mode_bright", &self.night_mode_bright)
            .field("day_mode_start", &self.day_mode_start)
            .field("day_mode_bright", &self.day_mode_bright)
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_key", &"<redacted>")
            .field("ntp_server", &self.ntp_server)
            .field("ntp_interval", &self.ntp_interval)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NightModeStart,
    DayModeStart,
    WifiSsid,
    WifiKey,
    NtpServer,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::NightModeStart => "display.night_start",
            Field::DayModeStart => "display.day_start",
            Field::WifiSsid => "wifi.ssid",
            Field::WifiKey => "wifi.key",
            Field::NtpServer => "ntp.server",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigurationRecord {
        ConfigurationRecord {
            night_mode_start: 1320,
            night_mode_bright: 0,
            day_mode_start: 420,
            day_mode_bright: 255,
            wifi_ssid: BoundedText::try_new("home").unwrap(),
            wifi_key: BoundedText::try_new("hunter2").unwrap(),
            ntp_server: BoundedText::try_new("pool.ntp.org").unwrap(),
            ntp_interval: 3600,
        }
    }

    #[test]
    fn copies_are_equal() {
        let record = sample();
        let copy = record.clone();
        assert_eq!(copy, record);

        let mut assigned = ConfigurationRecord::default();
        assert_ne!(assigned, record);
        assigned = copy;
        assert_eq!(assigned, record);
    }

    #[test]
    fn integer_fields_take_their_full_width() {
        let record = ConfigurationRecord {
            night_mode_start: u16::MAX,
            night_mode_bright: u8::MAX,
            day_mode_start: 0,
            day_mode_bright: 0,
            ntp_interval: u32::MAX,
            ..sample()
        };
        let copy = record.clone();
        assert_eq!(copy.night_mode_start, 65535);
        assert_eq!(copy.night_mode_bright, 255);
        assert_eq!(copy.day_mode_start, 0);
        assert_eq!(copy.day_mode_bright, 0);
        assert_eq!(copy.ntp_interval, u32::MAX);
    }

    #[test]
    fn default_is_zeroed() {
        let record = ConfigurationRecord::default();
        assert_eq!(record.night_mode_start, 0);
        assert_eq!(record.ntp_interval, 0);
        assert!(record.wifi_ssid.is_empty());
        assert!(record.ntp_server.is_empty());
    }

    #[test]
    fn debug_hides_wifi_key() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("pool.ntp.org"));
        assert!(!debug.contains("hunter2"));
    }
}
