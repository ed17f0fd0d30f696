use thiserror::Error;

use crate::record::{ConfigurationRecord, Field, MINUTES_PER_DAY};

/// Something a consumer of the record is unlikely to want.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("{field} is {value} minutes, past the end of the day")]
    TimeOutOfDay { field: Field, value: u16 },
    #[error("night and day mode start at the same time ({0} minutes), one of them never shows")]
    SameStart(u16),
    #[error("ntp.interval is 0, time will never be synchronized")]
    ZeroInterval,
    #[error("ntp.server is empty")]
    EmptyNtpServer,
    #[error("wifi.ssid is empty")]
    EmptySsid,
}

/// Advisory checks. The record stays usable whatever this returns.
pub fn check(record: &ConfigurationRecord) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (field, value) in [
        (Field::NightModeStart, record.night_mode_start),
        (Field::DayModeStart, record.day_mode_start),
    ] {
        if value >= MINUTES_PER_DAY {
            issues.push(Issue::TimeOutOfDay { field, value });
        }
    }

    if record.night_mode_start == record.day_mode_start {
        issues.push(Issue::SameStart(record.day_mode_start));
    }

    if record.ntp_interval == 0 {
        issues.push(Issue::ZeroInterval);
    }

    if record.ntp_server.is_empty() {
        issues.push(Issue::EmptyNtpServer);
    }

    if record.wifi_ssid.is_empty() {
        issues.push(Issue::EmptySsid);
    }

    issues
}
