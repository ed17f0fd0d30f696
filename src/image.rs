//! Byte image of the record in the device's struct layout.
//!
//! Little-endian with natural alignment: two padding bytes precede the
//! `u32` interval and one follows the first brightness byte.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    record::{ConfigurationRecord, Field},
    text::{BoundedText, BUFFER_LEN},
};

pub const IMAGE_LEN: usize = 112;

const NIGHT_START: usize = 0;
const NIGHT_BRIGHT: usize = 2;
const DAY_START: usize = 4;
const DAY_BRIGHT: usize = 6;
const WIFI_SSID: usize = 7;
const WIFI_KEY: usize = WIFI_SSID + BUFFER_LEN;
const NTP_SERVER: usize = WIFI_KEY + BUFFER_LEN;
const NTP_INTERVAL: usize = 108;

pub fn encode(record: &ConfigurationRecord) -> [u8; IMAGE_LEN] {
    let mut image = [0; IMAGE_LEN];

    image[NIGHT_START..NIGHT_START + 2].copy_from_slice(&record.night_mode_start.to_le_bytes());
    image[NIGHT_BRIGHT] = record.night_mode_bright;
    image[DAY_START..DAY_START + 2].copy_from_slice(&record.day_mode_start.to_le_bytes());
    image[DAY_BRIGHT] = record.day_mode_bright;
    image[WIFI_SSID..WIFI_SSID + BUFFER_LEN].copy_from_slice(&record.wifi_ssid.to_buffer());
    image[WIFI_KEY..WIFI_KEY + BUFFER_LEN].copy_from_slice(&record.wifi_key.to_buffer());
    image[NTP_SERVER..NTP_SERVER + BUFFER_LEN].copy_from_slice(&record.ntp_server.to_buffer());
    image[NTP_INTERVAL..].copy_from_slice(&record.ntp_interval.to_le_bytes());

    image
}

pub fn decode(bytes: &[u8]) -> Result<ConfigurationRecord> {
    let Ok(image) = <&[u8; IMAGE_LEN]>::try_from(bytes) else {
        return Err(ConfigError::ImageLength {
            expected: IMAGE_LEN,
            found: bytes.len(),
        });
    };

    Ok(ConfigurationRecord {
        night_mode_start: u16::from_le_bytes(array(image, NIGHT_START)),
        night_mode_bright: image[NIGHT_BRIGHT],
        day_mode_start: u16::from_le_bytes(array(image, DAY_START)),
        day_mode_bright: image[DAY_BRIGHT],
        wifi_ssid: text(image, WIFI_SSID, Field::WifiSsid)?,
        wifi_key: text(image, WIFI_KEY, Field::WifiKey)?,
        ntp_server: text(image, NTP_SERVER, Field::NtpServer)?,
        ntp_interval: u32::from_le_bytes(array(image, NTP_INTERVAL)),
    })
}

fn array<const N: usize>(image: &[u8; IMAGE_LEN], offset: usize) -> [u8; N] {
    let mut out = [0; N];
    out.copy_from_slice(&image[offset..offset + N]);
    out
}

fn text(image: &[u8; IMAGE_LEN], offset: usize, field: Field) -> Result<BoundedText> {
    BoundedText::from_buffer(&array(image, offset)).map_err(|source| ConfigError::Text { field, source })
}

pub fn read(path: &Path) -> Result<ConfigurationRecord> {
    debug!(path = %path.display(), "reading image");
    let bytes = fs::read(path).map_err(|e| ConfigError::io(path, e))?;
    decode(&bytes)
}

pub fn write(path: &Path, record: &ConfigurationRecord) -> Result<()> {
    debug!(path = %path.display(), "writing image");
    fs::write(path, encode(record)).map_err(|e| ConfigError::io(path, e))
}
