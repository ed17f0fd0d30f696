use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{record::Field, text::TextError};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("{field}: {source}")]
    Text {
        field: Field,
        #[source]
        source: TextError,
    },

    #[error("{field}: `{value}` is not a time of day (expected HH:MM)")]
    InvalidTimeOfDay { field: Field, value: String },

    #[error("image must be {expected} bytes, found {found}")]
    ImageLength { expected: usize, found: usize },

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
