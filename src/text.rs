use std::{fmt, ops::Deref};

use thiserror::Error;

/// Usable bytes in a text field.
pub const TEXT_CAPACITY: usize = 32;
/// Bytes a text field occupies on the device, terminator included.
pub const BUFFER_LEN: usize = TEXT_CAPACITY + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("text is {len} bytes long, at most {} fit", TEXT_CAPACITY)]
    TooLong { len: usize },
    #[error("text contains a NUL byte")]
    InteriorNul,
    #[error("no terminator within {} bytes", BUFFER_LEN)]
    Unterminated,
    #[error("text is not valid UTF-8")]
    InvalidUtf8,
}

/// Text that always fits in a device text field: at most 32 bytes and no NUL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoundedText(heapless::String<TEXT_CAPACITY>);

impl BoundedText {
    pub fn new() -> Self {
        Self(heapless::String::new())
    }

    pub fn try_new(s: &str) -> Result<Self, TextError> {
        if s.contains('\0') {
            return Err(TextError::InteriorNul);
        }

        let mut inner = heapless::String::new();
        if inner.push_str(s).is_err() {
            return Err(TextError::TooLong { len: s.len() });
        }

        Ok(Self(inner))
    }

    /// Cuts `s` at the first NUL, then keeps as many whole characters as fit.
    pub fn truncated(s: &str) -> Self {
        let s = s.split('\0').next().unwrap_or_default();

        let mut end = s.len().min(TEXT_CAPACITY);
        while !s.is_char_boundary(end) {
            end -= 1;
        }

        let mut inner = heapless::String::new();
        // `end` is at most TEXT_CAPACITY, so this cannot overflow.
        let _ = inner.push_str(&s[..end]);
        Self(inner)
    }

    pub fn from_buffer(buffer: &[u8; BUFFER_LEN]) -> Result<Self, TextError> {
        let Some(nul) = buffer.iter().position(|&b| b == 0) else {
            return Err(TextError::Unterminated);
        };

        let Ok(s) = std::str::from_utf8(&buffer[..nul]) else {
            return Err(TextError::InvalidUtf8);
        };

        Self::try_new(s)
    }

    pub fn to_buffer(&self) -> [u8; BUFFER_LEN] {
        let mut buffer = [0; BUFFER_LEN];
        buffer[..self.len()].copy_from_slice(self.as_bytes());
        buffer
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BoundedText {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for BoundedText {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for BoundedText {
    type Error = TextError;

    fn try_from(s: &str) -> Result<Self, TextError> {
        Self::try_new(s)
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}
