use serde::Serialize;
use thiserror::Error;

/// Errors reported by [`crate::verify`] and [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdidError {
    /// Empty buffer, or fewer bytes than one base block.
    #[error("EDID buffer of {len} bytes is shorter than one {min}-byte block", min = crate::EDID_BLOCK_LEN)]
    InvalidParameter { len: usize },

    /// The first 8 bytes are not the EDID magic header.
    #[error("EDID header does not match 00 FF FF FF FF FF FF 00")]
    InvalidHeader,

    /// The block does not sum to zero modulo 256.
    #[error("EDID block checksum failed (sum = {sum:#04x})")]
    InvalidChecksum { sum: u8 },

    /// A structurally valid construct the decoder does not interpret.
    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Flat status code for HAL-style callers.
///
/// Discriminants follow the ordering of the device settings HAL enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum EdidStatus {
    #[default]
    Ok = 0,
    InvalidParameter = 1,
    NotSupported = 2,
    InvalidHeader = 3,
    InvalidChecksum = 4,
}

impl EdidStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, EdidStatus::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdidStatus::Ok => "OK",
            EdidStatus::InvalidParameter => "INVALID_PARAMETER",
            EdidStatus::NotSupported => "NOT_SUPPORTED",
            EdidStatus::InvalidHeader => "INVALID_HEADER",
            EdidStatus::InvalidChecksum => "INVALID_CHECKSUM",
        }
    }
}

impl std::fmt::Display for EdidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&EdidError> for EdidStatus {
    fn from(error: &EdidError) -> Self {
        match error {
            EdidError::InvalidParameter { .. } => EdidStatus::InvalidParameter,
            EdidError::InvalidHeader => EdidStatus::InvalidHeader,
            EdidError::InvalidChecksum { .. } => EdidStatus::InvalidChecksum,
            EdidError::NotSupported(_) => EdidStatus::NotSupported,
        }
    }
}

impl<T> From<&Result<T, EdidError>> for EdidStatus {
    fn from(result: &Result<T, EdidError>) -> Self {
        match result {
            Ok(_) => EdidStatus::Ok,
            Err(e) => e.into(),
        }
    }
}
