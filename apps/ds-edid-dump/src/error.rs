use std::path::PathBuf;

use ds_edid::{EdidBuilderError, EdidStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid hex input at character {position}: {reason}")]
    Hex { position: usize, reason: &'static str },
    #[error("EDID rejected: {0}")]
    Edid(EdidStatus),
    #[error("Failed to build sample EDID: {0}")]
    Build(#[from] EdidBuilderError),
    #[error("Failed to encode EDID: {0}")]
    Encode(String),
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
