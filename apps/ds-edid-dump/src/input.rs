use std::path::Path;

use log::{debug, warn};

use crate::error::DumpError;

/// Reads raw EDID bytes from `path`.
///
/// The file can hold the binary blob (as found in sysfs) or hex text such as
/// the dump printed by `edid-decode`. Anything past `max_bytes` is dropped.
pub fn read_edid_file(path: &Path, max_bytes: usize) -> Result<Vec<u8>, DumpError> {
    let content = std::fs::read(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = if looks_like_hex(&content) {
        debug!("Decoding {:?} as hex text", path);
        decode_hex(&content)?
    } else {
        content
    };

    if bytes.len() > max_bytes {
        warn!(
            "{:?} holds {} bytes, only the first {} are used",
            path,
            bytes.len(),
            max_bytes
        );
        bytes.truncate(max_bytes);
    }

    Ok(bytes)
}

fn looks_like_hex(content: &[u8]) -> bool {
    !content.is_empty()
        && content
            .iter()
            .all(|b| b.is_ascii_hexdigit() || b.is_ascii_whitespace())
}

/// Decodes hex digit pairs, ignoring whitespace between bytes.
pub fn decode_hex(text: &[u8]) -> Result<Vec<u8>, DumpError> {
    let mut bytes = Vec::with_capacity(text.len() / 2);
    let mut high: Option<u8> = None;

    for (position, &c) in text.iter().enumerate() {
        if c.is_ascii_whitespace() {
            if high.is_some() {
                return Err(DumpError::Hex {
                    position,
                    reason: "whitespace inside a byte",
                });
            }
            continue;
        }

        let nibble = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => {
                return Err(DumpError::Hex {
                    position,
                    reason: "not a hex digit",
                });
            }
        };

        match high.take() {
            Some(h) => bytes.push((h << 4) | nibble),
            None => high = Some(nibble),
        }
    }

    if high.is_some() {
        return Err(DumpError::Hex {
            position: text.len(),
            reason: "odd number of hex digits",
        });
    }

    Ok(bytes)
}

/// Formats bytes as 16 space-separated hex pairs per line.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|line| {
            line.iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
