use crate::{EDID_BLOCK_LEN, EDID_HEADER, EdidError};

/// Sum of every byte in the block, modulo 256. Zero for a valid block.
pub fn block_sum(block: &[u8]) -> u8 {
    block.iter().fold(0u8, |acc, &x| acc.wrapping_add(x))
}

/// The value byte 127 must hold for `block[..127]` to sum to zero.
pub fn checksum_byte(block: &[u8]) -> u8 {
    let end = block.len().min(EDID_BLOCK_LEN - 1);
    0u8.wrapping_sub(block_sum(&block[..end]))
}

/// Checks one 128-byte block's checksum.
pub fn verify_block_checksum(block: &[u8; EDID_BLOCK_LEN]) -> Result<(), EdidError> {
    match block_sum(block) {
        0 => Ok(()),
        sum => Err(EdidError::InvalidChecksum { sum }),
    }
}

/// Pre-flight gate over a raw EDID buffer.
///
/// Checks length, then the magic header, then the base block checksum. No
/// fields are extracted, so this is cheap enough to reject a corrupt display
/// before building a full record.
pub fn verify(bytes: &[u8]) -> Result<(), EdidError> {
    let base: &[u8; EDID_BLOCK_LEN] = bytes
        .get(..EDID_BLOCK_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(EdidError::InvalidParameter { len: bytes.len() })?;

    if base[..EDID_HEADER.len()] != EDID_HEADER {
        return Err(EdidError::InvalidHeader);
    }

    verify_block_checksum(base)
}
