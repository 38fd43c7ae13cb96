/// Default Manufacturer ID for Undetermined Displays
/// See: https://uefi.org/PNP_ID_List
pub const UNDETERMINED_MANUFACTURER_ID: &str = "UND";

/// Converts a 3 character manufacturer ID into its 2 byte EDID representation.
///
/// Each letter of the alphabet is represented as a 5 bit value, where the value
/// is the position of the letter in the alphabet.
/// For example, 'A' = 1, 'B' = 2, ..., 'Z' = 26.
///
/// The returned bytes are a big-endian 2-byte value of 3 5-bit character values.
///
/// Example:
/// ```text
///    | CH1  |   CH2  |  CH3 |
///    |      |        |      |
///  |0 00001   00 010   00011|
///  |            |           |
///  |   Byte 1   |   Byte 2  |
/// ```
/// This layout above produces the manufacturer code of `"ABC"` in just two bytes.
pub fn manufacturer_id_to_bytes(manufacturer_id: &str) -> Result<[u8; 2], String> {
    if manufacturer_id.len() != 3 {
        return Err("Manufacturer ID must be exactly 3 characters".to_string());
    }

    let mut mfr_id_value: u16 = 0;

    for (i, c) in manufacturer_id.chars().enumerate() {
        if !c.is_ascii_uppercase() {
            return Err(format!(
                "Character '{}' ({}) at position {} is out of the encodable range!",
                c, c as u32, i
            ));
        }

        // Alphabet position is a 1-based index
        let alphabet_position = (c as u16 - 'A' as u16) + 1;

        // First character lands in bits 14..10, the top bit stays zero
        mfr_id_value |= alphabet_position << ((2 - i) * 5);
    }

    Ok(mfr_id_value.to_be_bytes())
}

/// Decodes the packed manufacturer ID at offset 8..10 of the base block.
///
/// Returns `None` when any 5-bit field falls outside `1..=26`, since that
/// means the bytes are corrupt rather than a real PNP ID.
pub fn manufacturer_id_from_bytes(bytes: [u8; 2]) -> Option<String> {
    let value = u16::from_be_bytes(bytes);

    (0..3)
        .map(|i| {
            let position = ((value >> ((2 - i) * 5)) & 0b1_1111) as u8;
            match position {
                1..=26 => Some((b'A' + position - 1) as char),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{manufacturer_id_from_bytes, manufacturer_id_to_bytes};

    #[test]
    fn test_decode_known_vendors() {
        assert_eq!(manufacturer_id_from_bytes([0x4C, 0x2D]).as_deref(), Some("SAM"));
        assert_eq!(manufacturer_id_from_bytes([0x1E, 0x6D]).as_deref(), Some("GSM"));
        assert_eq!(manufacturer_id_from_bytes([0x10, 0xAC]).as_deref(), Some("DEL"));
    }

    #[test]
    fn test_encode_matches_decode() {
        assert_eq!(manufacturer_id_to_bytes("ABC"), Ok([0x04, 0x43]));
        assert_eq!(manufacturer_id_to_bytes("SAM"), Ok([0x4C, 0x2D]));
        assert_eq!(manufacturer_id_to_bytes("UND"), Ok([0x55, 0xC4]));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(manufacturer_id_to_bytes("ab1").is_err());
        assert!(manufacturer_id_to_bytes("ABCD").is_err());
        // Zero field
        assert_eq!(manufacturer_id_from_bytes([0x00, 0x00]), None);
        // Field value 27
        assert_eq!(manufacturer_id_from_bytes([0x6C, 0x21]), None);
    }
}
