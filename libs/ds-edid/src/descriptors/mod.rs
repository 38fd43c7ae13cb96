mod detailed_timing;
mod display_range_limits;

pub use detailed_timing::*;
pub use display_range_limits::*;

/// Display descriptor tags, found at byte 3 when the first two bytes are zero.
pub const DESCRIPTOR_TAG_SERIAL_STRING: u8 = 0xFF;
pub const DESCRIPTOR_TAG_TEXT: u8 = 0xFE;
pub const DESCRIPTOR_TAG_MONITOR_NAME: u8 = 0xFC;
pub const DESCRIPTOR_TAG_DUMMY: u8 = 0x10;

/// Max characters in a display string descriptor.
pub const DESCRIPTOR_TEXT_LEN: usize = 13;

/// One of the four 18-byte slots at offset 54 of the base block (also used
/// for the trailing descriptors of a CTA extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdidDescriptor {
    DetailedTiming(EdidDetailedTimingDescriptor),
    MonitorName(String),
    SerialString(String),
    Text(String),
    RangeLimits(EdidDisplayRangeLimits),
    Dummy,
    /// A display descriptor with a tag this decoder does not interpret
    Unknown(u8),
}

impl EdidDescriptor {
    pub fn from_bytes(b: &[u8; 18]) -> Self {
        if b[0] != 0 || b[1] != 0 {
            return Self::DetailedTiming(EdidDetailedTimingDescriptor::from_bytes(b));
        }

        match b[3] {
            DESCRIPTOR_TAG_MONITOR_NAME => Self::MonitorName(decode_text(b)),
            DESCRIPTOR_TAG_SERIAL_STRING => Self::SerialString(decode_text(b)),
            DESCRIPTOR_TAG_TEXT => Self::Text(decode_text(b)),
            EdidDisplayRangeLimits::TAG => {
                Self::RangeLimits(EdidDisplayRangeLimits::from_bytes(b))
            }
            DESCRIPTOR_TAG_DUMMY => Self::Dummy,
            tag => Self::Unknown(tag),
        }
    }

    pub fn to_bytes(&self) -> [u8; 18] {
        match self {
            Self::DetailedTiming(t) => t.to_bytes(),
            Self::MonitorName(s) => encode_text(DESCRIPTOR_TAG_MONITOR_NAME, s),
            Self::SerialString(s) => encode_text(DESCRIPTOR_TAG_SERIAL_STRING, s),
            Self::Text(s) => encode_text(DESCRIPTOR_TAG_TEXT, s),
            Self::RangeLimits(r) => r.to_bytes(),
            Self::Dummy => {
                let mut bytes = [0u8; 18];
                bytes[3] = DESCRIPTOR_TAG_DUMMY;
                bytes
            }
            Self::Unknown(tag) => {
                let mut bytes = [0u8; 18];
                bytes[3] = *tag;
                bytes
            }
        }
    }
}

/// Reads the 13 text bytes at offset 5, stopping at the line feed terminator.
///
/// Non-printable bytes are dropped and trailing padding is trimmed.
fn decode_text(b: &[u8; 18]) -> String {
    b[5..]
        .iter()
        .take_while(|&&c| c != 0x0A)
        .filter(|c| c.is_ascii_graphic() || **c == b' ')
        .map(|&c| c as char)
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn encode_text(tag: u8, text: &str) -> [u8; 18] {
    let mut bytes = [0u8; 18];
    bytes[3] = tag;

    let text = text.as_bytes();
    let len = text.len().min(DESCRIPTOR_TEXT_LEN);
    bytes[5..5 + len].copy_from_slice(&text[..len]);
    if len < DESCRIPTOR_TEXT_LEN {
        bytes[5 + len] = 0x0A;
        for b in bytes[6 + len..].iter_mut() {
            *b = 0x20;
        }
    }

    bytes
}

#[cfg(test)]
mod test {
    use super::EdidDescriptor;

    #[test]
    fn test_monitor_name() {
        let bytes = EdidDescriptor::MonitorName("LG TV".to_string()).to_bytes();
        assert_eq!(&bytes[..5], &[0, 0, 0, 0xFC, 0]);
        assert_eq!(bytes[10], 0x0A);
        assert_eq!(bytes[11], 0x20);
        assert_eq!(
            EdidDescriptor::from_bytes(&bytes),
            EdidDescriptor::MonitorName("LG TV".to_string())
        );
    }

    #[test]
    fn test_long_names_fill_all_thirteen_bytes() {
        let bytes = EdidDescriptor::MonitorName("SAMSUNG QN90A TV".to_string()).to_bytes();
        assert_eq!(
            EdidDescriptor::from_bytes(&bytes),
            EdidDescriptor::MonitorName("SAMSUNG QN90A".to_string())
        );
    }

    #[test]
    fn test_unknown_tag_is_not_an_error() {
        let mut bytes = [0u8; 18];
        bytes[3] = 0xF7;
        assert_eq!(EdidDescriptor::from_bytes(&bytes), EdidDescriptor::Unknown(0xF7));
    }

    #[test]
    fn test_non_zero_prefix_is_a_timing() {
        let mut bytes = [0u8; 18];
        bytes[0] = 0x01;
        assert!(matches!(
            EdidDescriptor::from_bytes(&bytes),
            EdidDescriptor::DetailedTiming(_)
        ));
    }
}
