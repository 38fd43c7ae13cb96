use log::debug;

use crate::{
    Colorimetry, HdrCapabilities, PhysicalAddress,
    reader::{ByteReader, ReadError},
};

pub const TAG_AUDIO: u8 = 0x1;
pub const TAG_VIDEO: u8 = 0x2;
pub const TAG_VENDOR_SPECIFIC: u8 = 0x3;
pub const TAG_SPEAKER_ALLOCATION: u8 = 0x4;
pub const TAG_EXTENDED: u8 = 0x7;

pub const EXT_TAG_VENDOR_SPECIFIC_VIDEO: u8 = 0x01;
pub const EXT_TAG_COLORIMETRY: u8 = 0x05;
pub const EXT_TAG_HDR_STATIC_METADATA: u8 = 0x06;

/// IEEE OUIs, as they appear on the wire (little-endian)
pub const OUI_HDMI_LLC: [u8; 3] = [0x03, 0x0C, 0x00];
pub const OUI_DOLBY: [u8; 3] = [0x46, 0xD0, 0x00];
pub const OUI_HDR10_PLUS: [u8; 3] = [0x8B, 0x84, 0x90];

/// Max payload length encodable in a data block header.
pub const MAX_DATA_BLOCK_PAYLOAD: usize = 0x1F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortVideoDescriptor {
    pub vic: u8,
    pub native: bool,
}

impl ShortVideoDescriptor {
    pub fn from_byte(byte: u8) -> Self {
        // Bit 7 is the native flag only for VICs 1..=64
        match byte {
            129..=192 => ShortVideoDescriptor {
                vic: byte & 0x7F,
                native: true,
            },
            _ => ShortVideoDescriptor {
                vic: byte,
                native: false,
            },
        }
    }

    pub fn to_byte(&self) -> u8 {
        if self.native && (1..=64).contains(&self.vic) {
            self.vic | 0x80
        } else {
            self.vic
        }
    }
}

/// EOTF and luminance codes from an HDR static metadata data block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HdrStaticMetadata {
    pub eotf: u8,
    pub metadata_descriptors: u8,
    /// Desired content max luminance code
    pub max_luminance: Option<u8>,
    /// Desired content max frame-average luminance code
    pub max_frame_average_luminance: Option<u8>,
    /// Desired content min luminance code
    pub min_luminance: Option<u8>,
}

impl HdrStaticMetadata {
    pub fn capabilities(&self) -> HdrCapabilities {
        let mut caps = HdrCapabilities::empty();
        caps.set(HdrCapabilities::SDR, self.eotf & 0x01 != 0);
        caps.set(HdrCapabilities::TRADITIONAL_HDR, self.eotf & 0x02 != 0);
        caps.set(HdrCapabilities::HDR10, self.eotf & 0x04 != 0);
        caps.set(HdrCapabilities::HLG, self.eotf & 0x08 != 0);
        caps
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaDataBlock {
    Video(Vec<ShortVideoDescriptor>),
    /// HDMI 1.x vendor-specific data block
    HdmiVendor { physical_address: PhysicalAddress },
    DolbyVision,
    Hdr10Plus,
    Colorimetry(Colorimetry),
    HdrStaticMetadata(HdrStaticMetadata),
    Unknown { tag: u8, extended_tag: Option<u8> },
}

impl CtaDataBlock {
    /// Decodes one data block payload (header byte already consumed).
    pub(crate) fn parse(tag: u8, payload: &mut ByteReader<'_>) -> Result<CtaDataBlock, ReadError> {
        match tag {
            TAG_VIDEO => {
                let svds = payload.read_var_n(payload.remaining())?;
                Ok(CtaDataBlock::Video(
                    svds.iter()
                        .map(|&b| ShortVideoDescriptor::from_byte(b))
                        .collect(),
                ))
            }
            TAG_VENDOR_SPECIFIC => Self::parse_vendor_specific(payload),
            TAG_EXTENDED => Self::parse_extended(payload),
            tag => {
                debug!("Skipping CTA data block with tag {}", tag);
                Ok(CtaDataBlock::Unknown {
                    tag,
                    extended_tag: None,
                })
            }
        }
    }

    fn parse_vendor_specific(payload: &mut ByteReader<'_>) -> Result<CtaDataBlock, ReadError> {
        match *payload.read_n::<3>()? {
            OUI_HDMI_LLC => Ok(CtaDataBlock::HdmiVendor {
                physical_address: PhysicalAddress::from_bytes(*payload.read_n::<2>()?),
            }),
            oui => {
                debug!("Skipping vendor-specific data block with OUI {:02X?}", oui);
                Ok(CtaDataBlock::Unknown {
                    tag: TAG_VENDOR_SPECIFIC,
                    extended_tag: None,
                })
            }
        }
    }

    fn parse_extended(payload: &mut ByteReader<'_>) -> Result<CtaDataBlock, ReadError> {
        match payload.read_u8()? {
            EXT_TAG_VENDOR_SPECIFIC_VIDEO => match *payload.read_n::<3>()? {
                OUI_DOLBY => Ok(CtaDataBlock::DolbyVision),
                OUI_HDR10_PLUS => Ok(CtaDataBlock::Hdr10Plus),
                _ => Ok(CtaDataBlock::Unknown {
                    tag: TAG_EXTENDED,
                    extended_tag: Some(EXT_TAG_VENDOR_SPECIFIC_VIDEO),
                }),
            },
            EXT_TAG_COLORIMETRY => {
                let [lo, hi] = *payload.read_n::<2>()?;
                let mut colorimetry = Colorimetry::from_bits_truncate(lo as u32);
                colorimetry.set(Colorimetry::DCI_P3, hi & 0x80 != 0);
                Ok(CtaDataBlock::Colorimetry(colorimetry))
            }
            EXT_TAG_HDR_STATIC_METADATA => {
                let [eotf, metadata_descriptors] = *payload.read_n::<2>()?;
                // Luminance bytes are optional, absence is not an error
                let mut optional = || payload.read_u8().ok();
                Ok(CtaDataBlock::HdrStaticMetadata(HdrStaticMetadata {
                    eotf,
                    metadata_descriptors,
                    max_luminance: optional(),
                    max_frame_average_luminance: optional(),
                    min_luminance: optional(),
                }))
            }
            extended_tag => {
                debug!("Skipping CTA extended data block with tag {}", extended_tag);
                Ok(CtaDataBlock::Unknown {
                    tag: TAG_EXTENDED,
                    extended_tag: Some(extended_tag),
                })
            }
        }
    }

    /// Encodes the block including its tag/length header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (tag, payload): (u8, Vec<u8>) = match self {
            CtaDataBlock::Video(svds) => (TAG_VIDEO, svds.iter().map(|s| s.to_byte()).collect()),
            CtaDataBlock::HdmiVendor { physical_address } => {
                let mut payload = OUI_HDMI_LLC.to_vec();
                payload.extend_from_slice(&physical_address.to_bytes());
                (TAG_VENDOR_SPECIFIC, payload)
            }
            CtaDataBlock::DolbyVision => {
                let mut payload = vec![EXT_TAG_VENDOR_SPECIFIC_VIDEO];
                payload.extend_from_slice(&OUI_DOLBY);
                (TAG_EXTENDED, payload)
            }
            CtaDataBlock::Hdr10Plus => {
                let mut payload = vec![EXT_TAG_VENDOR_SPECIFIC_VIDEO];
                payload.extend_from_slice(&OUI_HDR10_PLUS);
                // Application version 1
                payload.push(0x01);
                (TAG_EXTENDED, payload)
            }
            CtaDataBlock::Colorimetry(c) => {
                let lo = (c.bits() & 0xFF) as u8;
                let hi = if c.contains(Colorimetry::DCI_P3) { 0x80 } else { 0 };
                (TAG_EXTENDED, vec![EXT_TAG_COLORIMETRY, lo, hi])
            }
            CtaDataBlock::HdrStaticMetadata(m) => {
                let mut payload = vec![EXT_TAG_HDR_STATIC_METADATA, m.eotf, m.metadata_descriptors];
                // Later codes are only meaningful if the earlier ones are present
                for code in [m.max_luminance, m.max_frame_average_luminance, m.min_luminance]
                    .into_iter()
                    .map_while(|c| c)
                {
                    payload.push(code);
                }
                (TAG_EXTENDED, payload)
            }
            CtaDataBlock::Unknown { tag, extended_tag } => {
                (*tag, extended_tag.iter().copied().collect())
            }
        };

        let len = payload.len().min(MAX_DATA_BLOCK_PAYLOAD);
        let mut bytes = Vec::with_capacity(len + 1);
        bytes.push((tag << 5) | len as u8);
        bytes.extend_from_slice(&payload[..len]);
        bytes
    }
}

#[cfg(test)]
mod test {
    use super::{CtaDataBlock, HdrStaticMetadata, ShortVideoDescriptor};
    use crate::{Colorimetry, HdrCapabilities, PhysicalAddress, reader::ByteReader};

    fn parse(bytes: &[u8]) -> CtaDataBlock {
        let header = bytes[0];
        let mut payload = ByteReader::new(&bytes[1..]);
        CtaDataBlock::parse(header >> 5, &mut payload).unwrap()
    }

    #[test]
    fn test_hdmi_vendor_block() {
        let block = parse(&[0x65, 0x03, 0x0C, 0x00, 0x10, 0x00]);
        assert_eq!(
            block,
            CtaDataBlock::HdmiVendor {
                physical_address: PhysicalAddress {
                    a: 1,
                    b: 0,
                    c: 0,
                    d: 0
                }
            }
        );
    }

    #[test]
    fn test_short_hdmi_vendor_block_is_malformed() {
        let mut payload = ByteReader::new(&[0x03, 0x0C, 0x00, 0x10]);
        assert!(CtaDataBlock::parse(0x3, &mut payload).is_err());
    }

    #[test]
    fn test_colorimetry_block() {
        let block = parse(&[0xE3, 0x05, 0xC0, 0x80]);
        assert_eq!(
            block,
            CtaDataBlock::Colorimetry(
                Colorimetry::BT2020_RGB | Colorimetry::BT2020_YCC | Colorimetry::DCI_P3
            )
        );
        assert_eq!(block.to_bytes(), vec![0xE3, 0x05, 0xC0, 0x80]);
    }

    #[test]
    fn test_hdr_static_metadata_block() {
        let block = parse(&[0xE6, 0x06, 0x0D, 0x01, 0x5F, 0x5F, 0x00]);
        let metadata = match block {
            CtaDataBlock::HdrStaticMetadata(metadata) => metadata,
            other => panic!("expected HDR static metadata, got {:?}", other),
        };
        assert_eq!(metadata.max_luminance, Some(0x5F));
        assert_eq!(metadata.min_luminance, Some(0x00));
        assert_eq!(
            metadata.capabilities(),
            HdrCapabilities::SDR | HdrCapabilities::HDR10 | HdrCapabilities::HLG
        );
    }

    #[test]
    fn test_hdr_block_without_luminance() {
        let metadata = HdrStaticMetadata {
            eotf: 0x02,
            metadata_descriptors: 0x01,
            ..Default::default()
        };
        let bytes = CtaDataBlock::HdrStaticMetadata(metadata).to_bytes();
        assert_eq!(bytes, vec![0xE3, 0x06, 0x02, 0x01]);
        assert_eq!(parse(&bytes), CtaDataBlock::HdrStaticMetadata(metadata));
    }

    #[test]
    fn test_vendor_video_blocks() {
        assert_eq!(parse(&[0xE4, 0x01, 0x46, 0xD0, 0x00]), CtaDataBlock::DolbyVision);
        assert_eq!(
            parse(&[0xE5, 0x01, 0x8B, 0x84, 0x90, 0x01]),
            CtaDataBlock::Hdr10Plus
        );
    }

    #[test]
    fn test_svd_native_bit() {
        assert_eq!(
            ShortVideoDescriptor::from_byte(0x90),
            ShortVideoDescriptor {
                vic: 16,
                native: true
            }
        );
        // VIC 193+ has no native bit
        assert_eq!(
            ShortVideoDescriptor::from_byte(0xC1),
            ShortVideoDescriptor {
                vic: 193,
                native: false
            }
        );
        assert_eq!(
            parse(&[0x43, 0x90, 0x04, 0x61]),
            CtaDataBlock::Video(vec![
                ShortVideoDescriptor {
                    vic: 16,
                    native: true
                },
                ShortVideoDescriptor {
                    vic: 4,
                    native: false
                },
                ShortVideoDescriptor {
                    vic: 97,
                    native: false
                },
            ])
        );
    }

    #[test]
    fn test_unknown_tags_are_skipped() {
        assert_eq!(
            parse(&[0x23, 0x09, 0x07, 0x07]),
            CtaDataBlock::Unknown {
                tag: 1,
                extended_tag: None
            }
        );
        assert_eq!(
            parse(&[0xE2, 0x0F, 0x00]),
            CtaDataBlock::Unknown {
                tag: 7,
                extended_tag: Some(0x0F)
            }
        );
    }
}
