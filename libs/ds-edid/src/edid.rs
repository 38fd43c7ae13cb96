use log::warn;

use crate::{
    EDID_BLOCK_LEN, EDID_HEADER, EdidError, EdidVersion,
    descriptors::EdidDescriptor,
    manufacturer::{
        UNDETERMINED_MANUFACTURER_ID, manufacturer_id_from_bytes, manufacturer_id_to_bytes,
    },
    reader::{ByteReader, ReadError},
    timings::{EdidEstablishedTimingSupport, EdidStandardTiming},
    verify::{checksum_byte, verify},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdidDigitalBitDepth {
    Undefined = 0b000,
    Six = 0b001,
    #[default]
    Eight = 0b010,
    Ten = 0b011,
    Twelve = 0b100,
    Fourteen = 0b101,
    Sixteen = 0b110,
}

impl EdidDigitalBitDepth {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b001 => Self::Six,
            0b010 => Self::Eight,
            0b011 => Self::Ten,
            0b100 => Self::Twelve,
            0b101 => Self::Fourteen,
            0b110 => Self::Sixteen,
            _ => Self::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdidDigitalVideoInterface {
    Undefined = 0b0000,
    DVI = 0b0001,
    HDMIa = 0b0010,
    HDMIb = 0b0011,
    MDDI = 0b0100,
    #[default]
    DisplayPort = 0b0101,
}

impl EdidDigitalVideoInterface {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b1111 {
            0b0001 => Self::DVI,
            0b0010 => Self::HDMIa,
            0b0011 => Self::HDMIb,
            0b0100 => Self::MDDI,
            0b0101 => Self::DisplayPort,
            _ => Self::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdidDisplayParameters {
    Digital((EdidDigitalBitDepth, EdidDigitalVideoInterface)),
    /// Low 7 bits of the video input byte: signal level, setup and sync flags
    Analog(u8),
}

impl EdidDisplayParameters {
    pub fn from_byte(byte: u8) -> Self {
        if byte & 0b1000_0000 != 0 {
            EdidDisplayParameters::Digital((
                EdidDigitalBitDepth::from_bits(byte >> 4),
                EdidDigitalVideoInterface::from_bits(byte),
            ))
        } else {
            EdidDisplayParameters::Analog(byte & 0b0111_1111)
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            EdidDisplayParameters::Digital((bit_depth, interface)) => {
                0b1000_0000 | ((*bit_depth as u8) << 4) | *interface as u8
            }
            EdidDisplayParameters::Analog(flags) => flags & 0b0111_1111,
        }
    }

    pub fn is_digital(&self) -> bool {
        matches!(self, EdidDisplayParameters::Digital(_))
    }
}

impl Default for EdidDisplayParameters {
    fn default() -> Self {
        EdidDisplayParameters::Digital((
            EdidDigitalBitDepth::default(),
            EdidDigitalVideoInterface::default(),
        ))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdidDpmsDigitalDisplayType {
    Rgb444 = 0b00,
    Rgb444YCrCb444 = 0b01,
    RGB444YCrCb422 = 0b10,
    #[default]
    RGB444YCrCb444YCrCb422 = 0b11,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdidDpmsAnalogDisplayType {
    MonochromeOrGrayscale = 0b00,
    #[default]
    RgbColor = 0b01,
    NonRgbColor = 0b10,
    Undefined = 0b11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdidDpmsDisplayType {
    Digital(EdidDpmsDigitalDisplayType),
    Analog(EdidDpmsAnalogDisplayType),
}

impl Default for EdidDpmsDisplayType {
    fn default() -> Self {
        EdidDpmsDisplayType::Digital(EdidDpmsDigitalDisplayType::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdidDpmsFeatures {
    /// True if the display supports DPMS standby mode
    pub standby: bool,
    /// True if the display supports DPMS suspend mode
    pub suspend: bool,
    /// True if the display supports DPMS active-off mode
    pub active_off: bool,
    /// The type of display (digital or analog) and its color encoding
    pub display_type: EdidDpmsDisplayType,
    /// True if the display supports sRGB standard color space
    pub srgb_standard: bool,
    /// True if the preferred timing mode is specified in the first detailed timing descriptor
    pub preferred_timing_mode: bool,
    /// True if the display supports continuous frequencies
    pub continuous_frequency: bool,
}

impl EdidDpmsFeatures {
    /// Bits 4..3 mean different things for digital and analog inputs.
    pub fn from_byte(byte: u8, digital: bool) -> Self {
        let type_bits = (byte >> 3) & 0b11;
        let display_type = if digital {
            EdidDpmsDisplayType::Digital(match type_bits {
                0b00 => EdidDpmsDigitalDisplayType::Rgb444,
                0b01 => EdidDpmsDigitalDisplayType::Rgb444YCrCb444,
                0b10 => EdidDpmsDigitalDisplayType::RGB444YCrCb422,
                _ => EdidDpmsDigitalDisplayType::RGB444YCrCb444YCrCb422,
            })
        } else {
            EdidDpmsDisplayType::Analog(match type_bits {
                0b00 => EdidDpmsAnalogDisplayType::MonochromeOrGrayscale,
                0b01 => EdidDpmsAnalogDisplayType::RgbColor,
                0b10 => EdidDpmsAnalogDisplayType::NonRgbColor,
                _ => EdidDpmsAnalogDisplayType::Undefined,
            })
        };

        EdidDpmsFeatures {
            standby: byte & 0b1000_0000 != 0,
            suspend: byte & 0b0100_0000 != 0,
            active_off: byte & 0b0010_0000 != 0,
            display_type,
            srgb_standard: byte & 0b0000_0100 != 0,
            preferred_timing_mode: byte & 0b0000_0010 != 0,
            continuous_frequency: byte & 0b0000_0001 != 0,
        }
    }

    pub fn to_byte(&self) -> u8 {
        let mut byte_value: u8 = 0;

        if self.standby {
            byte_value |= 0b1000_0000;
        }
        if self.suspend {
            byte_value |= 0b0100_0000;
        }
        if self.active_off {
            byte_value |= 0b0010_0000;
        }

        let display_type_bits: u8 = match self.display_type {
            EdidDpmsDisplayType::Digital(dt) => (dt as u8) << 3,
            EdidDpmsDisplayType::Analog(at) => (at as u8) << 3,
        };
        byte_value |= display_type_bits;

        if self.srgb_standard {
            byte_value |= 0b0000_0100;
        }
        if self.preferred_timing_mode {
            byte_value |= 0b0000_0010;
        }
        if self.continuous_frequency {
            byte_value |= 0b0000_0001;
        }

        byte_value
    }
}

impl From<EdidDpmsFeatures> for u8 {
    fn from(features: EdidDpmsFeatures) -> u8 {
        features.to_byte()
    }
}

/// The structured EDID base block, decodable from and encodable to 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edid {
    /// A 3 character manufacturer ID, empty when the decoded letters were invalid
    pub manufacturer_id: String,

    /// A product code, usually represented as a 16-bit number / 4-digit hex
    pub product_code: u16,

    /// A 4 byte serial number
    pub serial: u32,

    /// Week of year (or 0 if not specified)
    pub version_week: u8,
    /// Year offset from 1990 (e.g., 20 = 2010)
    pub version_year: u8,
    /// EDID version (major) (typically 1)
    pub version_edid: u8,
    /// EDID revision (minor) (typically 3 or 4)
    pub version_rev: u8,

    /// Digital or analog display parameters
    pub display_parameters: EdidDisplayParameters,

    /// Width in CM or horizontal aspect ratio value.
    ///
    /// When the height is 0, this is a landscape aspect ratio encoded as
    /// `(ratio * 100) - 99`.
    pub width: u8,
    pub height: u8,

    /// Gamma, stored as `(gamma * 100) - 100`
    pub gamma: u8,

    /// DPMS feature flags
    pub dpms_features: EdidDpmsFeatures,

    /// 10 bytes of CIE 1931 chromaticity coordinates
    /// Red, Green, Blue primary coordinates + White point coordinates
    pub color_characteristics: [u8; 10],

    /// Legacy timing options supported
    pub timing_support_flags: EdidEstablishedTimingSupport,

    /// 8 pairs of 2-byte timing definitions
    ///
    /// Value 0x0101 indicates unused slot
    pub standard_timings: [Option<EdidStandardTiming>; 8],

    pub descriptors: [Option<EdidDescriptor>; 4],

    /// Number of extension blocks following this one
    pub extension_count: u8,
}

impl Edid {
    /// Verifies the base block and decodes its fixed fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Edid, EdidError> {
        verify(bytes)?;
        Self::decode_base_block(bytes)
            .map_err(|_| EdidError::InvalidParameter { len: bytes.len() })
    }

    fn decode_base_block(bytes: &[u8]) -> Result<Edid, ReadError> {
        let mut reader = ByteReader::new(bytes);
        reader.skip(EDID_HEADER.len())?;

        let manufacturer_id =
            manufacturer_id_from_bytes(*reader.read_n::<2>()?).unwrap_or_else(|| {
                warn!("EDID manufacturer ID contains letters outside A-Z, ignoring it");
                String::new()
            });
        let product_code = reader.read_u16_le()?;
        let serial = reader.read_u32_le()?;
        let [version_week, version_year, version_edid, version_rev] = *reader.read_n::<4>()?;

        let display_parameters = EdidDisplayParameters::from_byte(reader.read_u8()?);
        let [width, height, gamma, features] = *reader.read_n::<4>()?;
        let dpms_features = EdidDpmsFeatures::from_byte(features, display_parameters.is_digital());
        let color_characteristics = *reader.read_n::<10>()?;
        let timing_support_flags = EdidEstablishedTimingSupport::from_bytes(*reader.read_n::<3>()?);

        let mut standard_timings: [Option<EdidStandardTiming>; 8] = Default::default();
        for slot in standard_timings.iter_mut() {
            *slot = EdidStandardTiming::from_bytes(*reader.read_n::<2>()?);
        }

        let mut descriptors: [Option<EdidDescriptor>; 4] = Default::default();
        for slot in descriptors.iter_mut() {
            *slot = Some(EdidDescriptor::from_bytes(reader.read_n::<18>()?));
        }

        let extension_count = reader.read_u8()?;

        Ok(Edid {
            manufacturer_id,
            product_code,
            serial,
            version_week,
            version_year,
            version_edid,
            version_rev,
            display_parameters,
            width,
            height,
            gamma,
            dpms_features,
            color_characteristics,
            timing_support_flags,
            standard_timings,
            descriptors,
            extension_count,
        })
    }

    pub fn version(&self) -> EdidVersion {
        EdidVersion {
            major: self.version_edid,
            minor: self.version_rev,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, String> {
        let mfr_bytes = manufacturer_id_to_bytes(&self.manufacturer_id)?;

        let mut edid_bytes: Vec<u8> = vec![0; EDID_BLOCK_LEN];

        edid_bytes[0..8].copy_from_slice(&EDID_HEADER);
        edid_bytes[8..10].copy_from_slice(&mfr_bytes);
        edid_bytes[10..12].copy_from_slice(&self.product_code.to_le_bytes());
        edid_bytes[12..16].copy_from_slice(&self.serial.to_le_bytes());

        edid_bytes[16] = self.version_week;
        edid_bytes[17] = self.version_year;
        edid_bytes[18] = self.version_edid;
        edid_bytes[19] = self.version_rev;

        edid_bytes[20] = self.display_parameters.to_byte();

        edid_bytes[21] = self.width;
        edid_bytes[22] = self.height;
        edid_bytes[23] = self.gamma;
        edid_bytes[24] = self.dpms_features.to_byte();

        edid_bytes[25..35].copy_from_slice(&self.color_characteristics);
        edid_bytes[35..38].copy_from_slice(&self.timing_support_flags.to_bytes());

        let no_standard_timing = [0x01, 0x01];
        for (i, timing) in self.standard_timings.iter().enumerate() {
            let bytes = timing
                .as_ref()
                .map(|st| st.to_bytes())
                .unwrap_or(no_standard_timing);
            edid_bytes[38 + i * 2..40 + i * 2].copy_from_slice(&bytes);
        }

        for (i, descriptor) in self.descriptors.iter().enumerate() {
            let bytes = descriptor
                .as_ref()
                .map(|desc| desc.to_bytes())
                .unwrap_or_else(|| EdidDescriptor::Dummy.to_bytes());
            edid_bytes[54 + i * 18..72 + i * 18].copy_from_slice(&bytes);
        }

        edid_bytes[126] = self.extension_count;
        edid_bytes[127] = checksum_byte(&edid_bytes);

        Ok(edid_bytes)
    }
}

impl Default for Edid {
    fn default() -> Self {
        Edid {
            manufacturer_id: UNDETERMINED_MANUFACTURER_ID.to_string(),
            product_code: 0x0000,
            serial: 0x0000,
            version_week: 0,
            version_year: 0,
            version_edid: 1,
            version_rev: 4,
            display_parameters: EdidDisplayParameters::default(),
            width: 79, // 16:9, stored as (1.78 * 100) - 99
            height: 0,
            gamma: 120, // 2.2
            dpms_features: EdidDpmsFeatures {
                preferred_timing_mode: true,
                ..Default::default()
            },
            color_characteristics: [0; 10],
            timing_support_flags: EdidEstablishedTimingSupport::default(),
            standard_timings: Default::default(),
            descriptors: Default::default(),
            extension_count: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{
        Edid, EdidDigitalBitDepth, EdidDigitalVideoInterface, EdidDisplayParameters,
        EdidDpmsFeatures,
    };
    use crate::{EdidError, descriptors::EdidDescriptor, verify::verify};

    #[test]
    fn test_default_encodes_valid_block() {
        let bytes = Edid::default().to_bytes().unwrap();
        assert_eq!(bytes.len(), 128);
        assert_eq!(verify(&bytes), Ok(()));
        // "UND"
        assert_eq!(&bytes[8..10], &[0x55, 0xC4]);
        // Unused standard timings
        assert!(bytes[38..54].iter().all(|b| *b == 0x01));
    }

    #[test]
    fn test_decode_matches_encode() {
        let edid = Edid {
            manufacturer_id: "GSM".to_string(),
            product_code: 0x5B7A,
            serial: 0x0101_0101,
            version_week: 12,
            version_year: 30,
            display_parameters: EdidDisplayParameters::Digital((
                EdidDigitalBitDepth::Ten,
                EdidDigitalVideoInterface::HDMIa,
            )),
            descriptors: [
                Some(EdidDescriptor::MonitorName("LG TV SSCR2".to_string())),
                Some(EdidDescriptor::Dummy),
                Some(EdidDescriptor::Dummy),
                Some(EdidDescriptor::Dummy),
            ],
            extension_count: 1,
            ..Default::default()
        };

        let bytes = edid.to_bytes().unwrap();
        assert_eq!(bytes[20], 0b1011_0010);
        assert_eq!(&bytes[10..12], &[0x7A, 0x5B]);
        assert_eq!(Edid::from_bytes(&bytes), Ok(edid));
    }

    #[test]
    fn test_decode_rejects_corrupt_blocks() {
        let mut bytes = Edid::default().to_bytes().unwrap();
        bytes[20] ^= 0x10;
        assert!(matches!(
            Edid::from_bytes(&bytes),
            Err(EdidError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_analog_display_parameters() {
        let params = EdidDisplayParameters::from_byte(0x0E);
        assert_eq!(params, EdidDisplayParameters::Analog(0x0E));
        assert!(!params.is_digital());
        assert_eq!(params.to_byte(), 0x0E);
    }

    #[test]
    fn test_dpms_features_round_trip() {
        let features = EdidDpmsFeatures::from_byte(0xEE, true);
        assert!(features.standby && features.suspend && features.active_off);
        assert!(features.preferred_timing_mode);
        assert!(!features.continuous_frequency);
        assert_eq!(features.to_byte(), 0xEE);
    }
}
