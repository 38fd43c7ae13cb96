use crate::{EdidResolution, EdidVersion};

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq)]
pub struct EdidEstablishedTimingSupport {
    pub t720x400_70hz: bool,
    pub t720x400_88hz: bool,
    pub t640x480_60hz: bool,
    pub t640x480_67hz: bool,
    pub t640x480_72hz: bool,
    pub t640x480_75hz: bool,
    pub t800x600_56hz: bool,
    pub t800x600_60hz: bool,
    pub t800x600_72hz: bool,
    pub t800x600_75hz: bool,
    pub t832x624_75hz: bool,
    /// Interlaced
    pub t1024x768_87hz: bool,
    pub t1024x768_60hz: bool,
    pub t1024x768_70hz: bool,
    pub t1024x768_75hz: bool,
    pub t1280x1024_75hz: bool,
    pub t1152x870_75hz: bool,
}

impl EdidEstablishedTimingSupport {
    /// Bit positions in reading order: byte 0 bit 7 first, ending at byte 2 bit 7.
    fn as_array(&self) -> [bool; 17] {
        [
            self.t720x400_70hz,
            self.t720x400_88hz,
            self.t640x480_60hz,
            self.t640x480_67hz,
            self.t640x480_72hz,
            self.t640x480_75hz,
            self.t800x600_56hz,
            self.t800x600_60hz,
            self.t800x600_72hz,
            self.t800x600_75hz,
            self.t832x624_75hz,
            self.t1024x768_87hz,
            self.t1024x768_60hz,
            self.t1024x768_70hz,
            self.t1024x768_75hz,
            self.t1280x1024_75hz,
            self.t1152x870_75hz,
        ]
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        let bit = |i: usize| bytes[i / 8] & (0b1000_0000 >> (i % 8)) != 0;
        EdidEstablishedTimingSupport {
            t720x400_70hz: bit(0),
            t720x400_88hz: bit(1),
            t640x480_60hz: bit(2),
            t640x480_67hz: bit(3),
            t640x480_72hz: bit(4),
            t640x480_75hz: bit(5),
            t800x600_56hz: bit(6),
            t800x600_60hz: bit(7),
            t800x600_72hz: bit(8),
            t800x600_75hz: bit(9),
            t832x624_75hz: bit(10),
            t1024x768_87hz: bit(11),
            t1024x768_60hz: bit(12),
            t1024x768_70hz: bit(13),
            t1024x768_75hz: bit(14),
            t1280x1024_75hz: bit(15),
            t1152x870_75hz: bit(16),
        }
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        let mut bytes = [0u8; 3];
        for (i, set) in self.as_array().iter().enumerate() {
            if *set {
                bytes[i / 8] |= 0b1000_0000 >> (i % 8);
            }
        }
        bytes
    }

    pub fn resolutions(&self) -> impl Iterator<Item = EdidResolution> + '_ {
        self.as_array()
            .into_iter()
            .zip(ESTABLISHED_TIMING_MODES)
            .filter(|(set, _)| *set)
            .map(|(_, (width, height, refresh_rate, interlaced))| EdidResolution {
                width,
                height,
                refresh_rate,
                interlaced,
                native: false,
            })
    }
}

/// (width, height, refresh, interlaced), in the same order as `as_array`.
const ESTABLISHED_TIMING_MODES: [(u16, u16, u16, bool); 17] = [
    (720, 400, 70, false),
    (720, 400, 88, false),
    (640, 480, 60, false),
    (640, 480, 67, false),
    (640, 480, 72, false),
    (640, 480, 75, false),
    (800, 600, 56, false),
    (800, 600, 60, false),
    (800, 600, 72, false),
    (800, 600, 75, false),
    (832, 624, 75, false),
    (1024, 768, 87, true),
    (1024, 768, 60, false),
    (1024, 768, 70, false),
    (1024, 768, 75, false),
    (1280, 1024, 75, false),
    (1152, 870, 75, false),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdidStandardTimingAspectRatio {
    /// 1:1 before EDID 1.3
    #[default]
    Ar16_10 = 0b00,
    Ar4_3 = 0b01,
    Ar5_4 = 0b10,
    Ar16_9 = 0b11,
}

impl EdidStandardTimingAspectRatio {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Ar16_10,
            0b01 => Self::Ar4_3,
            0b10 => Self::Ar5_4,
            _ => Self::Ar16_9,
        }
    }

    /// (horizontal, vertical) ratio for the given EDID version.
    pub fn ratio(&self, version: EdidVersion) -> (u32, u32) {
        match self {
            Self::Ar16_10 if !version.at_least(1, 3) => (1, 1),
            Self::Ar16_10 => (16, 10),
            Self::Ar4_3 => (4, 3),
            Self::Ar5_4 => (5, 4),
            Self::Ar16_9 => (16, 9),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdidStandardTiming {
    /// Horizontal resolution in pixels, stored on the wire as
    /// `(horizontal_resolution / 8) - 31`.
    pub horizontal_resolution: u16,

    /// Standard aspect ratio
    pub aspect_ratio: EdidStandardTimingAspectRatio,

    /// Vertical frequency in Hz, stored on the wire as `refresh_rate - 60`.
    pub refresh_rate: u8,
}

impl EdidStandardTiming {
    /// Decodes one 2-byte slot. `01 01` (and the reserved `00 xx`) mean unused.
    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        if bytes == [0x01, 0x01] || bytes[0] == 0x00 {
            return None;
        }

        Some(EdidStandardTiming {
            horizontal_resolution: (bytes[0] as u16 + 31) * 8,
            aspect_ratio: EdidStandardTimingAspectRatio::from_bits(bytes[1] >> 6),
            refresh_rate: (bytes[1] & 0b0011_1111) + 60,
        })
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        let mut bytes = [0u8; 2];

        bytes[0] = ((self.horizontal_resolution / 8).saturating_sub(31)).min(255) as u8;

        let aspect_ratio_bits = (self.aspect_ratio as u8) << 6;
        let refresh_rate_bits = self.refresh_rate.saturating_sub(60) & 0b0011_1111;

        bytes[1] = aspect_ratio_bits | refresh_rate_bits;

        bytes
    }

    pub fn resolution(&self, version: EdidVersion) -> EdidResolution {
        let (h, v) = self.aspect_ratio.ratio(version);
        let height = self.horizontal_resolution as u32 * v / h;
        EdidResolution {
            width: self.horizontal_resolution,
            height: height as u16,
            refresh_rate: self.refresh_rate as u16,
            interlaced: false,
            native: false,
        }
    }
}
