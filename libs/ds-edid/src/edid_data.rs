use serde::Serialize;

bitflags::bitflags! {
    /// HDR standards a sink declares.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct HdrCapabilities: u32 {
        /// SMPTE ST 2084 (PQ) EOTF
        const HDR10 = 0x01;
        const HLG = 0x02;
        const DOLBY_VISION = 0x04;
        const HDR10_PLUS = 0x10;
        /// Traditional gamma, SDR luminance range
        const SDR = 0x20;
        /// Traditional gamma, HDR luminance range
        const TRADITIONAL_HDR = 0x40;
    }
}

bitflags::bitflags! {
    /// Colorimetry standards from the CTA colorimetry data block.
    ///
    /// The low byte lines up with the first payload byte of that block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct Colorimetry: u32 {
        const XVYCC601 = 0x01;
        const XVYCC709 = 0x02;
        const SYCC601 = 0x04;
        const ADOBE_YCC601 = 0x08;
        const ADOBE_RGB = 0x10;
        const BT2020_CYCC = 0x20;
        const BT2020_YCC = 0x40;
        const BT2020_RGB = 0x80;
        const DCI_P3 = 0x100;
    }
}

/// One display timing a sink supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdidResolution {
    pub width: u16,
    /// Frame height, so interlaced modes report e.g. 1080 rather than 540
    pub height: u16,
    /// Rounded to the nearest Hz
    pub refresh_rate: u16,
    pub interlaced: bool,
    /// Marked native/preferred by the sink
    pub native: bool,
}

impl EdidResolution {
    /// A short label such as `1920x1080p60` or `1920x1080i60`.
    pub fn name(&self) -> String {
        format!(
            "{}x{}{}{}",
            self.width,
            self.height,
            if self.interlaced { 'i' } else { 'p' },
            self.refresh_rate
        )
    }

    pub fn is_unknown(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(crate) fn same_mode(&self, other: &EdidResolution) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.refresh_rate == other.refresh_rate
            && self.interlaced == other.interlaced
    }
}

/// HDMI CEC physical address `a.b.c.d`.
///
/// `F.F.F.F` is the CEC invalid address and stands for "not present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PhysicalAddress {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

impl PhysicalAddress {
    pub const NOT_PRESENT: PhysicalAddress = PhysicalAddress {
        a: 0xF,
        b: 0xF,
        c: 0xF,
        d: 0xF,
    };

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        PhysicalAddress {
            a: bytes[0] >> 4,
            b: bytes[0] & 0x0F,
            c: bytes[1] >> 4,
            d: bytes[1] & 0x0F,
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        [
            (self.a << 4) | (self.b & 0x0F),
            (self.c << 4) | (self.d & 0x0F),
        ]
    }

    pub fn is_present(&self) -> bool {
        *self != Self::NOT_PRESENT
    }
}

impl Default for PhysicalAddress {
    fn default() -> Self {
        Self::NOT_PRESENT
    }
}

impl std::fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}.{:x}.{:x}.{:x}", self.a, self.b, self.c, self.d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct EdidVersion {
    pub major: u8,
    pub minor: u8,
}

impl EdidVersion {
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl std::fmt::Display for EdidVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Decoded EDID, as handed to display/status reporting code.
///
/// Every field has a defined "unknown" value (zero, empty, or
/// [`PhysicalAddress::NOT_PRESENT`]), which is what [`Default`] produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdidData {
    /// 3 letter PNP ID, empty when the packed bytes were not valid letters
    pub manufacturer_name: String,
    pub product_code: u16,
    pub serial_number: u32,
    /// Week of year (or 0 if not specified)
    pub manufacture_week: u8,
    /// Year offset from 1990 (e.g., 20 = 2010)
    pub manufacture_year: u8,
    pub edid_version: EdidVersion,

    /// True for a digital video input
    pub digital_input: bool,
    pub screen_width_cm: u8,
    pub screen_height_cm: u8,

    /// Set when a CTA extension carries an HDMI vendor-specific data block
    pub hdmi_device_type: bool,
    pub physical_address: PhysicalAddress,

    /// Monitor name descriptor, empty when absent
    pub monitor_name: String,
    /// Serial number string descriptor, empty when absent
    pub serial_string: String,

    /// The primary resolution: first native entry of `supported_resolutions`
    pub res: EdidResolution,
    pub supported_resolutions: Vec<EdidResolution>,

    pub hdr_capabilities: HdrCapabilities,
    pub colorimetry_info: Colorimetry,
}

impl EdidData {
    /// Full manufacture year, or `None` when the year byte is zero.
    pub fn manufacture_year_full(&self) -> Option<u16> {
        match self.manufacture_year {
            0 => None,
            offset => Some(1990 + offset as u16),
        }
    }

    /// Adds a resolution, merging it into an existing entry for the same mode.
    pub(crate) fn push_resolution(&mut self, resolution: EdidResolution) {
        if resolution.is_unknown() {
            return;
        }
        match self
            .supported_resolutions
            .iter_mut()
            .find(|existing| existing.same_mode(&resolution))
        {
            Some(existing) => existing.native |= resolution.native,
            None => self.supported_resolutions.push(resolution),
        }
    }

    /// Picks `res`: the first native entry, otherwise the first entry.
    pub(crate) fn select_primary_resolution(&mut self) {
        self.res = self
            .supported_resolutions
            .iter()
            .find(|r| r.native)
            .or_else(|| self.supported_resolutions.first())
            .copied()
            .unwrap_or_default();
    }
}
