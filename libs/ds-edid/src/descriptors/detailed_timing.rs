use crate::EdidResolution;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignalInterfaceType {
    #[default]
    NonInterlaced = 0,
    Interlaced = 1,
}

// TODO: This may be better represented as bitflags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StereoMode {
    /// No stereo timing mode
    /// (bit 0 is don't care)
    #[default]
    None = 0b000,

    FieldSequentialRightStereoSync = 0b010,
    FieldSequentialLeftStereoSync = 0b100,
    BiInterleavedRightImageEvenLines = 0b011,
    BiInterleavedLeftImageEvenLines = 0b101,
    QuadInterleaved = 0b110,
    SideBySideInterleaved = 0b111,
}

impl StereoMode {
    /// `bits` is bits 6 and 5 of the features byte shifted to 2 and 1, plus bit 0.
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b010 => StereoMode::FieldSequentialRightStereoSync,
            0b100 => StereoMode::FieldSequentialLeftStereoSync,
            0b011 => StereoMode::BiInterleavedRightImageEvenLines,
            0b101 => StereoMode::BiInterleavedLeftImageEvenLines,
            0b110 => StereoMode::QuadInterleaved,
            0b111 => StereoMode::SideBySideInterleaved,
            _ => StereoMode::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalogSyncFlags {
    /// Composite
    ///  - `true` = bipolar composite
    ///  - `false` = analog composite
    pub bipolar_analog_composite: bool,

    /// Serration
    ///  - `true` = serration pulse required for interlaced sync (H-sync during V-sync)
    ///  - `false` = no serrations
    pub serration: bool,

    /// Sync behavior
    ///  - `true` = sync on all RGB channels
    ///  - `false` = sync on green channel only
    pub sync_all: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalSyncCompositeFlags {
    /// Serration
    /// - `true` = serration pulse required for interlaced sync (H-sync during V-sync)
    /// - `false` = no serrations
    pub serration: bool,

    /// H-sync polarity
    ///  - `true` = positive polarity
    ///  - `false` = negative polarity
    pub h_sync_positive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalSyncFlags {
    /// V-sync polarity
    /// - `true` = positive polarity
    /// - `false` = negative polarity
    pub v_sync_polarity: bool,

    /// H-sync polarity
    ///  - `true` = positive polarity
    ///  - `false` = negative polarity
    pub h_sync_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncType {
    Analog(AnalogSyncFlags),
    DigitalComposite(DigitalSyncCompositeFlags),
    Digital(DigitalSyncFlags),
}

impl Default for SyncType {
    fn default() -> Self {
        SyncType::Digital(DigitalSyncFlags::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturesMap {
    pub signal_type: SignalInterfaceType,
    pub stereo_mode: StereoMode,
    pub sync_type: SyncType,
}

impl FeaturesMap {
    pub fn from_byte(byte: u8) -> Self {
        let signal_type = if byte & 0b1000_0000 != 0 {
            SignalInterfaceType::Interlaced
        } else {
            SignalInterfaceType::NonInterlaced
        };

        let stereo_mode = StereoMode::from_bits(((byte >> 4) & 0b110) | (byte & 0b1));

        let bit = |n: u8| byte & (1 << n) != 0;
        let sync_type = match (bit(4), bit(3)) {
            (false, _) => SyncType::Analog(AnalogSyncFlags {
                bipolar_analog_composite: bit(3),
                serration: bit(2),
                sync_all: bit(1),
            }),
            (true, false) => SyncType::DigitalComposite(DigitalSyncCompositeFlags {
                serration: bit(2),
                h_sync_positive: bit(1),
            }),
            (true, true) => SyncType::Digital(DigitalSyncFlags {
                v_sync_polarity: bit(2),
                h_sync_positive: bit(1),
            }),
        };

        FeaturesMap {
            signal_type,
            stereo_mode,
            sync_type,
        }
    }

    pub fn to_byte(&self) -> u8 {
        let mut byte_value: u8 = 0b0000_0000;

        byte_value |= (self.signal_type as u8) << 7;

        // Bits 2 and 1 of the stereo mode go into bits 6 and 5 of the byte,
        // bit 0 of the stereo mode goes into bit 0 of the byte.
        let mut stereo_mode_byte = ((self.stereo_mode as u8) << 4) & 0b0110_0000;
        stereo_mode_byte |= (self.stereo_mode as u8) & 0b0000_0001;
        byte_value |= stereo_mode_byte;

        match &self.sync_type {
            SyncType::Analog(flags) => {
                // Bit 4 is a zero for analog
                if flags.bipolar_analog_composite {
                    byte_value |= 1 << 3;
                }
                if flags.serration {
                    byte_value |= 1 << 2;
                }
                if flags.sync_all {
                    byte_value |= 1 << 1;
                }
            }
            SyncType::DigitalComposite(flags) => {
                // Bit 4 is one and bit 3 is zero for digital composite
                byte_value |= 0b0001_0000;
                if flags.serration {
                    byte_value |= 1 << 2;
                }
                if flags.h_sync_positive {
                    byte_value |= 1 << 1;
                }
            }
            SyncType::Digital(flags) => {
                // Bit 4 and 3 are one for digital separate
                byte_value |= 0b0001_1000;
                if flags.v_sync_polarity {
                    byte_value |= 1 << 2;
                }
                if flags.h_sync_positive {
                    byte_value |= 1 << 1;
                }
            }
        }

        byte_value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdidDetailedTimingDescriptor {
    /// Pixel clock, in 10 kHz units (0.01–655.35 MHz, little-endian).
    /// `0` marks a display descriptor instead of a timing.
    pub pixel_clock: u16,

    /// Horizontal active pixels
    /// Max 12-bit value.
    pub horizontal_active_pixels: u16,

    /// Horizontal blanking pixels
    /// Max 12-bit value.
    pub horizontal_blanking_pixels: u16,

    /// Vertical active lines, per field when interlaced
    /// Max 12-bit value.
    pub vertical_active_lines: u16,

    /// Vertical blanking lines
    /// Max 12-bit value.
    pub vertical_blanking_lines: u16,

    /// Horizontal sync offset (front porch), in pixels
    /// Max 10-bit value.
    pub horizontal_sync_offset: u16,

    /// Horizontal sync pulse width, in pixels
    /// Max 10-bit value.
    pub horizontal_sync_pulse_width: u16,

    /// Vertical sync offset (front porch), in lines
    /// 6-bit value.
    pub vertical_sync_offset: u8,

    /// Vertical sync pulse width, in lines
    /// 6-bit value.
    pub vertical_sync_pulse_width: u8,

    /// Horizontal image size, in millimeters
    /// 12-bit value.
    pub horizontal_image_size_mm: u16,

    /// Vertical image size, in millimeters
    /// 12-bit value.
    pub vertical_image_size_mm: u16,

    /// Horizontal border, in pixels (one side)
    pub horizontal_border: u8,

    /// Vertical border, in lines (one side)
    pub vertical_border: u8,

    pub features: FeaturesMap,
}

impl EdidDetailedTimingDescriptor {
    pub fn from_bytes(b: &[u8; 18]) -> Self {
        // The upper bits of most fields are packed together into shared bytes
        let hi_nibble = |v: u8| (v >> 4) as u16;
        let lo_nibble = |v: u8| (v & 0x0F) as u16;

        EdidDetailedTimingDescriptor {
            pixel_clock: u16::from_le_bytes([b[0], b[1]]),
            horizontal_active_pixels: b[2] as u16 | (hi_nibble(b[4]) << 8),
            horizontal_blanking_pixels: b[3] as u16 | (lo_nibble(b[4]) << 8),
            vertical_active_lines: b[5] as u16 | (hi_nibble(b[7]) << 8),
            vertical_blanking_lines: b[6] as u16 | (lo_nibble(b[7]) << 8),
            horizontal_sync_offset: b[8] as u16 | (((b[11] >> 6) & 0b11) as u16) << 8,
            horizontal_sync_pulse_width: b[9] as u16 | (((b[11] >> 4) & 0b11) as u16) << 8,
            vertical_sync_offset: (b[10] >> 4) | (((b[11] >> 2) & 0b11) << 4),
            vertical_sync_pulse_width: (b[10] & 0x0F) | ((b[11] & 0b11) << 4),
            horizontal_image_size_mm: b[12] as u16 | (hi_nibble(b[14]) << 8),
            vertical_image_size_mm: b[13] as u16 | (lo_nibble(b[14]) << 8),
            horizontal_border: b[15],
            vertical_border: b[16],
            features: FeaturesMap::from_byte(b[17]),
        }
    }

    pub fn to_bytes(&self) -> [u8; 18] {
        let mut bytes = [0u8; 18];

        let pixel_clock_le = self.pixel_clock.to_le_bytes();
        bytes[0] = pixel_clock_le[0];
        bytes[1] = pixel_clock_le[1];

        bytes[2] = (self.horizontal_active_pixels & 0xFF) as u8;
        bytes[3] = (self.horizontal_blanking_pixels & 0xFF) as u8;

        // The 4 most significant bits of horizontal active and blanking
        // share a single byte.
        let h_active_msb = ((self.horizontal_active_pixels >> 8) & 0x0F) as u8;
        let h_blanking_msb = ((self.horizontal_blanking_pixels >> 8) & 0x0F) as u8;
        bytes[4] = (h_active_msb << 4) | h_blanking_msb;

        bytes[5] = (self.vertical_active_lines & 0xFF) as u8;
        bytes[6] = (self.vertical_blanking_lines & 0xFF) as u8;

        let v_active_msb = ((self.vertical_active_lines >> 8) & 0x0F) as u8;
        let v_blanking_msb = ((self.vertical_blanking_lines >> 8) & 0x0F) as u8;
        bytes[7] = (v_active_msb << 4) | v_blanking_msb;

        bytes[8] = (self.horizontal_sync_offset & 0xFF) as u8;
        bytes[9] = (self.horizontal_sync_pulse_width & 0xFF) as u8;

        // Vertical sync offset and pulse are u6 values, their low nibbles
        // share one byte.
        let v_sync_offset_lsb = self.vertical_sync_offset & 0x0F;
        let v_sync_pulse_width_lsb = self.vertical_sync_pulse_width & 0x0F;
        bytes[10] = (v_sync_offset_lsb << 4) | v_sync_pulse_width_lsb;

        // The 2 msb of all four sync values get packed into one byte.
        let h_sync_offset_msb = ((self.horizontal_sync_offset >> 8) & 0b11) as u8;
        let h_sync_pulse_width_msb = ((self.horizontal_sync_pulse_width >> 8) & 0b11) as u8;
        let v_sync_offset_msb = (self.vertical_sync_offset >> 4) & 0b11;
        let v_sync_pulse_width_msb = (self.vertical_sync_pulse_width >> 4) & 0b11;
        bytes[11] = (h_sync_offset_msb << 6)
            | (h_sync_pulse_width_msb << 4)
            | (v_sync_offset_msb << 2)
            | v_sync_pulse_width_msb;

        bytes[12] = (self.horizontal_image_size_mm & 0xFF) as u8;
        bytes[13] = (self.vertical_image_size_mm & 0xFF) as u8;

        let h_image_size_msb = ((self.horizontal_image_size_mm >> 8) & 0x0F) as u8;
        let v_image_size_msb = ((self.vertical_image_size_mm >> 8) & 0x0F) as u8;
        bytes[14] = (h_image_size_msb << 4) | v_image_size_msb;

        bytes[15] = self.horizontal_border;
        bytes[16] = self.vertical_border;
        bytes[17] = self.features.to_byte();

        bytes
    }

    pub fn is_interlaced(&self) -> bool {
        self.features.signal_type == SignalInterfaceType::Interlaced
    }

    /// Field (or frame, when progressive) rate in Hz, rounded.
    ///
    /// Returns `None` for a zero clock, a zero total size, or a rate that
    /// rounds down to 0 Hz.
    pub fn refresh_rate_hz(&self) -> Option<u16> {
        let h_total = self.horizontal_active_pixels as u64 + self.horizontal_blanking_pixels as u64;
        let v_total = self.vertical_active_lines as u64 + self.vertical_blanking_lines as u64;
        let total = h_total * v_total;
        if self.pixel_clock == 0 || total == 0 {
            return None;
        }
        let clock_hz = self.pixel_clock as u64 * 10_000;
        u16::try_from((clock_hz + total / 2) / total)
            .ok()
            .filter(|&rate| rate != 0)
    }

    pub fn resolution(&self, native: bool) -> Option<EdidResolution> {
        let interlaced = self.is_interlaced();
        let height = if interlaced {
            self.vertical_active_lines.checked_mul(2)?
        } else {
            self.vertical_active_lines
        };

        Some(EdidResolution {
            width: self.horizontal_active_pixels,
            height,
            refresh_rate: self.refresh_rate_hz()?,
            interlaced,
            native,
        })
    }
}
