/// Display range limits descriptor (tag `0xFD`).
///
/// Rates are stored already resolved, i.e. with the EDID 1.4 `+255` offset
/// flags applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdidDisplayRangeLimits {
    pub min_vertical_rate_hz: u16,
    pub max_vertical_rate_hz: u16,
    pub min_horizontal_rate_khz: u16,
    pub max_horizontal_rate_khz: u16,
    /// Maximum pixel clock in MHz, rounded up to a 10 MHz multiple
    pub max_pixel_clock_mhz: u16,
}

impl EdidDisplayRangeLimits {
    pub const TAG: u8 = 0xFD;

    pub fn from_bytes(b: &[u8; 18]) -> Self {
        let offsets = b[4];
        let with_offset = |value: u8, flag: bool| value as u16 + if flag { 255 } else { 0 };

        // Bits 1..0: 0b10 offsets the max only, 0b11 offsets both
        let max_v_offset = offsets & 0b0010 != 0;
        let min_v_offset = offsets & 0b0011 == 0b0011;
        let max_h_offset = offsets & 0b1000 != 0;
        let min_h_offset = offsets & 0b1100 == 0b1100;

        EdidDisplayRangeLimits {
            min_vertical_rate_hz: with_offset(b[5], min_v_offset),
            max_vertical_rate_hz: with_offset(b[6], max_v_offset),
            min_horizontal_rate_khz: with_offset(b[7], min_h_offset),
            max_horizontal_rate_khz: with_offset(b[8], max_h_offset),
            max_pixel_clock_mhz: b[9] as u16 * 10,
        }
    }

    pub fn to_bytes(&self) -> [u8; 18] {
        let mut bytes = [0u8; 18];
        bytes[3] = Self::TAG;

        let split = |value: u16| -> (u8, bool) {
            if value > 255 {
                ((value - 255).min(255) as u8, true)
            } else {
                (value as u8, false)
            }
        };

        let (min_v, min_v_offset) = split(self.min_vertical_rate_hz);
        let (max_v, max_v_offset) = split(self.max_vertical_rate_hz);
        let (min_h, min_h_offset) = split(self.min_horizontal_rate_khz);
        let (max_h, max_h_offset) = split(self.max_horizontal_rate_khz);

        // A min offset is only encodable together with the max offset
        let mut offsets = 0u8;
        if max_v_offset {
            offsets |= if min_v_offset { 0b0011 } else { 0b0010 };
        }
        if max_h_offset {
            offsets |= if min_h_offset { 0b1100 } else { 0b1000 };
        }

        bytes[4] = offsets;
        bytes[5] = min_v;
        bytes[6] = max_v;
        bytes[7] = min_h;
        bytes[8] = max_h;
        bytes[9] = self.max_pixel_clock_mhz.div_ceil(10).min(255) as u8;
        // Default GTF, then line feed and space padding
        bytes[10] = 0x00;
        bytes[11] = 0x0A;
        for b in bytes[12..].iter_mut() {
            *b = 0x20;
        }

        bytes
    }
}
