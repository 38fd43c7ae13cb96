use log::warn;

use crate::{
    EDID_BLOCK_LEN, descriptors::EdidDetailedTimingDescriptor, verify::checksum_byte,
};

use super::{CTA_DATA_BLOCKS_OFFSET, CTA_EXTENSION_TAG, CtaDataBlock, DTD_LEN};

/// Encodes a revision 3 CTA-861 extension block.
///
/// Data blocks and timings that do not fit in the 127 usable bytes are
/// dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct CtaExtensionBuilder {
    flags: u8,
    data_blocks: Vec<CtaDataBlock>,
    detailed_timings: Vec<EdidDetailedTimingDescriptor>,
}

impl CtaExtensionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn underscan(mut self, underscan: bool) -> Self {
        self.set_flag(0x80, underscan);
        self
    }

    pub fn basic_audio(mut self, basic_audio: bool) -> Self {
        self.set_flag(0x40, basic_audio);
        self
    }

    pub fn ycbcr444(mut self, ycbcr444: bool) -> Self {
        self.set_flag(0x20, ycbcr444);
        self
    }

    pub fn ycbcr422(mut self, ycbcr422: bool) -> Self {
        self.set_flag(0x10, ycbcr422);
        self
    }

    pub fn native_dtd_count(mut self, count: u8) -> Self {
        self.flags = (self.flags & 0xF0) | (count & 0x0F);
        self
    }

    pub fn data_block(mut self, block: CtaDataBlock) -> Self {
        self.data_blocks.push(block);
        self
    }

    pub fn detailed_timing(mut self, timing: EdidDetailedTimingDescriptor) -> Self {
        self.detailed_timings.push(timing);
        self
    }

    fn set_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.flags |= mask;
        } else {
            self.flags &= !mask;
        }
    }

    pub fn build(&self) -> [u8; EDID_BLOCK_LEN] {
        let mut block = [0u8; EDID_BLOCK_LEN];
        block[0] = CTA_EXTENSION_TAG;
        block[1] = 3;
        block[3] = self.flags;

        let usable = EDID_BLOCK_LEN - 1;
        let mut pos = CTA_DATA_BLOCKS_OFFSET;

        for data_block in &self.data_blocks {
            let bytes = data_block.to_bytes();
            if pos + bytes.len() > usable {
                warn!("CTA data block {:?} does not fit, dropping it", data_block);
                continue;
            }
            block[pos..pos + bytes.len()].copy_from_slice(&bytes);
            pos += bytes.len();
        }

        block[2] = pos as u8;

        for timing in &self.detailed_timings {
            if pos + DTD_LEN > usable {
                warn!("CTA detailed timing does not fit, dropping it");
                break;
            }
            block[pos..pos + DTD_LEN].copy_from_slice(&timing.to_bytes());
            pos += DTD_LEN;
        }

        block[EDID_BLOCK_LEN - 1] = checksum_byte(&block);
        block
    }
}
