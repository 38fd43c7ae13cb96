mod builder;
mod data_block;
mod vic;

pub use builder::*;
pub use data_block::*;
pub use vic::*;

use log::debug;
use thiserror::Error;

use crate::{
    EDID_BLOCK_LEN, EdidError,
    descriptors::EdidDetailedTimingDescriptor,
    reader::{ByteReader, ReadError},
    verify::verify_block_checksum,
};

/// Extension block tag for CTA-861 (a.k.a. CEA-861)
pub const CTA_EXTENSION_TAG: u8 = 0x02;

/// First revision with a data block collection
const CTA_REVISION_DATA_BLOCKS: u8 = 3;

/// Offset of the data block collection inside the extension block
const CTA_DATA_BLOCKS_OFFSET: usize = 4;

const DTD_LEN: usize = 18;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error(transparent)]
    Edid(#[from] EdidError),
    #[error("Malformed CTA extension: {0}")]
    Malformed(#[from] ReadError),
}

/// A decoded CTA-861 extension block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtaExtension {
    pub revision: u8,
    pub underscan: bool,
    pub basic_audio: bool,
    pub ycbcr444: bool,
    pub ycbcr422: bool,
    /// The first `native_dtd_count` entries of `detailed_timings` are native
    pub native_dtd_count: u8,
    pub data_blocks: Vec<CtaDataBlock>,
    pub detailed_timings: Vec<EdidDetailedTimingDescriptor>,
}

/// Decodes one 128-byte extension block.
///
/// Only CTA-861 blocks are interpreted; any other tag is
/// [`EdidError::NotSupported`]. Every length-prefixed structure is bounds
/// checked against the block, and a structure that overruns it fails the
/// whole block with [`ExtensionError::Malformed`]. A data block that fits
/// the collection but is too short for its type is kept as
/// [`CtaDataBlock::Unknown`].
pub fn parse_extension_block(block: &[u8]) -> Result<CtaExtension, ExtensionError> {
    let block: &[u8; EDID_BLOCK_LEN] = block
        .try_into()
        .map_err(|_| EdidError::InvalidParameter { len: block.len() })?;

    if block[0] != CTA_EXTENSION_TAG {
        return Err(EdidError::NotSupported(format!("extension block tag {:#04x}", block[0])).into());
    }

    verify_block_checksum(block)?;

    let mut reader = ByteReader::new(&block[..EDID_BLOCK_LEN - 1]);
    let [_tag, revision, dtd_offset, flags] = *reader.read_n::<4>()?;
    let dtd_offset = dtd_offset as usize;

    let mut extension = CtaExtension {
        revision,
        underscan: flags & 0x80 != 0,
        basic_audio: flags & 0x40 != 0,
        ycbcr444: flags & 0x20 != 0,
        ycbcr422: flags & 0x10 != 0,
        native_dtd_count: flags & 0x0F,
        ..Default::default()
    };

    // 0 means neither data blocks nor DTDs are present
    if dtd_offset == 0 {
        return Ok(extension);
    }
    if dtd_offset < CTA_DATA_BLOCKS_OFFSET {
        return Err(ReadError::UnexpectedEof {
            offset: dtd_offset,
            needed: CTA_DATA_BLOCKS_OFFSET,
            remaining: dtd_offset,
        }
        .into());
    }

    let mut collection = reader.nest(dtd_offset - CTA_DATA_BLOCKS_OFFSET)?;
    if revision >= CTA_REVISION_DATA_BLOCKS {
        while !collection.is_empty() {
            let header = collection.read_u8()?;
            let tag = header >> 5;
            let payload = collection.nest((header & 0x1F) as usize)?;
            // A block too short for its type only loses itself
            let block = CtaDataBlock::parse(tag, &mut payload.clone()).unwrap_or_else(|e| {
                let extended_tag = match tag {
                    TAG_EXTENDED => payload.clone().read_u8().ok(),
                    _ => None,
                };
                debug!("Short CTA data block with tag {}: {}", tag, e);
                CtaDataBlock::Unknown { tag, extended_tag }
            });
            extension.data_blocks.push(block);
        }
    } else {
        debug!("CTA extension revision {} has no data block collection", revision);
    }

    while reader.remaining() >= DTD_LEN {
        let bytes = reader.read_n::<DTD_LEN>()?;
        // A zero pixel clock starts the padding
        if bytes[0] == 0 && bytes[1] == 0 {
            break;
        }
        extension
            .detailed_timings
            .push(EdidDetailedTimingDescriptor::from_bytes(bytes));
    }

    Ok(extension)
}
