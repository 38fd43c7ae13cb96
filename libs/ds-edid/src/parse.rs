use log::{debug, warn};

use crate::{
    EDID_BLOCK_LEN, Edid, EdidData, EdidError, EdidStatus, HdrCapabilities, MAX_EDID_BYTES_LEN,
    cta::{CtaDataBlock, CtaExtension, parse_extension_block, vic_resolution},
    descriptors::EdidDescriptor,
};

/// Decodes a raw EDID buffer into an [`EdidData`].
///
/// The base block must pass [`crate::verify`], otherwise that error is
/// returned and nothing is decoded. Problems inside individual descriptors or
/// extension blocks are logged and skipped; they never fail the parse.
///
/// Bytes past [`MAX_EDID_BYTES_LEN`] are ignored. Extension blocks are read up
/// to the count in byte 126, limited to the complete blocks actually present.
pub fn parse(bytes: &[u8]) -> Result<EdidData, EdidError> {
    let bytes = if bytes.len() > MAX_EDID_BYTES_LEN {
        debug!(
            "EDID buffer is {} bytes, ignoring everything past {}",
            bytes.len(),
            MAX_EDID_BYTES_LEN
        );
        &bytes[..MAX_EDID_BYTES_LEN]
    } else {
        bytes
    };

    let base = Edid::from_bytes(bytes)?;
    let mut data = base_block_data(&base);

    let available = bytes.len() / EDID_BLOCK_LEN - 1;
    let declared = base.extension_count as usize;
    if declared > available {
        debug!(
            "EDID declares {} extension blocks but only {} are present",
            declared, available
        );
    }

    for (index, block) in bytes[EDID_BLOCK_LEN..]
        .chunks_exact(EDID_BLOCK_LEN)
        .take(declared)
        .enumerate()
    {
        match parse_extension_block(block) {
            Ok(extension) => apply_cta_extension(&mut data, &extension),
            Err(e) => warn!("Skipping EDID extension block {}: {}", index + 1, e),
        }
    }

    data.select_primary_resolution();
    Ok(data)
}

/// HAL-style entry point: fills `out` and returns a flat status.
///
/// On failure `out` is reset to its default, so callers never see a
/// partially decoded record.
pub fn parse_into(bytes: &[u8], out: &mut EdidData) -> EdidStatus {
    let result = parse(bytes);
    let status = EdidStatus::from(&result);
    *out = result.unwrap_or_default();
    status
}

fn base_block_data(base: &Edid) -> EdidData {
    let version = base.version();
    let mut data = EdidData {
        manufacturer_name: base.manufacturer_id.clone(),
        product_code: base.product_code,
        serial_number: base.serial,
        manufacture_week: base.version_week,
        manufacture_year: base.version_year,
        edid_version: version,
        digital_input: base.display_parameters.is_digital(),
        ..Default::default()
    };

    // A zero height means the width byte is an aspect ratio, not a size
    if base.height != 0 {
        data.screen_width_cm = base.width;
        data.screen_height_cm = base.height;
    }

    // The first DTD is always the preferred timing from EDID 1.4 on
    let mut first_timing_native =
        base.dpms_features.preferred_timing_mode || version.at_least(1, 4);

    for descriptor in base.descriptors.iter().flatten() {
        match descriptor {
            EdidDescriptor::DetailedTiming(timing) => {
                match timing.resolution(first_timing_native) {
                    Some(resolution) => data.push_resolution(resolution),
                    None => debug!("Skipping detailed timing without a usable clock"),
                }
                first_timing_native = false;
            }
            EdidDescriptor::MonitorName(name) if data.monitor_name.is_empty() => {
                data.monitor_name = name.clone();
            }
            EdidDescriptor::SerialString(serial) if data.serial_string.is_empty() => {
                data.serial_string = serial.clone();
            }
            EdidDescriptor::Unknown(tag) => {
                debug!("Skipping display descriptor with tag {:#04x}", tag);
            }
            _ => {}
        }
    }

    for resolution in base.timing_support_flags.resolutions() {
        data.push_resolution(resolution);
    }

    for timing in base.standard_timings.iter().flatten() {
        data.push_resolution(timing.resolution(version));
    }

    data
}

fn apply_cta_extension(data: &mut EdidData, extension: &CtaExtension) {
    for (i, timing) in extension.detailed_timings.iter().enumerate() {
        let native = i < extension.native_dtd_count as usize;
        if let Some(resolution) = timing.resolution(native) {
            data.push_resolution(resolution);
        }
    }

    for block in &extension.data_blocks {
        match block {
            CtaDataBlock::Video(svds) => {
                for svd in svds {
                    match vic_resolution(svd.vic, svd.native) {
                        Some(resolution) => data.push_resolution(resolution),
                        None => debug!("Skipping unknown VIC {}", svd.vic),
                    }
                }
            }
            CtaDataBlock::HdmiVendor { physical_address } => {
                if !data.hdmi_device_type {
                    data.hdmi_device_type = true;
                    data.physical_address = *physical_address;
                }
            }
            CtaDataBlock::DolbyVision => {
                data.hdr_capabilities |= HdrCapabilities::DOLBY_VISION;
            }
            CtaDataBlock::Hdr10Plus => {
                data.hdr_capabilities |= HdrCapabilities::HDR10_PLUS;
            }
            CtaDataBlock::Colorimetry(colorimetry) => {
                data.colorimetry_info |= *colorimetry;
            }
            CtaDataBlock::HdrStaticMetadata(metadata) => {
                data.hdr_capabilities |= metadata.capabilities();
            }
            CtaDataBlock::Unknown { .. } => {}
        }
    }
}
