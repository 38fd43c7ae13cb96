use ds_edid::{
    Colorimetry, EdidBuilder, EdidDigitalBitDepth, EdidDigitalVideoInterface,
    EdidDisplayParameters, PhysicalAddress,
    cta::{CtaDataBlock, CtaExtensionBuilder, HdrStaticMetadata, ShortVideoDescriptor},
    descriptors::{
        DigitalSyncFlags, EdidDescriptor, EdidDetailedTimingDescriptor, EdidDisplayRangeLimits,
        FeaturesMap, SyncType,
    },
};

use crate::error::DumpError;

fn timing_1080p60() -> EdidDetailedTimingDescriptor {
    EdidDetailedTimingDescriptor {
        pixel_clock: 14850,
        horizontal_active_pixels: 1920,
        horizontal_blanking_pixels: 280,
        vertical_active_lines: 1080,
        vertical_blanking_lines: 45,
        horizontal_sync_offset: 88,
        horizontal_sync_pulse_width: 44,
        vertical_sync_offset: 4,
        vertical_sync_pulse_width: 5,
        horizontal_image_size_mm: 1600,
        vertical_image_size_mm: 900,
        features: FeaturesMap {
            sync_type: SyncType::Digital(DigitalSyncFlags {
                v_sync_polarity: true,
                h_sync_positive: true,
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn svd(vic: u8, native: bool) -> ShortVideoDescriptor {
    ShortVideoDescriptor { vic, native }
}

/// A 256-byte HDMI sink: base block plus one CTA-861 extension.
pub fn sample_edid() -> Result<Vec<u8>, DumpError> {
    let base = EdidBuilder::new()
        .manufacturer_id("SAM")
        .product_code(0x7010)
        .serial(0x0100_0E00)
        .version_week(12)
        .version_year(30)
        .version_major(1)
        .version_minor(3)
        .display_parameters(EdidDisplayParameters::Digital((
            EdidDigitalBitDepth::Undefined,
            EdidDigitalVideoInterface::Undefined,
        )))
        .screen_size_cm(160, 90)
        .descriptor(EdidDescriptor::DetailedTiming(timing_1080p60()))
        .descriptor(EdidDescriptor::RangeLimits(EdidDisplayRangeLimits {
            min_vertical_rate_hz: 24,
            max_vertical_rate_hz: 75,
            min_horizontal_rate_khz: 15,
            max_horizontal_rate_khz: 135,
            max_pixel_clock_mhz: 600,
        }))
        .descriptor(EdidDescriptor::MonitorName("SAMPLE TV".to_string()))
        .descriptor(EdidDescriptor::SerialString("0001".to_string()))
        .extension_count(1)
        .build()?;

    let mut bytes = base.to_bytes().map_err(DumpError::Encode)?;

    let extension = CtaExtensionBuilder::new()
        .underscan(true)
        .basic_audio(true)
        .ycbcr444(true)
        .ycbcr422(true)
        .native_dtd_count(1)
        .data_block(CtaDataBlock::Video(vec![
            svd(16, true),
            svd(4, false),
            svd(31, false),
            svd(97, false),
            svd(95, false),
        ]))
        .data_block(CtaDataBlock::HdmiVendor {
            physical_address: PhysicalAddress {
                a: 1,
                b: 0,
                c: 0,
                d: 0,
            },
        })
        .data_block(CtaDataBlock::Colorimetry(
            Colorimetry::BT2020_YCC | Colorimetry::BT2020_RGB,
        ))
        .data_block(CtaDataBlock::HdrStaticMetadata(HdrStaticMetadata {
            eotf: 0b1101,
            metadata_descriptors: 0x01,
            ..Default::default()
        }))
        .data_block(CtaDataBlock::DolbyVision)
        .detailed_timing(timing_1080p60())
        .build();

    bytes.extend_from_slice(&extension);
    Ok(bytes)
}
