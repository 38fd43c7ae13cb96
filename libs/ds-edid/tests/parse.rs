use ds_edid::{
    Colorimetry, EdidData, EdidError, EdidStatus, HdrCapabilities, PhysicalAddress,
    checksum_byte, parse, parse_into, verify,
};

#[rustfmt::skip]
const BASE_BLOCK: [u8; 127] = [
    // Header
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
    // "SAM", product 0x700F, serial 0x01000E00, week 12 of 2020, EDID 1.3
    0x4C, 0x2D, 0x0F, 0x70, 0x00, 0x0E, 0x00, 0x01, 0x0C, 0x1E, 0x01, 0x03,
    // Digital input, 160x90 cm, gamma 2.2, preferred timing in DTD 1
    0x80, 0xA0, 0x5A, 0x78, 0x0A,
    // Chromaticity
    0xEE, 0x91, 0xA3, 0x54, 0x4C, 0x99, 0x26, 0x0F, 0x50, 0x54,
    // Established: 640x480@60, 800x600@60, 1024x768@60
    0x21, 0x08, 0x00,
    // Standard: 1280x720@60, 1920x1080@60, 1280x1024@60, then unused
    0x81, 0xC0, 0xD1, 0xC0, 0x81, 0x80, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    // DTD 1920x1080p60
    0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C,
    0x45, 0x00, 0x50, 0x1D, 0x74, 0x00, 0x00, 0x1E,
    // DTD 1280x720p60
    0x01, 0x1D, 0x00, 0x72, 0x51, 0xD0, 0x1E, 0x20, 0x6E, 0x28,
    0x55, 0x00, 0x50, 0x1D, 0x74, 0x00, 0x00, 0x1E,
    // Range limits
    0x00, 0x00, 0x00, 0xFD, 0x00, 0x18, 0x4B, 0x0F, 0x51, 0x17,
    0x00, 0x0A, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    // Monitor name "SAMSUNG"
    0x00, 0x00, 0x00, 0xFC, 0x00, 0x53, 0x41, 0x4D, 0x53, 0x55,
    0x4E, 0x47, 0x0A, 0x20, 0x20, 0x20, 0x20, 0x20,
    // One extension block
    0x01,
];

#[rustfmt::skip]
const CTA_BLOCK_HEAD: [u8; 61] = [
    // Tag, revision 3, DTDs at 43, underscan/audio/444/422 and one native DTD
    0x02, 0x03, 0x2B, 0xF1,
    // Video: VIC 16 (native), 4, 31, 97, 95
    0x45, 0x90, 0x04, 0x1F, 0x61, 0x5F,
    // HDMI VSDB, physical address 1.0.0.0
    0x68, 0x03, 0x0C, 0x00, 0x10, 0x00, 0xB8, 0x3C, 0x2F,
    // Colorimetry: BT.2020 YCC and RGB
    0xE3, 0x05, 0xC0, 0x00,
    // HDR static metadata: SDR, ST 2084, HLG
    0xE3, 0x06, 0x0D, 0x01,
    // Dolby Vision VSVDB
    0xEB, 0x01, 0x46, 0xD0, 0x00, 0x24, 0x0E, 0x78, 0x5E, 0xB5, 0x6A, 0x3D,
    // Audio
    0x23, 0x09, 0x07, 0x07,
    // DTD 1920x1080i60
    0x01, 0x1D, 0x80, 0x18, 0x71, 0x1C, 0x16, 0x20, 0x58, 0x2C,
    0x25, 0x00, 0xC4, 0x8E, 0x21, 0x00, 0x00, 0x9E,
];

fn with_checksum(content: &[u8]) -> [u8; 128] {
    let mut block = [0u8; 128];
    block[..content.len()].copy_from_slice(content);
    block[127] = checksum_byte(&block);
    block
}

fn base_block() -> [u8; 128] {
    with_checksum(&BASE_BLOCK)
}

fn edid_with_extension(extension: &[u8]) -> Vec<u8> {
    let mut bytes = base_block().to_vec();
    bytes.extend_from_slice(&with_checksum(extension));
    bytes
}

fn tv_edid() -> Vec<u8> {
    edid_with_extension(&CTA_BLOCK_HEAD)
}

fn names(data: &EdidData) -> Vec<String> {
    data.supported_resolutions
        .iter()
        .map(|r| r.name())
        .collect()
}

#[test]
fn test_full_tv_edid() {
    let bytes = tv_edid();
    assert_eq!(verify(&bytes), Ok(()));

    let data = parse(&bytes).unwrap();
    assert_eq!(data.manufacturer_name, "SAM");
    assert_eq!(data.product_code, 0x700F);
    assert_eq!(data.serial_number, 0x0100_0E00);
    assert_eq!(data.manufacture_week, 12);
    assert_eq!(data.manufacture_year_full(), Some(2020));
    assert_eq!(data.edid_version.to_string(), "1.3");
    assert!(data.digital_input);
    assert_eq!((data.screen_width_cm, data.screen_height_cm), (160, 90));
    assert_eq!(data.monitor_name, "SAMSUNG");
    assert_eq!(data.serial_string, "");

    assert!(data.hdmi_device_type);
    assert_eq!(
        data.physical_address,
        PhysicalAddress {
            a: 1,
            b: 0,
            c: 0,
            d: 0
        }
    );
    assert_eq!(
        data.hdr_capabilities,
        HdrCapabilities::SDR
            | HdrCapabilities::HDR10
            | HdrCapabilities::HLG
            | HdrCapabilities::DOLBY_VISION
    );
    assert_eq!(data.hdr_capabilities.bits(), 0x27);
    assert_eq!(
        data.colorimetry_info,
        Colorimetry::BT2020_YCC | Colorimetry::BT2020_RGB
    );

    assert_eq!(data.res.name(), "1920x1080p60");
    assert!(data.res.native);
    assert_eq!(
        names(&data),
        vec![
            "1920x1080p60",
            "1280x720p60",
            "640x480p60",
            "800x600p60",
            "1024x768p60",
            "1280x1024p60",
            "1920x1080i60",
            "1920x1080p50",
            "3840x2160p60",
            "3840x2160p30",
        ]
    );
    let native: Vec<String> = data
        .supported_resolutions
        .iter()
        .filter(|r| r.native)
        .map(|r| r.name())
        .collect();
    assert_eq!(native, vec!["1920x1080p60", "1920x1080i60"]);
}

#[test]
fn test_parse_is_idempotent() {
    let bytes = tv_edid();
    let first = parse(&bytes).unwrap();
    let second = parse(&bytes).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_single_byte_corruption_is_detected() {
    let bytes = base_block();
    for i in 0..128 {
        for mask in [0x01u8, 0x80, 0xFF] {
            let mut corrupted = bytes;
            corrupted[i] ^= mask;
            let expected = if i < 8 {
                EdidStatus::InvalidHeader
            } else {
                EdidStatus::InvalidChecksum
            };
            assert_eq!(
                EdidStatus::from(&verify(&corrupted)),
                expected,
                "byte {} xor {:#04x}",
                i,
                mask
            );
            assert_eq!(EdidStatus::from(&parse(&corrupted)), expected);
        }
    }
}

#[test]
fn test_short_buffers_are_invalid_parameter() {
    let bytes = base_block();
    for len in 0..128 {
        assert_eq!(
            verify(&bytes[..len]),
            Err(EdidError::InvalidParameter { len })
        );
        assert_eq!(
            EdidStatus::from(&parse(&bytes[..len])),
            EdidStatus::InvalidParameter
        );
    }
}

#[test]
fn test_zeroed_block_is_invalid_header() {
    assert_eq!(verify(&[0u8; 128]), Err(EdidError::InvalidHeader));
    assert_eq!(parse(&[0u8; 128]), Err(EdidError::InvalidHeader));
}

#[test]
fn test_truncated_extension_is_ignored() {
    let bytes = tv_edid();
    let base_only = parse(&bytes[..128]).unwrap();

    assert!(!base_only.hdmi_device_type);
    assert!(!base_only.physical_address.is_present());
    assert!(base_only.hdr_capabilities.is_empty());
    assert!(base_only.colorimetry_info.is_empty());

    for len in 128..256 {
        let data = parse(&bytes[..len]).unwrap();
        assert_eq!(data, base_only, "length {}", len);
    }
}

#[test]
fn test_manufacturer_id_decoding() {
    let mut block = BASE_BLOCK;
    for (packed, expected) in [([0x4C, 0x2D], "SAM"), ([0x1E, 0x6D], "GSM"), ([0x10, 0xAC], "DEL")] {
        block[8..10].copy_from_slice(&packed);
        let data = parse(&with_checksum(&block)).unwrap();
        assert_eq!(data.manufacturer_name, expected);
    }

    // Letter fields of 0 are not A-Z
    block[8..10].copy_from_slice(&[0x00, 0x00]);
    let data = parse(&with_checksum(&block)).unwrap();
    assert_eq!(data.manufacturer_name, "");
    assert_eq!(data.monitor_name, "SAMSUNG");
}

#[test]
fn test_unknown_data_blocks_leave_capabilities_empty() {
    #[rustfmt::skip]
    let extension = [
        0x02, 0x03, 0x0F, 0x00,
        // Speaker allocation
        0x83, 0x01, 0x00, 0x00,
        // Extended tag 0x0D (video format preference)
        0xE2, 0x0D, 0x01,
        // Vendor-specific, unknown OUI
        0x63, 0x00, 0x00, 0x00,
    ];

    let data = parse(&edid_with_extension(&extension)).unwrap();
    assert!(data.hdr_capabilities.is_empty());
    assert!(data.colorimetry_info.is_empty());
    assert!(!data.hdmi_device_type);
    assert_eq!(parse(&base_block()).unwrap().supported_resolutions, data.supported_resolutions);
}

#[test]
fn test_unknown_extension_tag_is_skipped() {
    let mut extension = CTA_BLOCK_HEAD;
    // DisplayID
    extension[0] = 0x70;

    let data = parse(&edid_with_extension(&extension)).unwrap();
    assert!(data.hdr_capabilities.is_empty());
    assert!(!data.hdmi_device_type);
}

#[test]
fn test_bad_extension_checksum_is_skipped() {
    let mut bytes = tv_edid();
    bytes[255] = bytes[255].wrapping_add(1);

    let data = parse(&bytes).unwrap();
    assert!(data.hdr_capabilities.is_empty());
    assert!(data.colorimetry_info.is_empty());
    assert_eq!(data, parse(&bytes[..128]).unwrap());
}

#[test]
fn test_overrunning_data_block_drops_the_whole_extension() {
    #[rustfmt::skip]
    let extension = [
        0x02, 0x03, 0x0C, 0x00,
        // Valid HDR static metadata
        0xE3, 0x06, 0x05, 0x01,
        // Video block claiming 8 SVDs, only 3 before the DTD offset
        0x48, 0x90, 0x04, 0x1F,
    ];

    let data = parse(&edid_with_extension(&extension)).unwrap();
    assert!(data.hdr_capabilities.is_empty());
    assert!(!names(&data).contains(&"1920x1080p50".to_string()));
}

#[test]
fn test_short_data_block_keeps_the_rest_of_the_extension() {
    #[rustfmt::skip]
    let extension = [
        0x02, 0x03, 0x0E, 0x00,
        // HDMI VSDB, physical address 1.0.0.0
        0x65, 0x03, 0x0C, 0x00, 0x10, 0x00,
        // Extended tag block with no payload
        0xE0,
        // HDR static metadata: SDR, ST 2084
        0xE2, 0x06, 0x05,
    ];

    let data = parse(&edid_with_extension(&extension)).unwrap();
    assert!(data.hdmi_device_type);
    assert_eq!(data.physical_address.to_string(), "1.0.0.0");
    // The HDR block lost its metadata byte, so it is skipped too
    assert!(data.hdr_capabilities.is_empty());
}

#[test]
fn test_extra_blocks_past_the_limit_are_ignored() {
    let mut bytes = tv_edid();
    // Declares 7 extensions, only one present, followed by garbage up to 2 KiB
    bytes[126] = 7;
    bytes[127] = checksum_byte(&bytes[..128]);
    bytes.resize(2048, 0xAA);

    let data = parse(&bytes).unwrap();
    assert!(data.hdmi_device_type);
    assert_eq!(data.res.name(), "1920x1080p60");
}

#[test]
fn test_parse_into_status() {
    let mut out = EdidData::default();
    assert_eq!(parse_into(&tv_edid(), &mut out), EdidStatus::Ok);
    assert_eq!(out.manufacturer_name, "SAM");

    assert_eq!(parse_into(&[], &mut out), EdidStatus::InvalidParameter);
    assert_eq!(out, EdidData::default());
    assert_eq!(EdidStatus::InvalidChecksum as i32, 4);
}
