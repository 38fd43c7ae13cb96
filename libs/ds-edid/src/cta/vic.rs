use crate::EdidResolution;

/// (VIC, width, height, refresh, interlaced)
///
/// Pixel-repeated modes report the active width without repetition, heights
/// are frame heights.
const VIC_TABLE: &[(u8, u16, u16, u16, bool)] = &[
    (1, 640, 480, 60, false),
    (2, 720, 480, 60, false),
    (3, 720, 480, 60, false),
    (4, 1280, 720, 60, false),
    (5, 1920, 1080, 60, true),
    (6, 720, 480, 60, true),
    (7, 720, 480, 60, true),
    (8, 720, 240, 60, false),
    (9, 720, 240, 60, false),
    (10, 2880, 480, 60, true),
    (11, 2880, 480, 60, true),
    (12, 2880, 240, 60, false),
    (13, 2880, 240, 60, false),
    (14, 1440, 480, 60, false),
    (15, 1440, 480, 60, false),
    (16, 1920, 1080, 60, false),
    (17, 720, 576, 50, false),
    (18, 720, 576, 50, false),
    (19, 1280, 720, 50, false),
    (20, 1920, 1080, 50, true),
    (21, 720, 576, 50, true),
    (22, 720, 576, 50, true),
    (23, 720, 288, 50, false),
    (24, 720, 288, 50, false),
    (25, 2880, 576, 50, true),
    (26, 2880, 576, 50, true),
    (27, 2880, 288, 50, false),
    (28, 2880, 288, 50, false),
    (29, 1440, 576, 50, false),
    (30, 1440, 576, 50, false),
    (31, 1920, 1080, 50, false),
    (32, 1920, 1080, 24, false),
    (33, 1920, 1080, 25, false),
    (34, 1920, 1080, 30, false),
    (35, 2880, 480, 60, false),
    (36, 2880, 480, 60, false),
    (37, 2880, 576, 50, false),
    (38, 2880, 576, 50, false),
    (39, 1920, 1080, 50, true),
    (40, 1920, 1080, 100, true),
    (41, 1280, 720, 100, false),
    (42, 720, 576, 100, false),
    (43, 720, 576, 100, false),
    (44, 720, 576, 100, true),
    (45, 720, 576, 100, true),
    (46, 1920, 1080, 120, true),
    (47, 1280, 720, 120, false),
    (48, 720, 480, 120, false),
    (49, 720, 480, 120, false),
    (50, 720, 480, 120, true),
    (51, 720, 480, 120, true),
    (52, 720, 576, 200, false),
    (53, 720, 576, 200, false),
    (54, 720, 576, 200, true),
    (55, 720, 576, 200, true),
    (56, 720, 480, 240, false),
    (57, 720, 480, 240, false),
    (58, 720, 480, 240, true),
    (59, 720, 480, 240, true),
    (60, 1280, 720, 24, false),
    (61, 1280, 720, 25, false),
    (62, 1280, 720, 30, false),
    (63, 1920, 1080, 120, false),
    (64, 1920, 1080, 100, false),
    (93, 3840, 2160, 24, false),
    (94, 3840, 2160, 25, false),
    (95, 3840, 2160, 30, false),
    (96, 3840, 2160, 50, false),
    (97, 3840, 2160, 60, false),
    (98, 4096, 2160, 24, false),
    (99, 4096, 2160, 25, false),
    (100, 4096, 2160, 30, false),
    (101, 4096, 2160, 50, false),
    (102, 4096, 2160, 60, false),
    (103, 3840, 2160, 24, false),
    (104, 3840, 2160, 25, false),
    (105, 3840, 2160, 30, false),
    (106, 3840, 2160, 50, false),
    (107, 3840, 2160, 60, false),
];

/// Looks up a CTA-861 Video Identification Code.
pub fn vic_resolution(vic: u8, native: bool) -> Option<EdidResolution> {
    VIC_TABLE
        .iter()
        .find(|(code, ..)| *code == vic)
        .map(|&(_, width, height, refresh_rate, interlaced)| EdidResolution {
            width,
            height,
            refresh_rate,
            interlaced,
            native,
        })
}
