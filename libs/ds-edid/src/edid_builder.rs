use thiserror::Error;

use crate::{
    Edid, EdidDisplayParameters, EdidDpmsFeatures,
    descriptors::EdidDescriptor,
    manufacturer::manufacturer_id_to_bytes,
    timings::{EdidEstablishedTimingSupport, EdidStandardTiming},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdidBuilderError {
    #[error("Invalid manufacturer ID: {0}")]
    InvalidManufacturerId(String),
    #[error("Aspect ratio {0}:{1} is not encodable")]
    InvalidAspectRatio(u8, u8),
    #[error("At most {max} {what} fit in a base block")]
    TooMany { what: &'static str, max: usize },
}

#[derive(Debug, Clone, Default)]
pub struct EdidBuilder {
    edid: Edid,
    standard_timings: Vec<EdidStandardTiming>,
    descriptors: Vec<EdidDescriptor>,
    aspect_ratio: Option<(u8, u8)>,
}

impl EdidBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manufacturer_id(mut self, manufacturer_id: &str) -> Self {
        self.edid.manufacturer_id = manufacturer_id.to_string();
        self
    }

    pub fn product_code(mut self, product_code: u16) -> Self {
        self.edid.product_code = product_code;
        self
    }

    pub fn serial(mut self, serial: u32) -> Self {
        self.edid.serial = serial;
        self
    }

    pub fn version_week(mut self, week_of_year: u8) -> Self {
        self.edid.version_week = week_of_year;
        self
    }

    pub fn version_year(mut self, version_year: u8) -> Self {
        self.edid.version_year = version_year;
        self
    }

    pub fn version_major(mut self, edid_major_version: u8) -> Self {
        self.edid.version_edid = edid_major_version;
        self
    }

    pub fn version_minor(mut self, edid_minor_version: u8) -> Self {
        self.edid.version_rev = edid_minor_version;
        self
    }

    pub fn display_parameters(mut self, display_params: EdidDisplayParameters) -> Self {
        self.edid.display_parameters = display_params;
        self
    }

    /// Landscape aspect ratio; the height byte becomes 0.
    pub fn aspect_ratio(mut self, aspect_ratio: (u8, u8)) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn screen_size_cm(mut self, width: u8, height: u8) -> Self {
        self.aspect_ratio = None;
        self.edid.width = width;
        self.edid.height = height;
        self
    }

    pub fn dpms_features(mut self, dpms_features: EdidDpmsFeatures) -> Self {
        self.edid.dpms_features = dpms_features;
        self
    }

    pub fn established_timings(mut self, timings: EdidEstablishedTimingSupport) -> Self {
        self.edid.timing_support_flags = timings;
        self
    }

    pub fn standard_timing(mut self, timing: EdidStandardTiming) -> Self {
        self.standard_timings.push(timing);
        self
    }

    /// Descriptors fill the four slots in order, the rest become dummies.
    pub fn descriptor(mut self, descriptor: EdidDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn extension_count(mut self, count: u8) -> Self {
        self.edid.extension_count = count;
        self
    }
}

impl EdidBuilder {
    pub fn build(self) -> Result<Edid, EdidBuilderError> {
        let mut edid = self.edid;

        manufacturer_id_to_bytes(&edid.manufacturer_id)
            .map_err(|_| EdidBuilderError::InvalidManufacturerId(edid.manufacturer_id.clone()))?;

        if let Some((w, h)) = self.aspect_ratio {
            // Stored as (ratio * 100) - 99, landscape only
            let value = (w as f32 / h.max(1) as f32 * 100.0).round();
            if h == 0 || !(99.0..=354.0).contains(&value) {
                return Err(EdidBuilderError::InvalidAspectRatio(w, h));
            }
            edid.width = (value - 99.0) as u8;
            edid.height = 0;
        }

        if self.standard_timings.len() > edid.standard_timings.len() {
            return Err(EdidBuilderError::TooMany {
                what: "standard timings",
                max: edid.standard_timings.len(),
            });
        }
        for (slot, timing) in edid.standard_timings.iter_mut().zip(self.standard_timings) {
            *slot = Some(timing);
        }

        if self.descriptors.len() > edid.descriptors.len() {
            return Err(EdidBuilderError::TooMany {
                what: "descriptors",
                max: edid.descriptors.len(),
            });
        }
        for (slot, descriptor) in edid.descriptors.iter_mut().zip(self.descriptors) {
            *slot = Some(descriptor);
        }

        Ok(edid)
    }
}
