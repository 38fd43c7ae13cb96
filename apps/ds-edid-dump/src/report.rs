use std::fmt;

use ds_edid::EdidData;

fn flag_names<'a, T>(names: impl Iterator<Item = (&'a str, T)>) -> String {
    let names: Vec<&str> = names.map(|(name, _)| name).collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "(unknown)" } else { value }
}

/// Human readable report, one field per line.
pub struct TextReport<'a>(pub &'a EdidData);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;

        writeln!(f, "Manufacturer:       {}", or_unknown(&data.manufacturer_name))?;
        writeln!(f, "Product code:       {:#06x}", data.product_code)?;
        writeln!(f, "Serial number:      {}", data.serial_number)?;
        match data.manufacture_year_full() {
            Some(year) => writeln!(f, "Manufactured:       week {} of {}", data.manufacture_week, year)?,
            None => writeln!(f, "Manufactured:       (unknown)")?,
        }
        writeln!(f, "EDID version:       {}", data.edid_version)?;
        writeln!(
            f,
            "Input:              {}",
            if data.digital_input { "digital" } else { "analog" }
        )?;
        if data.screen_width_cm != 0 {
            writeln!(
                f,
                "Screen size:        {} x {} cm",
                data.screen_width_cm, data.screen_height_cm
            )?;
        }
        writeln!(f, "Monitor name:       {}", or_unknown(&data.monitor_name))?;
        writeln!(f, "Serial string:      {}", or_unknown(&data.serial_string))?;
        writeln!(
            f,
            "HDMI device:        {}",
            if data.hdmi_device_type { "yes" } else { "no" }
        )?;
        if data.physical_address.is_present() {
            writeln!(f, "Physical address:   {}", data.physical_address)?;
        }
        writeln!(
            f,
            "HDR:                {}",
            flag_names(data.hdr_capabilities.iter_names())
        )?;
        writeln!(
            f,
            "Colorimetry:        {}",
            flag_names(data.colorimetry_info.iter_names())
        )?;

        if data.res.is_unknown() {
            writeln!(f, "Preferred mode:     (unknown)")?;
        } else {
            writeln!(f, "Preferred mode:     {}", data.res.name())?;
        }

        writeln!(f, "Supported modes:    {}", data.supported_resolutions.len())?;
        for resolution in &data.supported_resolutions {
            writeln!(
                f,
                "  {}{}",
                resolution.name(),
                if resolution.native { " (native)" } else { "" }
            )?;
        }
        Ok(())
    }
}
