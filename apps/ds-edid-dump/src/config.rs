use std::path::{Path, PathBuf};

use log::{LevelFilter, debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationFileError {
    #[error("I/O error: {0}")]
    IoError(std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(Box<dyn std::error::Error>),
    /// The default configuration file path is not available.
    #[error("Default configuration file path is not available")]
    PathNotAvailable,
}

/// A trait for some thing that represents a configuration file.
pub trait ConfigurationFile: Default {
    /// Returns a display name to describe the configuration file type.
    fn display_name() -> String;

    /// Path of this file inside the project configuration directory.
    fn get_default_path(project_config: &Path) -> PathBuf;

    fn serialize(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;

    fn deserialize(source: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>>;
}

pub fn get_default_config_path_for<T>() -> Result<PathBuf, ConfigurationFileError>
where
    T: ConfigurationFile,
{
    let project_config = dirs::config_local_dir()
        .map(|path| path.join("ds-edid"))
        .ok_or(ConfigurationFileError::PathNotAvailable)?;
    Ok(T::get_default_path(project_config.as_path()))
}

pub fn read_configuration_for<T>(path: &Path) -> Result<T, ConfigurationFileError>
where
    T: ConfigurationFile,
{
    debug!(
        "Reading configuration file for {} from {:?}",
        T::display_name(),
        path
    );
    let content = std::fs::read(path).map_err(ConfigurationFileError::IoError)?;
    T::deserialize(content).map_err(ConfigurationFileError::SerializationError)
}

pub fn write_configuration_for<T>(path: &Path, config: &T) -> Result<(), ConfigurationFileError>
where
    T: ConfigurationFile,
{
    if let Some(parent_folder) = path.parent() {
        std::fs::create_dir_all(parent_folder).map_err(ConfigurationFileError::IoError)?;
    }
    debug!(
        "Writing configuration file for {} to {:?}",
        T::display_name(),
        path
    );
    let data = config
        .serialize()
        .map_err(ConfigurationFileError::SerializationError)?;
    std::fs::write(path, data).map_err(ConfigurationFileError::IoError)
}

/// Reads the file at `path`. A missing file is created with defaults, any
/// other failure is logged and the defaults are used.
pub fn read_configuration_or_default_for<T>(path: &Path) -> T
where
    T: ConfigurationFile,
{
    match read_configuration_for::<T>(path) {
        Ok(config) => config,
        Err(ConfigurationFileError::IoError(io_err))
            if io_err.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(
                "Configuration file for {} not found at {:?}, writing default configuration",
                T::display_name(),
                path
            );
            let default_config = T::default();
            if let Err(e) = write_configuration_for(path, &default_config) {
                warn!(
                    "Failed to write default configuration file for {} at {:?}: {}",
                    T::display_name(),
                    path,
                    e
                );
            }
            default_config
        }
        Err(e) => {
            warn!(
                "Failed to read configuration file for {} at {:?}: {}. Using default.",
                T::display_name(),
                path,
                e
            );
            T::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DumpConfiguration {
    /// Input past this many bytes is dropped before decoding
    pub max_edid_bytes: usize,
    pub output_format: OutputFormat,
    /// Any `log::LevelFilter` name, case-insensitive
    pub log_level: String,
}

impl Default for DumpConfiguration {
    fn default() -> Self {
        DumpConfiguration {
            max_edid_bytes: ds_edid::MAX_EDID_BYTES_LEN,
            output_format: OutputFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

impl DumpConfiguration {
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.parse() {
            Ok(level) => level,
            Err(_) => {
                warn!("Unknown log level {:?}, using info", self.log_level);
                LevelFilter::Info
            }
        }
    }
}

impl ConfigurationFile for DumpConfiguration {
    fn display_name() -> String {
        "EDID Dump Configuration".to_string()
    }

    fn get_default_path(project_path: &Path) -> PathBuf {
        let mut path_buf = project_path.to_path_buf();
        path_buf.push("dump_configuration.json");
        path_buf
    }

    fn serialize(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let data = serde_json::to_vec_pretty(&self)?;
        Ok(data)
    }

    fn deserialize(mut source: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let slice = source.as_mut_slice();
        json_strip_comments::strip_slice(slice)?;
        let config = serde_json::from_slice::<DumpConfiguration>(slice)?;
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use log::LevelFilter;

    use super::{ConfigurationFile, DumpConfiguration, OutputFormat};

    #[test]
    fn test_defaults() {
        let config = DumpConfiguration::default();
        assert_eq!(config.max_edid_bytes, 1024);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_deserialize_with_comments_and_missing_fields() {
        let source = br#"{
            // Only look at the base block
            "maxEdidBytes": 128,
            /* json reports */
            "outputFormat": "json"
        }"#;
        let config = DumpConfiguration::deserialize(source.to_vec()).unwrap();
        assert_eq!(config.max_edid_bytes, 128);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let data = DumpConfiguration::default().serialize().unwrap();
        let text = String::from_utf8(data).unwrap();
        assert!(text.contains("\"maxEdidBytes\": 1024"));
        assert!(text.contains("\"outputFormat\": \"text\""));
        assert!(text.contains("\"logLevel\": \"info\""));
    }

    #[test]
    fn test_default_path() {
        let path = DumpConfiguration::get_default_path(Path::new("/etc/ds-edid"));
        assert_eq!(path, Path::new("/etc/ds-edid/dump_configuration.json"));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = DumpConfiguration {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
