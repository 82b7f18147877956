// TOML config adapter - Configuration file loading

use std::path::Path;

use serde::Deserialize;

use crate::domain::errors::*;

/// One layer of configuration values; unset keys fall through to lower layers
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub workers: Option<usize>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub mask: Option<String>,
    pub output: Option<String>,
    pub manifest: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    cavid: ConfigLayer,
}

impl ConfigLayer {
    /// Overlay `self` on top of `lower`, keeping every value `self` sets
    pub fn over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            log_level: self.log_level.or(lower.log_level),
            log_format: self.log_format.or(lower.log_format),
            workers: self.workers.or(lower.workers),
            ffmpeg: self.ffmpeg.or(lower.ffmpeg),
            ffprobe: self.ffprobe.or(lower.ffprobe),
            mask: self.mask.or(lower.mask),
            output: self.output.or(lower.output),
            manifest: self.manifest.or(lower.manifest),
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// File looked up in the working directory when no path is given
    pub const DEFAULT_FILE_NAME: &'static str = "cavid.toml";

    /// Deserialize the `[cavid]` table of a TOML document
    pub fn parse(toml_content: &str) -> Result<ConfigLayer, DomainError> {
        let document: ConfigDocument = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.cavid)
    }

    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<ConfigLayer, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Load a config file if present
    pub fn load_optional(path: &Path) -> Result<Option<ConfigLayer>, DomainError> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }
}
