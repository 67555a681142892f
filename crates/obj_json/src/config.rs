//! Parse options and configuration file support

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// How malformed float tokens are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMode {
    /// Malformed or missing components become NaN
    #[default]
    Lenient,
    /// Malformed or missing components fail the parse
    Strict,
}

/// What to do when the referenced material has no block in the MTL text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMaterialPolicy {
    /// Fail with `MaterialBlockNotFound`
    #[default]
    Error,
    /// Continue with an empty material record
    Empty,
}

/// Options controlling a single `parse` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Float handling for vertex, normal, uv and material values
    pub numeric_mode: NumericMode,

    /// Behaviour when the `usemtl` name matches no `newmtl` block
    pub missing_material: MissingMaterialPolicy,

    /// Fail when the geometry text has no `usemtl` line
    pub require_material: bool,
}

impl ParseOptions {
    /// Options that reject every malformed number and missing material
    pub fn strict() -> Self {
        Self {
            numeric_mode: NumericMode::Strict,
            missing_material: MissingMaterialPolicy::Error,
            require_material: true,
        }
    }
}

impl Config for ParseOptions {}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
