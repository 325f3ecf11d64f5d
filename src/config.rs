//! TOML configuration: parameter definitions, initial model, output settings.
//!
//! Configuration is layered with figment: a base (the built-in sample when
//! no file is given, an empty editor otherwise), then the TOML file, then
//! overrides from the command line.

use std::collections::HashSet;
use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::editor::{Model, Param, ParamValue};
use crate::export::ExportFormat;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Layered extraction failed (includes TOML syntax errors)
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Two params share an id
    DuplicateParam(u32),
    /// Two initial colors share an id
    DuplicateColor(u64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Configuration error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::DuplicateParam(id) => write!(f, "Duplicate param id: {}", id),
            Self::DuplicateColor(id) => write!(f, "Duplicate color id: {}", id),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Root configuration structure for TOML files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor definition
    pub editor: EditorConfig,
    /// Snapshot output settings
    pub output: OutputConfig,
}

/// Parameter definitions and the model the editor starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub params: Vec<Param>,
    pub model: Model,
}

impl EditorConfig {
    /// Sample dress parameters used when no configuration file is given.
    pub fn sample() -> Self {
        Self {
            params: vec![Param::new(1, "Назначение"), Param::new(2, "Длина")],
            model: Model {
                param_values: vec![
                    ParamValue::new(1, "повседневное"),
                    ParamValue::new(2, "макси"),
                ],
                colors: Vec::new(),
            },
        }
    }

    /// Reject duplicate param ids and duplicate initial color ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut params = HashSet::new();
        for param in &self.params {
            if !params.insert(param.id) {
                return Err(ConfigError::DuplicateParam(param.id));
            }
        }

        let mut colors = HashSet::new();
        for color in &self.model.colors {
            if !colors.insert(color.id) {
                return Err(ConfigError::DuplicateColor(color.id));
            }
        }

        Ok(())
    }
}

/// Snapshot output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format for saved snapshots
    pub format: ExportFormat,
}

/// Values from the command line that take precedence over the file.
///
/// Unset fields are skipped during serialization so they don't shadow
/// values from lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
}

impl AppConfig {
    /// Built-in configuration: the sample editor with default output.
    pub fn sample() -> Self {
        Self {
            editor: EditorConfig::sample(),
            output: OutputConfig::default(),
        }
    }

    /// Load a TOML file on its own, without layering.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::figment(Some(path), &ConfigOverrides::default())
    }

    /// Resolve the effective configuration from all layers.
    pub fn figment(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(_) => Self::default(),
            None => Self::sample(),
        };

        let mut figment = Figment::from(Serialized::defaults(base));
        if let Some(path) = path {
            // Toml::file silently yields nothing for a missing file
            if !path.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Serialized::defaults(overrides));

        let config: Self = figment.extract()?;
        config.editor.validate()?;

        tracing::debug!(
            params = config.editor.params.len(),
            colors = config.editor.model.colors.len(),
            format = ?config.output.format,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
