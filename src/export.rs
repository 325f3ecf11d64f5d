//! Snapshot serialization.

use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::editor::Model;

/// Output format for exported snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML document
    Yaml,
    /// TOML document
    Toml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Json, Self::Yaml, Self::Toml];

    /// File extension, also used to pick a syntax for highlighting.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    /// Next format in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Json => Self::Yaml,
            Self::Yaml => Self::Toml,
            Self::Toml => Self::Json,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Json => Self::Toml,
            Self::Yaml => Self::Json,
            Self::Toml => Self::Yaml,
        }
    }
}

/// Render a snapshot in the given format. Output always ends with a newline.
pub fn render(model: &Model, format: ExportFormat) -> Result<String> {
    let mut text = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(model).wrap_err("Failed to serialize snapshot to JSON")?
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(model).wrap_err("Failed to serialize snapshot to YAML")?
        }
        ExportFormat::Toml => {
            toml::to_string_pretty(model).wrap_err("Failed to serialize snapshot to TOML")?
        }
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}
