//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::config::{ConfigOverrides, OutputOverrides};
use crate::editor::Editor;
use crate::export::ExportFormat;

/// A `--set ID=VALUE` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub param_id: u32,
    pub value: String,
}

/// Parse `ID=VALUE`. The value may be empty and may contain `=`.
pub fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))?;
    let param_id = id
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid param id '{id}': {e}"))?;
    Ok(Assignment {
        param_id,
        value: value.to_string(),
    })
}

/// Edit named string parameters and a list of color tags.
#[derive(Parser, Debug)]
#[command(name = "paramedit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load params, initial model and output settings from TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set a parameter value (repeatable)
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// Add a color by name (repeatable, surrounding whitespace is trimmed)
    #[arg(long = "add-color", value_name = "NAME")]
    pub add_color: Vec<String>,

    /// Delete a color by id (repeatable)
    #[arg(long = "delete-color", value_name = "ID")]
    pub delete_color: Vec<u64>,

    /// Snapshot output format (default: json, or the config file's setting)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Launch interactive TUI (edits are applied first; -o receives the last saved snapshot)
    #[arg(short, long)]
    pub interactive: bool,

    /// Save the effective configuration to TOML file and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Log file path, or - for stderr in headless mode (default: paramedit.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Options set on the command line, for layering over the config file.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output: self.format.map(|format| OutputOverrides {
                format: Some(format),
            }),
        }
    }

    /// Apply scripted edits: sets, then color additions, then deletions.
    pub fn apply_edits(&self, editor: &mut Editor) {
        for assignment in &self.set {
            editor.update_param_value(assignment.param_id, assignment.value.clone());
        }
        for name in &self.add_color {
            editor.update_new_color_name(name.clone());
            if editor.add_color().is_none() {
                tracing::warn!(name = %name, "color not added");
                editor.update_new_color_name("");
            }
        }
        for id in &self.delete_color {
            if !editor.delete_color(*id) {
                tracing::warn!(id, "no color with this id");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        let a = parse_assignment("2=a=b").unwrap();
        assert_eq!(a.param_id, 2);
        assert_eq!(a.value, "a=b");
    }

    #[test]
    fn assignment_allows_empty_value() {
        assert_eq!(parse_assignment("1=").unwrap().value, "");
    }

    #[test]
    fn assignment_rejects_bad_input() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("x=1").is_err());
    }

    #[test]
    fn cli_parses_repeated_flags() {
        let cli = Cli::try_parse_from([
            "paramedit",
            "--set",
            "1=x",
            "--set",
            "2=y",
            "--add-color",
            "Red",
            "--format",
            "yaml",
        ])
        .unwrap();
        assert_eq!(cli.set.len(), 2);
        assert_eq!(cli.add_color, vec!["Red".to_string()]);
        assert_eq!(cli.format, Some(ExportFormat::Yaml));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
