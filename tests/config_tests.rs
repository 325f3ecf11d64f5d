use std::fs;

use paramedit::config::{AppConfig, ConfigError, ConfigOverrides, EditorConfig, OutputOverrides};
use paramedit::editor::ParamValue;
use paramedit::export::ExportFormat;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert!(config.editor.params.is_empty());
    assert_eq!(config.output.format, ExportFormat::Json);
}

#[test]
fn test_sample_config() {
    let sample = EditorConfig::sample();
    assert_eq!(sample.params.len(), 2);
    assert_eq!(sample.params[0].name, "Назначение");
    assert_eq!(sample.model.param_values[1], ParamValue::new(2, "макси"));
    assert!(sample.model.colors.is_empty());
}

#[test]
fn test_parse_toml() {
    let toml_str = r##"
[output]
format = "yaml"

[[editor.params]]
id = 1
name = "Purpose"
type = "string"

[[editor.params]]
id = 2
name = "Length"

[[editor.model.paramValues]]
paramId = 2
value = "maxi"

[[editor.model.colors]]
id = 5
name = "Blue"
"##;

    let config: AppConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.output.format, ExportFormat::Yaml);
    assert_eq!(config.editor.params.len(), 2);
    assert_eq!(config.editor.model.param_values[0].value, "maxi");
    assert_eq!(config.editor.model.colors[0].id, 5);
}

#[test]
fn test_no_file_uses_sample() {
    let config = AppConfig::figment(None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, AppConfig::sample());
}

#[test]
fn test_file_replaces_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(
        &path,
        r#"
[[editor.params]]
id = 7
name = "Fabric"
"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.editor.params.len(), 1);
    assert_eq!(config.editor.params[0].id, 7);
    assert!(config.editor.model.param_values.is_empty());
}

#[test]
fn test_cli_override_wins_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

    let overrides = ConfigOverrides {
        output: Some(OutputOverrides {
            format: Some(ExportFormat::Toml),
        }),
    };
    let config = AppConfig::figment(Some(&path), &overrides).unwrap();
    assert_eq!(config.output.format, ExportFormat::Toml);

    let config = AppConfig::figment(Some(&path), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.output.format, ExportFormat::Yaml);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_duplicate_param_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.toml");
    fs::write(
        &path,
        r#"
[[editor.params]]
id = 1
name = "A"

[[editor.params]]
id = 1
name = "B"
"#,
    )
    .unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateParam(1)));
}

#[test]
fn test_duplicate_color_rejected() {
    let mut config = EditorConfig::sample();
    let color = paramedit::editor::Color {
        id: 3,
        name: "Red".into(),
    };
    config.model.colors = vec![color.clone(), color];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::DuplicateColor(3))
    ));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let config = AppConfig::sample();
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}
