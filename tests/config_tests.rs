//! Integration tests for configuration management

use edge_bundle::config::{Config, ConfigOverrides};
use edge_bundle::core::layout::Weighting;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.input.is_empty(),
        "Default input should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
    assert_eq!(config.diagram.weighting, "label");
    assert_eq!(config.diagram.highlight, "Spleen, Gr1");
    assert_eq!(
        config.diagram.color_aliases.get("Serum").map(String::as_str),
        Some("CD11b")
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
input = "./data/diff.csv"
out_dir = "./diagrams"

[diagram]
width = 900.0
height = 600.0
scale = 1.0
tension = 0.5
weighting = "uniform"
highlight = "Blood, B"

[diagram.color_aliases]
Plasma = "CD4"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.input, "./data/diff.csv");
    assert_eq!(config.paths.out_dir, "./diagrams");
    assert!((config.diagram.width - 900.0).abs() < f64::EPSILON);
    assert!((config.diagram.height - 600.0).abs() < f64::EPSILON);
    assert!((config.diagram.tension - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.diagram.weighting, "uniform");
    assert_eq!(config.diagram.color_aliases.len(), 1);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.input, "");
    // Numeric diagram settings fall back to the built-in drawing defaults
    assert!((config.diagram.width - 1200.0).abs() < f64::EPSILON);
    assert!((config.diagram.tension - 0.85).abs() < f64::EPSILON);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$EDGE_BUNDLE/test.log"

[paths]
out_dir = "$EDGE_BUNDLE/diagrams"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("edgebundle"));
    assert!(!config.logging.file.contains("$EDGE_BUNDLE"));
    assert!(config.paths.out_dir.contains("edgebundle"));
    assert!(!config.paths.out_dir.contains("$EDGE_BUNDLE"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("tension", "0.4").expect("Failed to set tension");
    assert_eq!(config.get("tension").unwrap(), "0.4");

    config
        .set("out-dir", "/tmp/diagrams")
        .expect("Failed to set out-dir");
    assert_eq!(config.get("out_dir").unwrap(), "/tmp/diagrams");

    config
        .set("weighting", "Uniform")
        .expect("Failed to set weighting");
    assert_eq!(config.get("weighting").unwrap(), "uniform");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "sometimes").is_err());
    assert!(config.set("width", "wide").is_err());
    assert!(config.set("height", "NaN").is_err());
    assert!(config.set("tension", "1.5").is_err());
    assert!(config.set("weighting", "area").is_err());

    // Failed sets leave the previous values alone
    assert!((config.diagram.tension - 0.85).abs() < f64::EPSILON);
    assert_eq!(config.diagram.weighting, "label");
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("scale", "2").expect("Failed to set scale");
    config.set("highlight", "").expect("Failed to set highlight");

    config.unset("level", &defaults).expect("unset level");
    config.unset("scale", &defaults).expect("unset scale");
    config.unset("highlight", &defaults).expect("unset highlight");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.diagram.scale - defaults.diagram.scale).abs() < f64::EPSILON);
    assert_eq!(config.diagram.highlight, defaults.diagram.highlight);
    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("tension", "0.25").expect("Failed to set tension");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert!((loaded.diagram.tension - 0.25).abs() < f64::EPSILON);
    assert_eq!(loaded.diagram.color_aliases, config.diagram.color_aliases);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        input: Some("./other.csv".to_string()),
        out_dir: Some("./custom_out".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.input, "./other.csv");
    assert_eq!(config.paths.out_dir, "./custom_out");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.out_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[diagram]"));
    assert!(display_str.contains("[diagram.color_aliases]"));
    assert!(display_str.contains("tension"));
    assert!(display_str.contains("Serum"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
input = ""
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.input, defaults.paths.input);
    assert_eq!(config.diagram.weighting, defaults.diagram.weighting);
    assert_eq!(config.diagram.color_aliases, defaults.diagram.color_aliases);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
input = "mine.csv"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.input, "mine.csv");
}

#[test]
fn test_diagram_config_to_render_options() {
    let config = Config::from_defaults();
    let options = config
        .diagram
        .to_render_options()
        .expect("defaults should convert");
    assert_eq!(options.weighting, Weighting::Label);
    assert_eq!(options.highlight.as_deref(), Some("Spleen, Gr1"));

    let mut diagram = config.diagram;
    diagram.highlight = String::new();
    diagram.weighting = "bogus".to_string();
    assert!(diagram.to_render_options().is_err());
    diagram.weighting = String::new();
    let options = diagram.to_render_options().expect("empty weighting");
    assert_eq!(options.weighting, Weighting::Label);
    assert_eq!(options.highlight, None);
}

#[test]
fn test_get_edgebundle_dir() {
    let dir = Config::get_edgebundle_dir();
    assert!(dir.to_string_lossy().contains("edgebundle"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}

#[test]
fn test_saved_config_keeps_overrides_out() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("dconfig.toml");

    let mut stored = Config::from_defaults();
    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        out_dir: Some("/tmp/one_run".to_string()),
        ..ConfigOverrides::default()
    };
    let effective = stored.with_overrides(&overrides);
    assert_eq!(effective.paths.out_dir, "/tmp/one_run");
    assert_eq!(effective.logging.level, "error");

    stored.set("width", "900").expect("Failed to set width");
    stored.save_to(&config_file).expect("Failed to save config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse saved config");
    let defaults = Config::from_defaults();
    assert!((loaded.diagram.width - 900.0).abs() < f64::EPSILON);
    assert_eq!(loaded.paths.out_dir, defaults.paths.out_dir);
    assert_eq!(loaded.logging.level, defaults.logging.level);
    assert!(!content.contains("/tmp/one_run"));
}

#[test]
fn test_hand_edited_diagram_values_are_checked() {
    let base = "[logging]\nlevel = \"warn\"\n\n[diagram]\n";

    for bad in ["tension = 5.0", "tension = -0.1", "scale = -1.0", "width = 0.0"] {
        let config = Config::from_toml(&format!("{base}{bad}\n")).expect("Failed to parse TOML");
        assert!(
            config.diagram.to_render_options().is_err(),
            "{bad} should be rejected"
        );
    }

    let config = Config::from_toml(&format!("{base}tension = 1.0\nscale = 2.0\n"))
        .expect("Failed to parse TOML");
    assert!(config.diagram.to_render_options().is_ok());

    let mut config = Config::from_defaults();
    assert!(config.set("scale", "-1").is_err());
    assert!(config.set("width", "0").is_err());
}
