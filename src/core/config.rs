//! Configuration module for `edge-bundle`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::layout::Weighting;
use crate::core::render::RenderOptions;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path values
const DIR_VARIABLE: &str = "$EDGE_BUNDLE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Relationship CSV read when no input file is given
    #[serde(default)]
    pub input: String,
    /// Directory for rendered diagrams
    #[serde(default)]
    pub out_dir: String,
}

fn default_width() -> f64 {
    RenderOptions::default().width
}
fn default_height() -> f64 {
    RenderOptions::default().height
}
fn default_scale() -> f64 {
    RenderOptions::default().scale
}
fn default_tension() -> f64 {
    RenderOptions::default().tension
}

/// Diagram drawing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramConfig {
    /// Logical canvas width
    #[serde(default = "default_width")]
    pub width: f64,
    /// Logical canvas height
    #[serde(default = "default_height")]
    pub height: f64,
    /// Display scale applied to the canvas
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Bundle tension between 0 (straight chords) and 1 (follow the tree)
    #[serde(default = "default_tension")]
    pub tension: f64,
    /// Partition weighting: `label` or `uniform`
    #[serde(default)]
    pub weighting: String,
    /// Taxonomy path whose links are highlighted (empty disables)
    #[serde(default)]
    pub highlight: String,
    /// Node names coloured as if they were another name
    #[serde(default)]
    pub color_aliases: BTreeMap<String, String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            scale: default_scale(),
            tension: default_tension(),
            weighting: String::new(),
            highlight: String::new(),
            color_aliases: BTreeMap::new(),
        }
    }
}

impl DiagramConfig {
    /// Build render options from these settings
    ///
    /// # Errors
    /// Returns an error if `weighting` names an unknown strategy or a numeric
    /// setting is out of range
    pub fn to_render_options(&self) -> Result<RenderOptions, String> {
        let weighting = if self.weighting.is_empty() {
            Weighting::default()
        } else {
            self.weighting.parse::<Weighting>()?
        };
        Ok(RenderOptions {
            width: check_diagram_number("width", self.width)?,
            height: check_diagram_number("height", self.height)?,
            scale: check_diagram_number("scale", self.scale)?,
            tension: check_diagram_number("tension", self.tension)?,
            weighting,
            highlight: (!self.highlight.is_empty()).then(|| self.highlight.clone()),
            color_aliases: self.color_aliases.clone(),
        })
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Diagram settings
    #[serde(default)]
    pub diagram: DiagramConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default input file
    pub input: Option<String>,
    /// Override diagram output directory
    pub out_dir: Option<String>,
}

fn parse_number(key: &str, value: &str) -> Result<f64, String> {
    let number = value
        .parse::<f64>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))?;
    check_diagram_number(key, number)
}

/// Range check for numeric diagram settings
///
/// `tension` must lie in `[0, 1]`; `width`, `height` and `scale` must be
/// positive. All must be finite.
fn check_diagram_number(key: &str, value: f64) -> Result<f64, String> {
    let valid = match key {
        "tension" => (0.0..=1.0).contains(&value),
        _ => value.is_finite() && value > 0.0,
    };
    if valid {
        Ok(value)
    } else if key == "tension" {
        Err(format!("'tension' must be between 0 and 1, got {value}"))
    } else {
        Err(format!("'{key}' must be a positive number, got {value}"))
    }
}

impl Config {
    /// Get the `$EDGE_BUNDLE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/edgebundle`
    /// - macOS: `~/Library/Application Support/edgebundle`
    /// - Windows: `%APPDATA%\edgebundle`
    #[must_use]
    pub fn get_edgebundle_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edgebundle")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in; numeric diagram settings already default through serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.input, &defaults.paths.input),
            (&mut self.paths.out_dir, &defaults.paths.out_dir),
            (&mut self.diagram.weighting, &defaults.diagram.weighting),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }

        if self.diagram.color_aliases.is_empty() && !defaults.diagram.color_aliases.is_empty() {
            self.diagram
                .color_aliases
                .clone_from(&defaults.diagram.color_aliases);
            changed = true;
        }

        changed
    }

    /// Copy of this configuration with CLI overrides applied
    ///
    /// `self` is left as stored on disk.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut effective = self.clone();
        effective.apply_overrides(overrides);
        effective
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(input) = &overrides.input {
            self.paths.input.clone_from(input);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_edgebundle_dir`](Self::get_edgebundle_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_edgebundle_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$EDGE_BUNDLE` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_edgebundle_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$EDGE_BUNDLE` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.input = Self::expand_variables(&config.paths.input);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// Fields missing from an existing file are merged in from defaults and the
    /// file is rewritten. Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file).map(|content| Self::from_toml(&content)) {
            Ok(Ok(mut config)) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            _ => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as TOML at `config_file`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `input`, `out_dir`, `width`,
    /// `height`, `scale`, `tension`, `weighting`, `highlight`. Colour aliases
    /// are edited in the config file directly.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "input" => Some(self.paths.input.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "width" => Some(self.diagram.width.to_string()),
            "height" => Some(self.diagram.height.to_string()),
            "scale" => Some(self.diagram.scale.to_string()),
            "tension" => Some(self.diagram.tension.to_string()),
            "weighting" => Some(self.diagram.weighting.clone()),
            "highlight" => Some(self.diagram.highlight.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "input" => self.paths.input = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "width" => self.diagram.width = parse_number(key, value)?,
            "height" => self.diagram.height = parse_number(key, value)?,
            "scale" => self.diagram.scale = parse_number(key, value)?,
            "tension" => self.diagram.tension = parse_number(key, value)?,
            "weighting" => {
                value.parse::<Weighting>()?;
                self.diagram.weighting = value.to_ascii_lowercase();
            }
            "highlight" => self.diagram.highlight = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "input" => self.paths.input.clone_from(&defaults.paths.input),
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "width" => self.diagram.width = defaults.diagram.width,
            "height" => self.diagram.height = defaults.diagram.height,
            "scale" => self.diagram.scale = defaults.diagram.scale,
            "tension" => self.diagram.tension = defaults.diagram.tension,
            "weighting" => self
                .diagram
                .weighting
                .clone_from(&defaults.diagram.weighting),
            "highlight" => self
                .diagram
                .highlight
                .clone_from(&defaults.diagram.highlight),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  input = \"{}\"", self.paths.input)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[diagram]")?;
        writeln!(f, "  width = {}", self.diagram.width)?;
        writeln!(f, "  height = {}", self.diagram.height)?;
        writeln!(f, "  scale = {}", self.diagram.scale)?;
        writeln!(f, "  tension = {}", self.diagram.tension)?;
        writeln!(f, "  weighting = \"{}\"", self.diagram.weighting)?;
        writeln!(f, "  highlight = \"{}\"", self.diagram.highlight)?;

        if !self.diagram.color_aliases.is_empty() {
            writeln!(f, "\n[diagram.color_aliases]")?;
            for (name, alias) in &self.diagram.color_aliases {
                writeln!(f, "  {name} = \"{alias}\"")?;
            }
        }

        Ok(())
    }
}
