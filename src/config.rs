use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// File name searched for by `RunConfig::discover`
pub const CONFIG_FILE: &str = "weerun.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "WEERUN_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub harness: HarnessConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Export invoked as the program entry point
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Module paths containing this marker print results in fixed-point form
    #[serde(default = "default_fixed_marker")]
    pub fixed_marker: String,

    #[serde(default = "default_fixed_precision")]
    pub fixed_precision: usize,

    /// Argument suffix selecting a float argument
    #[serde(default = "default_float_suffix")]
    pub float_suffix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Attach wasm backtraces to trap descriptions
    #[serde(default)]
    pub backtraces: bool,

    /// Maximum wasm stack size in bytes
    #[serde(default)]
    pub max_wasm_stack: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormatSetting,

    /// Directory for daily rolling log files (stderr when unset)
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Extra filter directives, comma separated (e.g. "heap=trace")
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatSetting {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            fixed_marker: default_fixed_marker(),
            fixed_precision: default_fixed_precision(),
            float_suffix: default_float_suffix(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormatSetting::default(),
            file: None,
            filter: None,
        }
    }
}

fn default_entry() -> String { "main".to_string() }
fn default_fixed_marker() -> String { "_d.wee.wasm".to_string() }
fn default_fixed_precision() -> usize { 6 }
fn default_float_suffix() -> String { "d".to_string() }
fn default_log_level() -> String { "warn".to_string() }

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path).map_err(|source| HarnessError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|message| HarnessError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Find `weerun.toml` in the current directory or its parents
    pub fn discover() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok();

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }
            current = dir.parent().map(|p| p.to_path_buf());
        }

        None
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path wins, then `WEERUN_CONFIG`, then discovery. No file
    /// at all means defaults; a file that is present but broken is an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, HarnessError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        match Self::discover() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Whether results of the module at `path` print in fixed-point form
    pub fn fixed_point_for(&self, path: &Path) -> Option<usize> {
        let marker = &self.harness.fixed_marker;
        if !marker.is_empty() && path.to_string_lossy().contains(marker.as_str()) {
            Some(self.harness.fixed_precision)
        } else {
            None
        }
    }

    /// Generate default configuration file content
    pub fn generate_default() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate config"))
    }
}
