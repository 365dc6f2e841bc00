//! Configuration schema types for `beatloop.toml`
//!
//! Defines the structure and validation rules for detection, extension and
//! display settings.

use serde::{Deserialize, Serialize};

use crate::detect::DetectOptions;
use crate::extend::ExtendOptions;
use crate::loops::SliceSize;

/// Extension planner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendConfig {
    /// Slice tried first when a LOOP type allows both
    #[serde(default)]
    pub default_slice: SliceSize,
    /// Try quartered first whenever the LOOP type supports it
    #[serde(default = "default_true")]
    pub prefer_quartered: bool,
}

impl Default for ExtendConfig {
    fn default() -> Self {
        Self { default_slice: SliceSize::Halved, prefer_quartered: true }
    }
}

/// Display settings for LOOP type names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Names longer than this collapse to "First + N more"
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,
    /// ...but only when they have more words than this
    #[serde(default = "default_max_label_words")]
    pub max_label_words: usize,
}

fn default_max_label_len() -> usize {
    20
}

fn default_max_label_words() -> usize {
    2
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { max_label_len: default_max_label_len(), max_label_words: default_max_label_words() }
    }
}

/// Detector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Report horizontal-flip matches as `flipped`
    #[serde(default = "default_true")]
    pub report_flipped: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self { report_flipped: true }
    }
}

fn default_true() -> bool {
    true
}

/// Complete beatloop.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatloopConfig {
    /// Extension settings
    #[serde(default)]
    pub extend: ExtendConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Detection settings
    #[serde(default)]
    pub detect: DetectConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "display.max_label_len")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "beatloop.toml: '{}' {}", self.field, self.message)
    }
}

impl BeatloopConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.display.max_label_len == 0 {
            errors.push(ConfigValidationError {
                field: "display.max_label_len".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.display.max_label_words == 0 {
            errors.push(ConfigValidationError {
                field: "display.max_label_words".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Detector options from the `[detect]` section
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions { report_flipped: self.detect.report_flipped }
    }

    /// Planner options from the `[extend]` section
    pub fn extend_options(&self) -> ExtendOptions {
        ExtendOptions {
            slice: None,
            default_slice: self.extend.default_slice,
            prefer_quartered: self.extend.prefer_quartered,
        }
    }
}
