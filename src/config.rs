//! Configuration management for the punch detection pipeline

use crate::{
    constants::{
        DEFAULT_ARM_LENGTH_WINDOW, DEFAULT_COOLDOWN_SECONDS, DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_CRACK_WIDTH,
        DEFAULT_MIN_CRACK_WIDTH, DEFAULT_NECK_SPINE_SCALE, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
        DEFAULT_SHOULDER_WIDTH_SCALE, DEFAULT_VELOCITY_THRESHOLD, ALPHA_MAX,
    },
    filters::Weighting,
    pipeline::PunchPipeline,
    screen::AlphaMapping,
    skeleton::DepthConvention,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Body-relative normalization
    pub normalization: NormalizationConfig,

    /// Sliding-window filter
    pub filter: FilterConfig,

    /// Punch detection and debouncing
    pub detection: DetectionConfig,

    /// Target screen
    pub screen: ScreenConfig,

    /// Crack decal selection
    pub assets: AssetConfig,
}

/// Normalization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Multiplier applied to the shoulder width divisor (x)
    pub shoulder_width_scale: f64,

    /// Multiplier applied to the neck-spine length divisor (y)
    pub neck_spine_scale: f64,

    /// Number of arm-length samples averaged for calibration (K)
    pub arm_length_window: usize,

    /// Sign of normalized depth
    pub depth_convention: DepthConvention,
}

/// Sliding-window filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Window capacity (N)
    pub history_window: usize,

    /// Smoothing weights
    pub weighting: Weighting,
}

/// Detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Closeness to alpha mapping
    pub alpha_mapping: AlphaMapping,

    /// Alpha at or above which an arm counts as fully extended
    pub extension_alpha: u8,

    /// Minimum depth delta across the window toward the camera
    pub velocity_threshold: f64,

    /// Debounce interval after an accepted punch
    pub cooldown_seconds: f64,
}

/// Screen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

/// Crack decal parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Number of crack images to choose from
    pub crack_images: usize,

    /// Number of impact sounds to choose from
    pub crack_sounds: usize,

    /// Smallest crack width, as a fraction of screen width
    pub min_crack_width: f64,

    /// Largest crack width, as a fraction of screen width
    pub max_crack_width: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            shoulder_width_scale: DEFAULT_SHOULDER_WIDTH_SCALE,
            neck_spine_scale: DEFAULT_NECK_SPINE_SCALE,
            arm_length_window: DEFAULT_ARM_LENGTH_WINDOW,
            depth_convention: DepthConvention::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            weighting: Weighting::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            alpha_mapping: AlphaMapping::default(),
            extension_alpha: ALPHA_MAX,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            crack_images: 0,
            crack_sounds: 0,
            min_crack_width: DEFAULT_MIN_CRACK_WIDTH,
            max_crack_width: DEFAULT_MAX_CRACK_WIDTH,
        }
    }
}

impl NormalizationConfig {
    /// Validate normalization parameters
    ///
    /// # Errors
    ///
    /// Returns an error if a scale is not positive or the calibration window is 0
    pub fn validate(&self) -> Result<()> {
        if !(self.shoulder_width_scale.is_finite() && self.shoulder_width_scale > 0.0) {
            return Err(Error::ConfigError("Shoulder width scale must be positive".to_string()));
        }
        if !(self.neck_spine_scale.is_finite() && self.neck_spine_scale > 0.0) {
            return Err(Error::ConfigError("Neck-spine scale must be positive".to_string()));
        }
        if self.arm_length_window == 0 {
            return Err(Error::ConfigError(
                "Arm length window size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl FilterConfig {
    /// Validate filter parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the window size is 0
    pub fn validate(&self) -> Result<()> {
        if self.history_window == 0 {
            return Err(Error::ConfigError("History window size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl DetectionConfig {
    /// Validate detection parameters
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite thresholds, or an invalid alpha mapping
    pub fn validate(&self) -> Result<()> {
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold >= 0.0) {
            return Err(Error::ConfigError(
                "Velocity threshold must be a non-negative number".to_string(),
            ));
        }
        if Duration::try_from_secs_f64(self.cooldown_seconds).is_err() {
            return Err(Error::ConfigError(format!(
                "Cooldown must be a non-negative number of seconds, got {}",
                self.cooldown_seconds
            )));
        }
        self.alpha_mapping.validate()
    }
}

impl ScreenConfig {
    /// Validate screen parameters
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is 0
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ConfigError("Screen dimensions must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl AssetConfig {
    /// Validate asset parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the crack width fractions are outside (0, 1] or min > max
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
        if !in_range(self.min_crack_width) || !in_range(self.max_crack_width) {
            return Err(Error::ConfigError(
                "Crack widths must be fractions in (0, 1] of the screen width".to_string(),
            ));
        }
        if self.min_crack_width > self.max_crack_width {
            return Err(Error::ConfigError(
                "Minimum crack width must not exceed maximum crack width".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found
    pub fn validate(&self) -> Result<()> {
        self.normalization.validate()?;
        self.filter.validate()?;
        self.detection.validate()?;
        self.screen.validate()?;
        self.assets.validate()?;
        Ok(())
    }

    /// Build a pipeline from this configuration
    ///
    /// Uses the system clock and random asset picks; see
    /// [`PunchPipeline::with_collaborators`] to inject either.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn build_pipeline(&self) -> Result<PunchPipeline> {
        PunchPipeline::new(self)
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Punch detection configuration

# Body-relative normalization
normalization:
  shoulder_width_scale: 1.0
  neck_spine_scale: 1.0
  arm_length_window: 50
  depth_convention: toward_camera_positive

# Sliding-window filter
filter:
  history_window: 4
  weighting: linear

# Punch detection
detection:
  alpha_mapping:
    kind: linear
    scale: 1.5
    offset: 0.0
  extension_alpha: 255
  velocity_threshold: 0.4
  cooldown_seconds: 0.5

# Target screen
screen:
  width: 1920
  height: 1080

# Crack decals
assets:
  crack_images: 0
  crack_sounds: 0
  min_crack_width: 0.1
  max_crack_width: 0.2111111111111111
"#;
