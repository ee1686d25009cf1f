//! Constants used throughout the library

/// Number of joints a body frame carries
pub const NUM_BODY_JOINTS: usize = 10;

/// Maximum alpha ("closeness to camera") value
pub const ALPHA_MAX: u8 = 255;

/// Default sliding-window capacity (N)
pub const DEFAULT_HISTORY_WINDOW: usize = 4;

/// Default number of arm-length samples averaged for calibration (K)
pub const DEFAULT_ARM_LENGTH_WINDOW: usize = 50;

/// Default minimum depth delta across the window that qualifies as a punch
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.4;

/// Default debounce interval between two accepted punches, in seconds
pub const DEFAULT_COOLDOWN_SECONDS: f64 = 0.5;

/// Default linear alpha scale
pub const DEFAULT_ALPHA_SCALE: f64 = 1.5;

/// Default normalization multipliers
pub const DEFAULT_SHOULDER_WIDTH_SCALE: f64 = 1.0;
pub const DEFAULT_NECK_SPINE_SCALE: f64 = 1.0;

/// Default screen size in pixels
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Crack decal width bounds, as fractions of the screen width
pub const DEFAULT_MIN_CRACK_WIDTH: f64 = 0.1;
pub const DEFAULT_MAX_CRACK_WIDTH: f64 = 0.1 + 1.0 / 9.0;

/// Lengths below this are treated as degenerate geometry
pub const EPSILON: f64 = 1e-9;
