//! Temporal filtering of normalized hand positions.
//!
//! Each side keeps a fixed-capacity history of recent samples. The history
//! yields a smoothed position (plain or recency-weighted mean) and a depth
//! velocity estimate (first difference across the full window).

/// Fixed-capacity ring buffer of optional samples
pub mod history;

/// Per-side sliding-window filter with smoothing and velocity estimation
pub mod sliding_window;

/// Summary statistics over a window of depth values
pub mod statistics;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub use history::HandHistory;
pub use sliding_window::SlidingWindowFilter;
pub use statistics::Statistics;

/// How samples inside the window are weighted when smoothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Arithmetic mean of present samples
    Uniform,
    /// Sample at window position i gets weight i + 1
    #[default]
    Linear,
}

impl Weighting {
    /// Weight for a sample at `position` (0 = oldest) in the window
    pub fn weight(self, position: usize) -> f64 {
        match self {
            Weighting::Uniform => 1.0,
            Weighting::Linear => (position + 1) as f64,
        }
    }

    /// Scheme name
    pub fn name(self) -> &'static str {
        match self {
            Weighting::Uniform => "uniform",
            Weighting::Linear => "linear",
        }
    }
}

/// Parse a weighting scheme by name
///
/// # Errors
///
/// Returns an error if the name is not recognised
pub fn create_weighting(name: &str) -> Result<Weighting> {
    match name.to_lowercase().as_str() {
        "uniform" | "mean" | "average" => Ok(Weighting::Uniform),
        "linear" | "weighted" | "recency" => Ok(Weighting::Linear),
        _ => Err(Error::FilterError(format!("Unknown weighting scheme: {name}"))),
    }
}
