//! Running arm-length calibration used as the depth-normalization divisor.

use crate::{Error, Result, constants::EPSILON};
use std::collections::VecDeque;

/// Running average over the last K arm-length samples of one side
#[derive(Debug, Clone)]
pub struct ArmLengthEstimate {
    window_size: usize,
    samples: VecDeque<f64>,
}

impl ArmLengthEstimate {
    /// Create an empty estimate averaging at most `window_size` samples
    ///
    /// # Errors
    ///
    /// Returns an error if `window_size` is 0
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidInput(
                "Arm length window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            samples: VecDeque::with_capacity(window_size),
        })
    }

    /// Record one arm-length sample, evicting the oldest beyond capacity
    ///
    /// Non-finite samples are ignored.
    pub fn push(&mut self, length: f64) {
        if !length.is_finite() {
            return;
        }
        if self.samples.len() >= self.window_size {
            self.samples.pop_front();
        }
        self.samples.push_back(length);
    }

    /// Mean arm length, or `None` if no usable sample has been recorded
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        (mean > EPSILON).then_some(mean)
    }

    /// Number of samples currently averaged
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples averaged
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
