use nalgebra::Vector3;

use super::{HandHistory, Statistics, Weighting};
use crate::{
    skeleton::{HandPair, NormalizedHand, Side},
    Result,
};

/// Sliding-window filter over normalized hand positions, one history per side
#[derive(Debug, Clone)]
pub struct SlidingWindowFilter {
    weighting: Weighting,
    histories: [HandHistory<NormalizedHand>; 2],
}

impl SlidingWindowFilter {
    /// Create a filter with window capacity N
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0
    pub fn new(capacity: usize, weighting: Weighting) -> Result<Self> {
        Ok(Self {
            weighting,
            histories: [HandHistory::new(capacity)?, HandHistory::new(capacity)?],
        })
    }

    /// Append one tick's sample (or a placeholder) for a side
    pub fn push(&mut self, side: Side, sample: Option<NormalizedHand>) {
        self.histories[side.index()].push(sample);
    }

    /// Append both sides of a normalizer result
    pub fn push_pair(&mut self, hands: &HandPair) {
        for side in Side::ALL {
            self.push(side, hands.get(side).copied());
        }
    }

    /// Smoothed position over the present samples in the window
    pub fn smoothed(&self, side: Side) -> Option<NormalizedHand> {
        let mut total_weight = 0.0;
        let mut acc = Vector3::<f64>::zeros();
        for (position, sample) in self.histories[side.index()].present() {
            let weight = self.weighting.weight(position);
            acc += sample.position * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            Some(NormalizedHand { position: acc / total_weight })
        } else {
            None
        }
    }

    /// Depth velocity: newest z minus oldest z across a full window
    ///
    /// Only defined once the window holds N present samples.
    pub fn velocity(&self, side: Side) -> Option<f64> {
        let history = &self.histories[side.index()];
        if !history.is_saturated() {
            return None;
        }
        Some(history.newest()?.z() - history.oldest()?.z())
    }

    /// Depth acceleration: change between the newest and the oldest step
    ///
    /// Requires a full window of at least three present samples.
    pub fn acceleration(&self, side: Side) -> Option<f64> {
        let history = &self.histories[side.index()];
        let n = history.capacity();
        if n < 3 || !history.is_saturated() {
            return None;
        }
        let newest_step = history.get(n - 1)?.z() - history.get(n - 2)?.z();
        let oldest_step = history.get(1)?.z() - history.get(0)?.z();
        Some(newest_step - oldest_step)
    }

    /// Statistics of z over the present samples in the window
    pub fn depth_stats(&self, side: Side) -> Option<Statistics> {
        Statistics::from_values(self.histories[side.index()].present().map(|(_, s)| s.z()))
    }

    /// Read-only access to a side's history
    pub fn history(&self, side: Side) -> &HandHistory<NormalizedHand> {
        &self.histories[side.index()]
    }

    pub fn capacity(&self) -> usize {
        self.histories[0].capacity()
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Resize both windows; shrinking drops the oldest samples
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        for history in &mut self.histories {
            history.set_capacity(capacity)?;
        }
        Ok(())
    }

    /// Clear both histories
    pub fn reset(&mut self) {
        for history in &mut self.histories {
            history.clear();
        }
    }
}
