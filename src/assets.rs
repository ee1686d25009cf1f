//! Decal and sound selection for accepted punches.
//!
//! The pipeline only needs "pick one of K options"; which files those indexes
//! refer to is the renderer's business.

use crate::{config::AssetConfig, utils::lerp, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Source of asset choices
pub trait AssetPicker: Send {
    /// Pick an index in `0..count`; `None` when `count` is 0
    fn pick(&mut self, count: usize) -> Option<usize>;

    /// A sample in `[0, 1)` used to vary decal size
    fn unit(&mut self) -> f64;
}

/// Uniformly random picks
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Picker seeded from system entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picker
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> Option<usize> {
        (count > 0).then(|| self.rng.gen_range(0..count))
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic picker cycling through indexes in order
#[derive(Debug, Clone, Default)]
pub struct SequentialPicker {
    next: usize,
    unit: f64,
}

impl SequentialPicker {
    /// Picker whose size sample is always `unit`
    #[must_use]
    pub fn new(unit: f64) -> Self {
        Self { next: 0, unit }
    }
}

impl AssetPicker for SequentialPicker {
    fn pick(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let index = self.next % count;
        self.next = self.next.wrapping_add(1);
        Some(index)
    }

    fn unit(&mut self) -> f64 {
        self.unit
    }
}

/// What to draw and play for one accepted punch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackDecal {
    /// Index of the crack image, `None` when no images are configured
    pub image: Option<usize>,
    /// Index of the impact sound, `None` when no sounds are configured
    pub sound: Option<usize>,
    /// Decal width in pixels
    pub width: u32,
}

/// Chooses crack decals using an injected picker
pub struct CrackSelector {
    crack_images: usize,
    crack_sounds: usize,
    min_width: f64,
    max_width: f64,
    picker: Box<dyn AssetPicker>,
}

impl CrackSelector {
    /// Create a selector for a screen `screen_width` pixels wide
    ///
    /// # Errors
    ///
    /// Returns an error if the width fractions are invalid
    pub fn new(config: &AssetConfig, screen_width: u32, picker: Box<dyn AssetPicker>) -> Result<Self> {
        config.validate()?;
        let w = f64::from(screen_width);
        Ok(Self {
            crack_images: config.crack_images,
            crack_sounds: config.crack_sounds,
            min_width: w * config.min_crack_width,
            max_width: w * config.max_crack_width,
            picker,
        })
    }

    /// Choose the decal for the next crack
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Width is bounded by the screen width
    pub fn select(&mut self) -> CrackDecal {
        let image = self.picker.pick(self.crack_images);
        let sound = self.picker.pick(self.crack_sounds);
        let unit = self.picker.unit();
        CrackDecal {
            image,
            sound,
            width: lerp(self.min_width, self.max_width, unit).round() as u32,
        }
    }

    /// Swap the picker, e.g. for a seeded one
    pub fn set_picker(&mut self, picker: Box<dyn AssetPicker>) {
        self.picker = picker;
    }
}

impl std::fmt::Debug for CrackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrackSelector")
            .field("crack_images", &self.crack_images)
            .field("crack_sounds", &self.crack_sounds)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}
