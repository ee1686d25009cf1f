//! Punch detection core for skeleton-tracked "screen crack" games.
//!
//! Given per-tick skeletal frames from a depth sensor, this library decides
//! when the player has thrown a punch at the screen and where on screen it
//! landed. It does not talk to a sensor or draw anything itself; both sit
//! behind the [`source::SkeletonSource`] and [`pipeline::Renderer`] traits.
//!
//! Each tick runs three stages:
//! 1. Normalize both hands into a body-relative frame (shoulder width, torso
//!    length and a running arm-length estimate)
//! 2. Smooth each hand over a short sliding window and estimate its depth
//!    velocity toward the camera
//! 3. Detect punches (fully extended arm plus fast approach), debounced by a
//!    cooldown gate shared by both hands
//!
//! # Examples
//!
//! ## Running the pipeline
//!
//! ```no_run
//! use screen_punch::{
//!     config::Config,
//!     pipeline::NullRenderer,
//!     source::RecordedSource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("punch.yaml")?;
//! let mut pipeline = config.build_pipeline()?;
//!
//! let mut source = RecordedSource::from_file("session.yaml")?;
//! let stats = pipeline.run(&mut source, &mut NullRenderer, None)?;
//! println!("{} punches in {} ticks", stats.punches, stats.ticks);
//! # Ok(())
//! # }
//! ```
//!
//! ## Filtering hand positions
//!
//! ```
//! use screen_punch::{
//!     filters::{create_weighting, SlidingWindowFilter},
//!     skeleton::{NormalizedHand, Side},
//! };
//!
//! # fn main() -> screen_punch::Result<()> {
//! let mut filter = SlidingWindowFilter::new(4, create_weighting("linear")?)?;
//!
//! for z in [0.6, 0.7, 0.8, 0.9] {
//!     filter.push(Side::Right, Some(NormalizedHand::new(0.0, 0.0, z)));
//! }
//!
//! let velocity = filter.velocity(Side::Right).unwrap_or_default();
//! assert!((velocity - 0.3).abs() < 1e-9);
//! assert!(filter.velocity(Side::Left).is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving ticks by hand
//!
//! ```
//! use screen_punch::{
//!     assets::SequentialPicker,
//!     clock::ManualClock,
//!     config::Config,
//!     pipeline::PunchPipeline,
//!     skeleton::SensorFrame,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> screen_punch::Result<()> {
//! let clock = ManualClock::new();
//! let mut pipeline = PunchPipeline::with_collaborators(
//!     &Config::default(),
//!     Arc::new(clock.clone()),
//!     Box::new(SequentialPicker::new(0.5)),
//! )?;
//!
//! // Nobody in view: nothing to draw, nothing to fire
//! let output = pipeline.process_frame(&SensorFrame::empty());
//! assert!(output.events.is_empty());
//! # Ok(())
//! # }
//! ```

/// Crack decal and sound selection
pub mod assets;

/// Running arm-length calibration
pub mod calibration;

/// Time sources for the cooldown gate
pub mod clock;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Punch debouncing
pub mod cooldown;

/// Punch detection
pub mod detector;

/// Error types and result handling
pub mod error;

/// Sliding-window smoothing and velocity estimation
pub mod filters;

/// Body-relative hand normalization
pub mod normalizer;

/// Per-tick pipeline and renderer interface
pub mod pipeline;

/// Screen-space mapping
pub mod screen;

/// Skeletal frame types
pub mod skeleton;

/// Skeleton sources
pub mod source;

/// Numeric helpers
pub mod utils;

pub use error::{Error, Result};
