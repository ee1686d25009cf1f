//! Per-tick punch detection pipeline.
//!
//! Each tick runs normalize -> filter -> detect on the primary body of one
//! sensor frame and hands the result to a renderer. The pipeline never fails
//! on missing tracking data; only collaborator errors propagate.

use crate::{
    assets::{AssetPicker, CrackSelector, RandomPicker},
    clock::{Clock, MonotonicClock},
    config::Config,
    cooldown::GateState,
    detector::{PunchDetector, PunchEvent},
    filters::{SlidingWindowFilter, Statistics},
    normalizer::BodyNormalizer,
    screen::{ScreenMapper, ScreenPoint},
    skeleton::{NormalizedHand, RawBodyFrame, SensorFrame, Side},
    source::SkeletonSource,
    Result,
};
use log::{debug, info, trace};
use std::sync::Arc;
use std::time::Instant;

/// What the renderer needs to draw one hand this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandView {
    pub side: Side,
    /// Normalized position this tick; `None` when the side is untracked
    pub normalized: Option<NormalizedHand>,
    /// Smoothed position over the filter window
    pub smoothed: Option<NormalizedHand>,
    /// Smoothed position in screen pixels
    pub anchor: Option<ScreenPoint>,
    /// Closeness score of this tick's position
    pub alpha: Option<u8>,
    /// Depth velocity over the full window
    pub velocity: Option<f64>,
    /// Arm fully extended toward the camera
    pub extended: bool,
    /// Spread of depth over the window's present samples
    pub depth_stats: Option<Statistics>,
}

impl HandView {
    fn untracked(side: Side) -> Self {
        Self {
            side,
            normalized: None,
            smoothed: None,
            anchor: None,
            alpha: None,
            velocity: None,
            extended: false,
            depth_stats: None,
        }
    }

    /// Whether this tick carried a valid position for the hand
    pub fn is_tracked(&self) -> bool {
        self.normalized.is_some()
    }

    /// Hand held still in depth: windowed z std-dev at or below the threshold
    pub fn is_idle(&self, std_dev_threshold: f64) -> bool {
        self.depth_stats.is_some_and(|stats| !stats.is_moving(std_dev_threshold))
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Zero-based tick counter
    pub tick: u64,
    /// Left and right hand, indexed by [`Side::index`]
    pub hands: [HandView; 2],
    /// Punches accepted this tick (at most one while the gate is shared)
    pub events: Vec<PunchEvent>,
}

impl TickOutput {
    pub fn hand(&self, side: Side) -> &HandView {
        &self.hands[side.index()]
    }
}

/// Renderer collaborator
pub trait Renderer {
    /// Present one tick's output
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot draw
    fn present(&mut self, output: &TickOutput) -> Result<()>;
}

/// Renderer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _output: &TickOutput) -> Result<()> {
        Ok(())
    }
}

/// Totals for a [`PunchPipeline::run`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Ticks processed
    pub ticks: u64,
    /// Ticks with a tracked body
    pub tracked_ticks: u64,
    /// Accepted punches
    pub punches: u64,
}

/// Normalizer, filter and detector wired together
#[derive(Debug)]
pub struct PunchPipeline {
    normalizer: BodyNormalizer,
    filter: SlidingWindowFilter,
    mapper: ScreenMapper,
    detector: PunchDetector,
    cracks: CrackSelector,
    tick: u64,
}

impl PunchPipeline {
    /// Build a pipeline using the system clock and random asset picks
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_collaborators(config, Arc::new(MonotonicClock::new()), Box::new(RandomPicker::new()))
    }

    /// Build a pipeline with an injected clock and asset picker
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_collaborators(
        config: &Config,
        clock: Arc<dyn Clock>,
        picker: Box<dyn AssetPicker>,
    ) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing punch pipeline: window {} ({}), velocity threshold {}, cooldown {}s",
            config.filter.history_window,
            config.filter.weighting.name(),
            config.detection.velocity_threshold,
            config.detection.cooldown_seconds
        );

        Ok(Self {
            normalizer: BodyNormalizer::new(&config.normalization)?,
            filter: SlidingWindowFilter::new(config.filter.history_window, config.filter.weighting)?,
            mapper: ScreenMapper::new(config.screen.width, config.screen.height)?,
            detector: PunchDetector::new(&config.detection, config.normalization.depth_convention, clock)?,
            cracks: CrackSelector::new(&config.assets, config.screen.width, picker)?,
            tick: 0,
        })
    }

    /// Process one sensor frame; the first tracked body is used
    pub fn process_frame(&mut self, frame: &SensorFrame) -> TickOutput {
        self.process_body(frame.primary_body())
    }

    /// Process one tick for a body, or for no body at all
    pub fn process_body(&mut self, body: Option<&RawBodyFrame>) -> TickOutput {
        let hands = self.normalizer.normalize(body);
        self.filter.push_pair(&hands);

        let mut views = [HandView::untracked(Side::Left), HandView::untracked(Side::Right)];
        let mut events = Vec::new();

        for side in Side::ALL {
            let normalized = hands.get(side).copied();
            let smoothed = self.filter.smoothed(side);
            let anchor = smoothed.as_ref().map(|s| self.mapper.anchor(s));
            let alpha = normalized.as_ref().map(|h| self.detector.alpha(h));
            let velocity = self.filter.velocity(side);

            if let Some(mut event) = self.detector.detect(side, normalized.as_ref(), anchor, velocity) {
                event.decal = Some(self.cracks.select());
                events.push(event);
            }

            views[side.index()] = HandView {
                side,
                normalized,
                smoothed,
                anchor,
                alpha,
                velocity,
                extended: alpha.is_some_and(|a| self.detector.is_extended(a)),
                depth_stats: self.filter.depth_stats(side),
            };
        }

        let output = TickOutput {
            tick: self.tick,
            hands: views,
            events,
        };
        trace!(
            "Tick {}: left tracked {}, right tracked {}, {} punch(es)",
            output.tick,
            output.hands[0].is_tracked(),
            output.hands[1].is_tracked(),
            output.events.len()
        );
        self.tick += 1;
        output
    }

    /// Drive ticks from a source into a renderer
    ///
    /// Stops when the source ends or after `max_ticks` ticks.
    ///
    /// # Errors
    ///
    /// Propagates source and renderer failures
    pub fn run<S, R>(&mut self, source: &mut S, renderer: &mut R, max_ticks: Option<u64>) -> Result<RunStats>
    where
        S: SkeletonSource + ?Sized,
        R: Renderer + ?Sized,
    {
        info!("Starting punch pipeline loop");
        let start_time = Instant::now();
        let mut stats = RunStats::default();

        while max_ticks.map_or(true, |max| stats.ticks < max) {
            let Some(frame) = source.next_frame()? else {
                info!("Skeleton source exhausted");
                break;
            };

            let output = self.process_frame(&frame);
            if frame.primary_body().is_some() {
                stats.tracked_ticks += 1;
            }
            stats.punches += output.events.len() as u64;
            stats.ticks += 1;

            renderer.present(&output)?;
        }

        debug!(
            "Processed {} ticks in {:.3}s",
            stats.ticks,
            start_time.elapsed().as_secs_f64()
        );
        info!(
            "Punch pipeline stopped: {} ticks, {} tracked, {} punches",
            stats.ticks, stats.tracked_ticks, stats.punches
        );
        Ok(stats)
    }

    /// Change the filter window at runtime
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0
    pub fn set_history_window(&mut self, capacity: usize) -> Result<()> {
        self.filter.set_capacity(capacity)
    }

    /// Current cooldown gate state
    pub fn gate_state(&self) -> GateState {
        self.detector.gate_state()
    }

    pub fn filter(&self) -> &SlidingWindowFilter {
        &self.filter
    }

    pub fn normalizer(&self) -> &BodyNormalizer {
        &self.normalizer
    }

    pub fn mapper(&self) -> &ScreenMapper {
        &self.mapper
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Replace the asset picker
    pub fn set_asset_picker(&mut self, picker: Box<dyn AssetPicker>) {
        self.cracks.set_picker(picker);
    }

    /// Clear history, calibration and cooldown
    pub fn reset(&mut self) {
        self.normalizer.reset();
        self.filter.reset();
        self.detector.reset();
    }
}
