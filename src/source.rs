//! Sensor collaborator interface and in-process implementations.
//!
//! A source yields one [`SensorFrame`] per tick. A frame with no tracked body
//! means "nothing this tick" (user out of view, device hiccup); `Ok(None)`
//! means the stream has ended.

use crate::{skeleton::SensorFrame, Error, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Supplier of skeletal frames
pub trait SkeletonSource {
    /// Next frame, or `None` once the stream is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device or file fails
    fn next_frame(&mut self) -> Result<Option<SensorFrame>>;
}

/// In-memory queue of frames, for scripted scenarios
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<SensorFrame>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = SensorFrame>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue another frame
    pub fn push(&mut self, frame: SensorFrame) {
        self.frames.push_back(frame);
    }

    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl SkeletonSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<SensorFrame>> {
        Ok(self.frames.pop_front())
    }
}

/// On-disk skeleton recording
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recording {
    /// Nominal capture rate, informational only
    #[serde(default)]
    pub frame_rate: Option<f64>,

    /// Frames in capture order
    #[serde(default)]
    pub frames: Vec<SensorFrame>,
}

impl Recording {
    /// Parse a recording from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid recording
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::RecordingError(format!("Failed to parse recording: {e}")))
    }

    /// Load a recording from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Write the recording to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::RecordingError(format!("Failed to serialize recording: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Replays a [`Recording`] frame by frame
#[derive(Debug, Clone)]
pub struct RecordedSource {
    frames: std::vec::IntoIter<SensorFrame>,
}

impl RecordedSource {
    /// Replay an in-memory recording
    #[must_use]
    pub fn new(recording: Recording) -> Self {
        Self {
            frames: recording.frames.into_iter(),
        }
    }

    /// Open a recording file for replay
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let recording = Recording::from_file(path)?;
        info!(
            "Loaded skeleton recording {} ({} frames)",
            path.display(),
            recording.frames.len()
        );
        Ok(Self::new(recording))
    }
}

impl SkeletonSource for RecordedSource {
    fn next_frame(&mut self) -> Result<Option<SensorFrame>> {
        Ok(self.frames.next())
    }
}
