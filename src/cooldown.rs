//! Debounce gate shared by both hands.
//!
//! After a successful trigger the gate is `Disabled` until a fixed deadline
//! passes. The deadline is checked against the injected clock on every query,
//! so re-enabling happens without a background timer. A trigger attempt while
//! disabled is ignored and does not push the deadline back.

use crate::{Error, Result};
use log::debug;
use std::time::Duration;

/// Observable gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// A punch may trigger
    Allowed,
    /// Punches are ignored until the deadline passes
    Disabled,
}

/// Cooldown gate with a single-shot re-enable deadline
#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    reenable_at: Option<Duration>,
}

impl CooldownGate {
    /// Create an allowed gate with the given debounce interval
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            reenable_at: None,
        }
    }

    /// Create a gate from an interval in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if `seconds` is negative, not finite or too large for
    /// a `Duration`
    pub fn from_secs_f64(seconds: f64) -> Result<Self> {
        let cooldown = Duration::try_from_secs_f64(seconds).map_err(|e| {
            Error::InvalidInput(format!("Invalid cooldown of {seconds} seconds: {e}"))
        })?;
        Ok(Self::new(cooldown))
    }

    /// State at time `now`
    pub fn state(&self, now: Duration) -> GateState {
        match self.reenable_at {
            Some(deadline) if now < deadline => GateState::Disabled,
            _ => GateState::Allowed,
        }
    }

    pub fn is_allowed(&self, now: Duration) -> bool {
        self.state(now) == GateState::Allowed
    }

    /// Try to pass the gate at time `now`
    ///
    /// Returns `true` and disables the gate for the cooldown interval when
    /// allowed, `false` otherwise.
    pub fn try_trigger(&mut self, now: Duration) -> bool {
        if !self.is_allowed(now) {
            return false;
        }
        // An unrepresentable deadline never passes
        let deadline = now.checked_add(self.cooldown).unwrap_or(Duration::MAX);
        debug!("Cooldown gate disabled until {:.3}s", deadline.as_secs_f64());
        self.reenable_at = Some(deadline);
        true
    }

    /// Pending re-enable deadline, if the gate was ever triggered
    pub fn reenable_at(&self) -> Option<Duration> {
        self.reenable_at
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Force the gate back to `Allowed`
    pub fn reset(&mut self) {
        self.reenable_at = None;
    }
}
