//! Reset, spin and reveal steps of a single spin.
//!
//! A spin moves through `Idle -> Resetting -> Spinning -> Idle`. Delays are
//! handed to a [`Scheduler`]; the host calls [`SpinSequence::advance`] with the
//! step it was asked to deliver once the delay elapses. Requests made while a
//! spin is in flight are ignored, never queued or preempted.

use crate::spin::{SpinOutcome, SpinResolver};
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTimings {
    /// Pause after resetting rotation so the zero frame renders first.
    pub settle_delay: Duration,
    /// Length of the rotation animation.
    pub spin_duration: Duration,
}

impl Default for SpinTimings {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            spin_duration: DEFAULT_SPIN_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStep {
    Settled,
    Finished,
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, step: SpinStep);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle { winner: Option<usize> },
    Resetting { outcome: SpinOutcome },
    Spinning { outcome: SpinOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    Busy,
    TooFewOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRequest {
    Started,
    Ignored(IgnoredReason),
}

/// What the host should render after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinTransition {
    /// Animate from zero to `to` over the spin duration.
    Rotate { to: f64, duration: Duration },
    Reveal { winner_index: usize },
}

#[derive(Debug, Clone)]
pub struct SpinSequence {
    phase: Phase,
    rotation: f64,
    timings: SpinTimings,
}

impl Default for SpinSequence {
    fn default() -> Self {
        Self::new(SpinTimings::default())
    }
}

impl SpinSequence {
    pub fn new(timings: SpinTimings) -> Self {
        Self {
            phase: Phase::Idle { winner: None },
            rotation: 0.0,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rotation the wheel should be at (or animating towards).
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn timings(&self) -> SpinTimings {
        self.timings
    }

    /// Takes effect from the next spin.
    pub fn set_timings(&mut self, timings: SpinTimings) {
        self.timings = timings;
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle { .. })
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle { winner } => winner,
            _ => None,
        }
    }

    pub fn request_spin<R, S>(
        &mut self,
        total_items: usize,
        resolver: &mut SpinResolver<R>,
        scheduler: &mut S,
    ) -> SpinRequest
    where
        R: Rng,
        S: Scheduler + ?Sized,
    {
        if self.is_busy() {
            return SpinRequest::Ignored(IgnoredReason::Busy);
        }
        let Ok(outcome) = resolver.resolve(total_items) else {
            return SpinRequest::Ignored(IgnoredReason::TooFewOptions);
        };

        self.rotation = 0.0;
        self.phase = Phase::Resetting { outcome };
        scheduler.schedule(self.timings.settle_delay, SpinStep::Settled);
        SpinRequest::Started
    }

    pub fn advance<S>(&mut self, step: SpinStep, scheduler: &mut S) -> Option<SpinTransition>
    where
        S: Scheduler + ?Sized,
    {
        match (self.phase, step) {
            (Phase::Resetting { outcome }, SpinStep::Settled) => {
                self.rotation = outcome.final_rotation;
                self.phase = Phase::Spinning { outcome };
                scheduler.schedule(self.timings.spin_duration, SpinStep::Finished);
                Some(SpinTransition::Rotate {
                    to: outcome.final_rotation,
                    duration: self.timings.spin_duration,
                })
            }
            (Phase::Spinning { outcome }, SpinStep::Finished) => {
                self.phase = Phase::Idle {
                    winner: Some(outcome.winner_index),
                };
                Some(SpinTransition::Reveal {
                    winner_index: outcome.winner_index,
                })
            }
            (phase, step) => {
                log::warn!("Ignoring {:?} while in {:?}", step, phase);
                None
            }
        }
    }
}
