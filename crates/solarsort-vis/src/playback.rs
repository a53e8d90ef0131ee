//! Playback controls for a sorting history.
//!
//! The cursor points at the step currently on screen. Stepping forward yields
//! the [`Transition`] from that step to the next one.

use serde::{Deserialize, Serialize};
use solarsort_history::{Algorithm, History, HistoryStep, Sortable};

use crate::transition::Transition;

/// How fast steps advance, relative to the configured step pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackSpeed {
    /// No step advances on its own
    Paused,
    /// One step per four pauses
    Quarter,
    /// One step per two pauses
    Half,
    /// One step per pause
    Normal,
    /// Two steps per pause
    Double,
    /// Four steps per pause
    Quadruple,
    /// Ten steps per pause
    TenX,
    /// Steps follow each other with no pause at all
    Maximum,
}

impl PlaybackSpeed {
    /// Steps advanced per configured pause.
    pub fn steps_per_pause(&self) -> f64 {
        match self {
            PlaybackSpeed::Paused => 0.0,
            PlaybackSpeed::Quarter => 0.25,
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
            PlaybackSpeed::TenX => 10.0,
            PlaybackSpeed::Maximum => f64::INFINITY,
        }
    }

    /// Pause between two steps at this speed, given the pause at normal
    /// speed. `None` while paused.
    pub fn scale_ms(&self, base_ms: u64) -> Option<u64> {
        match self {
            PlaybackSpeed::Paused => None,
            PlaybackSpeed::Maximum => Some(0),
            speed => Some((base_ms as f64 / speed.steps_per_pause()) as u64),
        }
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Playback is stopped at the initial step
    Stopped,
    /// Playback is running forward
    Playing,
    /// Playback is paused
    Paused,
    /// Playback reached the sorted step
    Finished,
}

/// Playback controller for one history.
#[derive(Debug)]
pub struct Playback<T> {
    history: History<T>,
    current_step: usize,
    state: PlaybackState,
    speed: PlaybackSpeed,
    loop_enabled: bool,
}

impl<T: Sortable + PartialEq> Playback<T> {
    /// Create a new playback controller at the initial step.
    pub fn new(history: History<T>) -> Self {
        Self {
            history,
            current_step: 0,
            state: PlaybackState::Stopped,
            speed: PlaybackSpeed::Normal,
            loop_enabled: false,
        }
    }

    /// The history being played.
    pub fn history(&self) -> &History<T> {
        &self.history
    }

    /// Get the index of the step on screen.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Get the total number of steps.
    pub fn total_steps(&self) -> usize {
        self.history.len()
    }

    fn last_step(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the current playback speed.
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Seek to a specific step.
    pub fn seek(&mut self, step: usize) {
        self.current_step = step.min(self.last_step());
        if self.current_step == self.last_step() && !self.loop_enabled {
            self.state = PlaybackState::Finished;
        }
    }

    /// Start playback.
    pub fn play(&mut self) {
        if self.current_step >= self.last_step() {
            self.current_step = 0;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Stop playback and return to the initial step.
    pub fn stop(&mut self) {
        self.current_step = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Set playback speed.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
        if matches!(speed, PlaybackSpeed::Paused) {
            self.state = PlaybackState::Paused;
        }
    }

    /// Enable or disable looping.
    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Advance one step and return the transition into it.
    ///
    /// At the last step this returns `None`. When looping it instead returns
    /// a reset transition from the sorted step back to the initial one, whose
    /// `step` is 0.
    pub fn step_forward(&mut self) -> Option<Transition<'_, T>> {
        let from = self.current_step;
        if from >= self.last_step() {
            if self.loop_enabled && self.history.len() > 1 {
                self.current_step = 0;
                let steps = self.history.steps();
                return Some(Transition::new(0, &steps[from], &steps[0]));
            }
            self.state = PlaybackState::Finished;
            return None;
        }

        let to = from + 1;
        self.current_step = to;
        if to == self.last_step() && !self.loop_enabled {
            self.state = PlaybackState::Finished;
        }

        let steps = self.history.steps();
        Some(Transition::new(to, &steps[from], &steps[to]))
    }

    /// Step backward one step.
    pub fn step_backward(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
            self.state = PlaybackState::Paused;
        }
    }

    /// The step on screen.
    pub fn current(&self) -> Option<&HistoryStep<T>> {
        self.history.get(self.current_step)
    }

    /// Steps in an index range.
    pub fn steps_in_range(&self, start: usize, end: usize) -> &[HistoryStep<T>] {
        let steps = self.history.steps();
        let start = start.min(steps.len());
        let end = end.clamp(start, steps.len());
        &steps[start..end]
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.last_step() == 0 {
            0.0
        } else {
            self.current_step as f64 / self.last_step() as f64
        }
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub algorithm: Algorithm,
    pub current_step: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub progress: f64,
    pub loop_enabled: bool,
}

impl<T: Sortable + PartialEq> From<&Playback<T>> for PlaybackStatus {
    fn from(playback: &Playback<T>) -> Self {
        Self {
            algorithm: playback.history.algorithm(),
            current_step: playback.current_step,
            total_steps: playback.total_steps(),
            state: playback.state,
            speed: playback.speed,
            progress: playback.progress(),
            loop_enabled: playback.loop_enabled,
        }
    }
}
