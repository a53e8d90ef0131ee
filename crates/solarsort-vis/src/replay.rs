//! Replay coordination.
//!
//! The coordinator hands a [`Renderer`] one transition at a time and waits for
//! it to finish before asking for the next. Pause, resume and cancel requests
//! are only looked at between transitions, never during one.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solarsort_history::{History, Sortable};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::playback::{Playback, PlaybackSpeed};
use crate::transition::Transition;

/// Plays a single transition.
///
/// The returned future must resolve once the transition has visually settled;
/// the next transition starts from that settled state.
pub trait Renderer<T> {
    fn render(&mut self, transition: &Transition<'_, T>) -> impl Future<Output = Result<()>>;
}

/// Configuration for a replay.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Scales the pause between steps
    pub speed: PlaybackSpeed,
    /// Pause after each transition at normal speed
    pub step_pause_ms: u64,
    /// Start over after the last step instead of finishing
    pub loop_enabled: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: PlaybackSpeed::Normal,
            step_pause_ms: 500,
            loop_enabled: false,
        }
    }
}

/// A request from outside the replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayControl {
    Run,
    Pause,
    Cancel,
}

/// How a replay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayOutcome {
    /// Every transition was rendered.
    Completed { steps: usize },
    /// Cancelled before rendering step `at_step` (0 for a loop's reset).
    Cancelled { at_step: usize },
}

/// Controls a running replay from another task.
#[derive(Debug)]
pub struct ReplayHandle {
    control: watch::Sender<ReplayControl>,
}

impl ReplayHandle {
    /// Hold the replay after the current transition.
    pub fn pause(&self) {
        self.control.send_replace(ReplayControl::Pause);
    }

    /// Let a paused replay continue.
    pub fn resume(&self) {
        self.control.send_replace(ReplayControl::Run);
    }

    /// Stop the replay after the current transition.
    pub fn cancel(&self) {
        self.control.send_replace(ReplayControl::Cancel);
    }
}

/// Walks a history through a renderer, strictly in order.
#[derive(Debug)]
pub struct ReplayCoordinator<R> {
    renderer: R,
    config: ReplayConfig,
    control: watch::Receiver<ReplayControl>,
}

impl<R> ReplayCoordinator<R> {
    /// Create a coordinator and the handle that controls it.
    pub fn new(renderer: R, config: ReplayConfig) -> (Self, ReplayHandle) {
        let (tx, rx) = watch::channel(ReplayControl::Run);
        let coordinator = Self {
            renderer,
            config,
            control: rx,
        };
        (coordinator, ReplayHandle { control: tx })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Wait out a pause. Returns `false` if the replay should stop.
    ///
    /// A dropped handle can no longer resume or cancel, so it counts as `Run`.
    async fn proceed(&mut self) -> bool {
        loop {
            let control = *self.control.borrow_and_update();
            match control {
                ReplayControl::Run => return true,
                ReplayControl::Cancel => return false,
                ReplayControl::Pause => {
                    if self.control.changed().await.is_err() {
                        return true;
                    }
                }
            }
        }
    }

    fn step_pause(&self) -> Duration {
        let ms = self
            .config
            .speed
            .scale_ms(self.config.step_pause_ms)
            .unwrap_or(self.config.step_pause_ms);
        Duration::from_millis(ms)
    }

    /// Replay `history` from its initial step.
    ///
    /// A looping replay renders a reset transition from the sorted step back
    /// to the initial one before starting over, so every transition starts
    /// where the previous one settled.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error; the replay stops at the failed step.
    pub async fn run<T>(&mut self, history: History<T>) -> Result<ReplayOutcome>
    where
        T: Sortable + PartialEq,
        R: Renderer<T>,
    {
        let algorithm = history.algorithm();
        info!(%algorithm, steps = history.len(), "replay started");

        let mut playback = Playback::new(history);
        playback.set_loop(self.config.loop_enabled);
        playback.set_speed(self.config.speed);
        playback.play();

        let pause = self.step_pause();
        let mut rendered = 0;

        loop {
            let current = playback.current_step();
            let next_step = if current + 1 < playback.total_steps() {
                current + 1
            } else if self.config.loop_enabled {
                0
            } else {
                break;
            };

            if !self.proceed().await {
                warn!(%algorithm, at_step = next_step, "replay cancelled");
                return Ok(ReplayOutcome::Cancelled { at_step: next_step });
            }

            let Some(transition) = playback.step_forward() else {
                break;
            };
            if transition.step == 0 {
                debug!(%algorithm, "replay looping");
            }

            debug!(step = transition.step, moving = transition.moving().count(), "rendering");
            if let Err(e) = self.renderer.render(&transition).await {
                warn!(step = transition.step, error = %e, "renderer failed");
                return Err(e);
            }
            rendered += 1;

            if pause.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(pause).await;
            }
        }

        info!(%algorithm, rendered, "replay finished");
        Ok(ReplayOutcome::Completed { steps: rendered })
    }
}

/// A headless renderer that logs each transition.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    rendered: usize,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions rendered so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }
}

impl<T: Sortable> Renderer<T> for TraceRenderer {
    async fn render(&mut self, transition: &Transition<'_, T>) -> Result<()> {
        let orders: Vec<_> = transition.to.state.iter().map(Sortable::order).collect();
        info!(
            step = transition.step,
            annotation = ?transition.to.annotation,
            state = ?orders,
            "step"
        );
        self.rendered += 1;
        Ok(())
    }
}

/// Render failure helper for renderer implementations.
pub fn render_error(step: usize, reason: impl Into<String>) -> Error {
    Error::Render {
        step,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarsort_history::Algorithm;

    /// Records the order of every rendered step.
    #[derive(Default)]
    struct Recording {
        steps: Vec<usize>,
        fail_at: Option<usize>,
    }

    impl<T: Sortable> Renderer<T> for Recording {
        async fn render(&mut self, transition: &Transition<'_, T>) -> Result<()> {
            if self.fail_at == Some(transition.step) {
                return Err(render_error(transition.step, "boom"));
            }
            self.steps.push(transition.step);
            Ok(())
        }
    }

    /// Counts transitions that do not start where the previous one ended.
    #[derive(Default)]
    struct Continuity {
        last: Option<Vec<i32>>,
        rendered: usize,
        breaks: usize,
        resets: usize,
    }

    impl Renderer<i32> for Continuity {
        async fn render(&mut self, transition: &Transition<'_, i32>) -> Result<()> {
            if let Some(last) = &self.last {
                if *last != transition.from.state {
                    self.breaks += 1;
                }
            }
            if transition.step == 0 {
                self.resets += 1;
            }
            self.last = Some(transition.to.state.clone());
            self.rendered += 1;
            Ok(())
        }
    }

    fn fast() -> ReplayConfig {
        ReplayConfig {
            speed: PlaybackSpeed::Maximum,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn renders_every_step_in_order() {
        let history = Algorithm::Merge.generate(&[4, 3, 2, 1]).unwrap();
        let total = history.len();

        let (mut coordinator, _handle) = ReplayCoordinator::new(Recording::default(), fast());
        let outcome = coordinator.run(history).await.unwrap();

        assert_eq!(outcome, ReplayOutcome::Completed { steps: total - 1 });
        let expected: Vec<usize> = (1..total).collect();
        assert_eq!(coordinator.renderer().steps, expected);
    }

    #[tokio::test]
    async fn cancel_stops_before_next_step() {
        let history = Algorithm::Bubble.generate(&[3, 2, 1]).unwrap();

        let (mut coordinator, handle) = ReplayCoordinator::new(Recording::default(), fast());
        handle.cancel();
        let outcome = coordinator.run(history).await.unwrap();

        assert_eq!(outcome, ReplayOutcome::Cancelled { at_step: 1 });
        assert!(coordinator.renderer().steps.is_empty());
    }

    #[tokio::test]
    async fn paused_replay_resumes() {
        let history = Algorithm::Quick.generate(&[2, 1, 3]).unwrap();
        let total = history.len();

        let (mut coordinator, handle) = ReplayCoordinator::new(Recording::default(), fast());
        handle.pause();

        let resumer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.resume();
            handle
        });

        let outcome = coordinator.run(history).await.unwrap();
        let _handle = resumer.await.unwrap();
        assert_eq!(outcome, ReplayOutcome::Completed { steps: total - 1 });
    }

    #[tokio::test]
    async fn renderer_error_stops_replay() {
        let history = Algorithm::Insertion.generate(&[4, 3, 2, 1]).unwrap();
        let renderer = Recording {
            fail_at: Some(2),
            ..Default::default()
        };

        let (mut coordinator, _handle) = ReplayCoordinator::new(renderer, fast());
        let result = coordinator.run(history).await;

        assert!(matches!(result, Err(Error::Render { step: 2, .. })));
        assert_eq!(coordinator.renderer().steps, vec![1]);
    }

    #[tokio::test]
    async fn looping_replay_runs_until_cancelled() {
        let history = Algorithm::Heap.generate(&[2, 1]).unwrap();
        let config = ReplayConfig {
            loop_enabled: true,
            ..fast()
        };

        let (mut coordinator, handle) = ReplayCoordinator::new(TraceRenderer::new(), config);
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let outcome = coordinator.run(history).await.unwrap();
        canceller.await.unwrap();

        assert!(matches!(outcome, ReplayOutcome::Cancelled { .. }));
        assert!(coordinator.renderer().rendered() > 0);
    }

    #[tokio::test]
    async fn looping_replay_stays_continuous() {
        let history = Algorithm::Insertion.generate(&[3, 1, 2]).unwrap();
        let config = ReplayConfig {
            loop_enabled: true,
            ..fast()
        };

        let (mut coordinator, handle) = ReplayCoordinator::new(Continuity::default(), config);
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        coordinator.run(history).await.unwrap();
        canceller.await.unwrap();

        let renderer = coordinator.renderer();
        assert!(renderer.rendered > 3);
        assert!(renderer.resets > 0);
        assert_eq!(renderer.breaks, 0);
    }

    #[test]
    fn trace_renderer_counts() {
        let history = Algorithm::Selection.generate(&[2, 1]).unwrap();
        let (mut coordinator, _handle) = ReplayCoordinator::new(TraceRenderer::new(), fast());

        let outcome = tokio_test::block_on(coordinator.run(history)).unwrap();
        assert_eq!(outcome, ReplayOutcome::Completed { steps: 1 });
        assert_eq!(coordinator.into_renderer().rendered(), 1);
    }
}
