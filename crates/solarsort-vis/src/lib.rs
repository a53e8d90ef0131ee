//! Solarsort Replay
//!
//! Step-by-step replay of sorting histories over a small planet dataset.
//!
//! # Architecture
//!
//! - **Dataset**: The eight planets, shuffled from a seed
//! - **Transition**: Where each item moves between two consecutive steps
//! - **Playback**: Scrub through a history at any speed
//! - **Replay**: Drives a renderer one transition at a time
//! - **Server**: REST API and WebSocket for a browser frontend
//!
//! # Usage
//!
//! ```ignore
//! let dataset = dataset::load(&DatasetConfig::default());
//! let history = Algorithm::Quick.generate(&dataset)?;
//!
//! let (mut replay, handle) = ReplayCoordinator::new(TraceRenderer::new(), ReplayConfig::default());
//! replay.run(history).await?;
//!
//! let server = VisServer::new(dataset, Algorithm::Quick)?;
//! server.serve(3000).await?;
//! ```

pub mod dataset;
mod error;
mod playback;
mod replay;
mod server;
mod transition;

pub use dataset::DatasetConfig;
pub use error::{Error, Result};
pub use playback::{Playback, PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use replay::{
    render_error, ReplayConfig, ReplayControl, ReplayCoordinator, ReplayHandle, ReplayOutcome,
    Renderer, TraceRenderer,
};
pub use server::VisServer;
pub use transition::{ItemMove, Transition};

#[cfg(test)]
mod tests {
    use super::*;
    use solarsort_history::{Algorithm, Annotation};

    #[test]
    fn dataset_sorts_with_every_algorithm() {
        let items = dataset::load(&DatasetConfig::default());

        for algorithm in Algorithm::ALL {
            let history = algorithm.generate(&items).unwrap();
            let orders: Vec<f64> = history.final_state().iter().map(|i| i.order).collect();
            assert_eq!(orders, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], "{algorithm}");
        }
    }

    #[test]
    fn playback_can_seek() {
        let items = dataset::load(&DatasetConfig::default());
        let history = Algorithm::Quick.generate(&items).unwrap();
        let total_steps = history.len();
        let mut playback = Playback::new(history);

        // Start at beginning
        assert_eq!(playback.current_step(), 0);
        assert_eq!(playback.current().map(|s| &s.annotation), Some(&Annotation::Initial));

        // Seek to middle
        playback.seek(total_steps / 2);
        assert_eq!(playback.current_step(), total_steps / 2);

        // Seek to end
        playback.seek(total_steps - 1);
        assert_eq!(playback.current_step(), total_steps - 1);
    }

    #[test]
    fn playback_respects_bounds() {
        let items = dataset::load(&DatasetConfig::default());
        let history = Algorithm::Heap.generate(&items).unwrap();
        let total_steps = history.len();
        let mut playback = Playback::new(history);

        // Can't seek past end
        playback.seek(1000);
        assert_eq!(playback.current_step(), total_steps - 1);

        // Can't seek before start
        playback.seek(0);
        assert_eq!(playback.current_step(), 0);
    }

    #[test]
    fn playback_transitions_preserve_items() {
        let items = dataset::load(&DatasetConfig::default());
        let mut playback = Playback::new(Algorithm::Merge.generate(&items).unwrap());

        while let Some(transition) = playback.step_forward() {
            let mut targets: Vec<usize> = transition.moves.iter().map(|m| m.to).collect();
            targets.sort_unstable();
            assert_eq!(targets, (0..items.len()).collect::<Vec<_>>());
        }
    }
}
