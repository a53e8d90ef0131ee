//! Solarsort Replay Server
//!
//! Sort the planet dataset, trace the replay, and serve the frontend.

use solarsort_history::Algorithm;
use solarsort_vis::{
    dataset, DatasetConfig, PlaybackSpeed, ReplayConfig, ReplayCoordinator, TraceRenderer,
    VisServer,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let algorithm: Algorithm = match args.get(1) {
        Some(name) => name.parse()?,
        None => Algorithm::Insertion,
    };

    let port: u16 = args.get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let seed: u64 = args.get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let items = dataset::load(&DatasetConfig {
        seed,
        ..Default::default()
    });
    let history = algorithm.generate(&items)?;
    tracing::info!(%algorithm, seed, steps = history.len(), "history generated");

    // Trace every step once before serving
    let config = ReplayConfig {
        speed: PlaybackSpeed::Maximum,
        ..Default::default()
    };
    let (mut replay, _handle) = ReplayCoordinator::new(TraceRenderer::new(), config);
    replay.run(history).await?;

    let mut server = VisServer::new(items, algorithm)?;
    if let Ok(dir) = env::var("SOLARSORT_STATIC_DIR") {
        server = server.with_static_dir(dir);
    }
    server.serve(port).await?;

    Ok(())
}
