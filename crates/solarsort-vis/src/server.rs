//! Axum web server with WebSocket streaming for the replay frontend.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State, ws::{WebSocket, WebSocketUpgrade, Message}},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use solarsort_history::{Algorithm, History, HistoryStep, Item};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::playback::{Playback, PlaybackSpeed, PlaybackStatus};

/// Shared application state.
pub struct AppState {
    dataset: Vec<Item>,
    playback: RwLock<Playback<Item>>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
    static_dir: Option<PathBuf>,
}

impl VisServer {
    /// Create a server that plays `algorithm` over `dataset`.
    ///
    /// # Errors
    ///
    /// Fails if the dataset cannot be sorted (an incomparable order key).
    pub fn new(dataset: Vec<Item>, algorithm: Algorithm) -> Result<Self> {
        let history = algorithm.generate(&dataset)?;
        Ok(Self {
            state: Arc::new(AppState {
                dataset,
                playback: RwLock::new(Playback::new(history)),
            }),
            static_dir: None,
        })
    }

    /// Serve a frontend build from `dir` for every non-API path.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        let router = Router::new()
            // API routes
            .route("/api/status", get(status_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/dataset", get(dataset_handler))
            .route("/api/history", post(history_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/current", get(current_step_handler))
            .route("/api/playback/steps", get(steps_handler))
            .route("/api/playback/load", post(load_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/stop", post(stop_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/playback/step", post(step_handler))
            // WebSocket for step-by-step replay
            .route("/ws", get(ws_handler));

        let router = match &self.static_dir {
            Some(dir) => router.fallback_service(ServeDir::new(dir)),
            None => router,
        };

        router
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    algorithm: Algorithm,
    item_count: usize,
    step_count: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let playback = state.playback.read().await;
    Json(StatusResponse {
        status: "ok",
        algorithm: playback.history().algorithm(),
        item_count: state.dataset.len(),
        step_count: playback.total_steps(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct AlgorithmInfo {
    name: Algorithm,
    stable: bool,
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(
        Algorithm::ALL
            .into_iter()
            .map(|algorithm| AlgorithmInfo {
                name: algorithm,
                stable: algorithm.is_stable(),
            })
            .collect(),
    )
}

async fn dataset_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    Json(state.dataset.clone())
}

#[derive(Deserialize)]
struct HistoryRequest {
    algorithm: Algorithm,
    /// Items to sort; the server's dataset when absent.
    items: Option<Vec<Item>>,
}

async fn history_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HistoryRequest>,
) -> std::result::Result<Json<History<Item>>, (StatusCode, String)> {
    let items = req.items.as_deref().unwrap_or(&state.dataset);
    match req.algorithm.generate(items) {
        Ok(history) => Ok(Json(history)),
        Err(e) => {
            warn!(algorithm = %req.algorithm, error = %e, "history request rejected");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let playback = state.playback.read().await;
    Json(PlaybackStatus::from(&*playback))
}

async fn current_step_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Option<HistoryStep<Item>>> {
    let playback = state.playback.read().await;
    Json(playback.current().cloned())
}

/// Step window for the frontend's history strip. `end` is exclusive.
#[derive(Deserialize)]
struct StepRange {
    #[serde(default)]
    start: usize,
    end: Option<usize>,
}

async fn steps_handler(
    State(state): State<Arc<AppState>>,
    Query(range): Query<StepRange>,
) -> Json<Vec<HistoryStep<Item>>> {
    let playback = state.playback.read().await;
    let end = range.end.unwrap_or_else(|| playback.total_steps());
    Json(playback.steps_in_range(range.start, end).to_vec())
}

#[derive(Deserialize)]
struct LoadRequest {
    algorithm: Algorithm,
}

async fn load_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoadRequest>,
) -> std::result::Result<Json<PlaybackStatus>, (StatusCode, String)> {
    let history = req
        .algorithm
        .generate(&state.dataset)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut playback = state.playback.write().await;
    let speed = playback.speed();
    let loop_enabled = playback.loop_enabled();
    *playback = Playback::new(history);
    playback.set_speed(speed);
    playback.set_loop(loop_enabled);

    debug!(algorithm = %req.algorithm, steps = playback.total_steps(), "history loaded");
    Ok(Json(PlaybackStatus::from(&*playback)))
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.play();
    Json(PlaybackStatus::from(&*playback))
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.pause();
    Json(PlaybackStatus::from(&*playback))
}

async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.stop();
    Json(PlaybackStatus::from(&*playback))
}

#[derive(Deserialize)]
struct SeekRequest {
    step: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.seek(req.step);
    Json(PlaybackStatus::from(&*playback))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: PlaybackSpeed,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.set_speed(req.speed);
    Json(PlaybackStatus::from(&*playback))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StepDirection {
    Forward,
    Backward,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: StepDirection,
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    match req.direction {
        StepDirection::Forward => {
            playback.step_forward();
        }
        StepDirection::Backward => {
            playback.step_backward();
        }
    }
    Json(PlaybackStatus::from(&*playback))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the step currently on screen
    let current = state.playback.read().await.current().cloned();
    if let Some(step) = current {
        if let Ok(json) = serde_json::to_string(&WsResponse::Step(step)) {
            let _ = socket.send(Message::Text(json.into())).await;
        }
    }

    // Handle incoming messages
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match handle_ws_text(&state, &text).await {
                    Ok(response) => response,
                    Err(e) => {
                        debug!(error = %e, "websocket command failed");
                        WsResponse::Error { message: e.to_string() }
                    }
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    let _ = socket.send(Message::Text(json.into())).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum WsCommand {
    #[serde(rename = "get_step")]
    GetStep,
    #[serde(rename = "get_status")]
    GetStatus,
    #[serde(rename = "seek")]
    Seek { step: usize },
    #[serde(rename = "play")]
    Play,
    #[serde(rename = "pause")]
    Pause,
    /// Advance one step; answered with the transition to animate.
    #[serde(rename = "next")]
    Next,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum WsResponse {
    #[serde(rename = "step")]
    Step(HistoryStep<Item>),
    #[serde(rename = "status")]
    Status(PlaybackStatus),
    #[serde(rename = "transition")]
    Transition { frame: serde_json::Value },
    #[serde(rename = "end")]
    End(PlaybackStatus),
    #[serde(rename = "error")]
    Error { message: String },
}

/// Parse and run one WebSocket command.
async fn handle_ws_text(state: &Arc<AppState>, text: &str) -> Result<WsResponse> {
    let cmd: WsCommand = serde_json::from_str(text)?;
    handle_ws_command(state, cmd).await
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> Result<WsResponse> {
    let response = match cmd {
        WsCommand::GetStep => {
            let playback = state.playback.read().await;
            match playback.current() {
                Some(step) => WsResponse::Step(step.clone()),
                None => WsResponse::End(PlaybackStatus::from(&*playback)),
            }
        }
        WsCommand::GetStatus => {
            let playback = state.playback.read().await;
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Seek { step } => {
            let mut playback = state.playback.write().await;
            playback.seek(step);
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Play => {
            let mut playback = state.playback.write().await;
            playback.play();
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Pause => {
            let mut playback = state.playback.write().await;
            playback.pause();
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Next => {
            let mut playback = state.playback.write().await;
            let frame = playback
                .step_forward()
                .map(|t| serde_json::to_value(&t))
                .transpose()
                .map_err(Error::from)?;
            match frame {
                Some(frame) => WsResponse::Transition { frame },
                None => WsResponse::End(PlaybackStatus::from(&*playback)),
            }
        }
    };
    Ok(response)
}
