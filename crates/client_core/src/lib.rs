use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{
    domain::{BackendInfo, UserRecord},
    protocol::{INFO_ROUTE, USERS_ROUTE},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

pub mod error;
pub mod settings;
pub mod transport;
pub mod types;

pub use error::{ErrorKind, FetchError, SettingsError, TransportError};
pub use settings::ClientSettings;
pub use transport::{BackendTransport, HttpTransport};
pub use types::{ControllerEvent, FetchResult, Phase, Snapshot, CONNECTION_FAILURE_MESSAGE};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct ControllerState {
    snapshot: Snapshot,
    /// Bumped by every `refresh`; a round only writes its outcome while it
    /// still holds the latest generation.
    generation: u64,
}

/// Drives the `/api/info` then `/api/users` fetch round and publishes every
/// state change as a whole [`Snapshot`].
pub struct FetchLifecycleController {
    backend_url: String,
    transport: Arc<dyn BackendTransport>,
    state: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl FetchLifecycleController {
    pub fn new(settings: &ClientSettings) -> Arc<Self> {
        Self::with_transport(settings.backend_url.clone(), Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        backend_url: impl Into<String>,
        transport: Arc<dyn BackendTransport>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            transport,
            state: Mutex::new(ControllerState {
                snapshot: Snapshot::default(),
                generation: 0,
            }),
            events,
        })
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot.clone()
    }

    /// Runs one full round and folds its outcome into the controller state.
    ///
    /// Never fails: transport and decode errors end up as `Phase::Failed` with
    /// [`CONNECTION_FAILURE_MESSAGE`], the cause goes to the log. On failure
    /// the records of the last successful round stay in place. If another
    /// `refresh` started while this one was in flight, this round's outcome is
    /// dropped and the returned snapshot reflects the newer round's progress.
    pub async fn refresh(&self) -> Snapshot {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.snapshot.phase = Phase::Loading;
            state.snapshot.error_message = None;
            self.publish(&state.snapshot);
            state.generation
        };
        debug!(generation, backend_url = %self.backend_url, "refresh started");

        let outcome = self.fetch_round().await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(
                generation,
                latest = state.generation,
                "refresh superseded by a newer round; dropping outcome"
            );
            return state.snapshot.clone();
        }

        match outcome {
            Ok(result) => {
                info!(
                    generation,
                    users = result.users.len(),
                    "backend data refreshed"
                );
                state.snapshot = Snapshot {
                    phase: Phase::Ready,
                    backend_info: Some(result.backend_info),
                    users: result.users,
                    error_message: None,
                };
            }
            Err(err) => {
                error!(
                    generation,
                    kind = ?err.kind(),
                    endpoint = err.endpoint(),
                    error = %err,
                    "error fetching data from backend"
                );
                state.snapshot.phase = Phase::Failed;
                state.snapshot.error_message = Some(CONNECTION_FAILURE_MESSAGE.to_string());
            }
        }
        self.publish(&state.snapshot);
        state.snapshot.clone()
    }

    /// The two GETs, strictly in order: `/api/users` is only requested once
    /// `/api/info` has answered and decoded.
    pub async fn fetch_round(&self) -> Result<FetchResult, FetchError> {
        let backend_info: BackendInfo = self.get_json(INFO_ROUTE).await?;
        let users: Vec<UserRecord> = self.get_json(USERS_ROUTE).await?;
        Ok(FetchResult {
            backend_info,
            users,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, FetchError> {
        let url = format!("{}{endpoint}", self.backend_url);
        let body = self
            .transport
            .get(&url)
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    fn publish(&self, snapshot: &Snapshot) {
        // No subscribers is fine; the snapshot stays readable via `snapshot()`.
        let _ = self
            .events
            .send(ControllerEvent::StateChanged(snapshot.clone()));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
