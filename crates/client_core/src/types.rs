use shared::domain::{BackendInfo, UserRecord};

pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Failed to connect to backend. Make sure backend is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Outcome of one successful fetch round: both endpoints answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub backend_info: BackendInfo,
    pub users: Vec<UserRecord>,
}

/// Everything a renderer needs, captured under one lock so the two records
/// always come from the same round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub phase: Phase,
    pub backend_info: Option<BackendInfo>,
    pub users: Vec<UserRecord>,
    pub error_message: Option<String>,
}

impl Snapshot {
    /// The bundled result, only while `Ready`.
    pub fn result(&self) -> Option<FetchResult> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.backend_info.as_ref().map(|info| FetchResult {
            backend_info: info.clone(),
            users: self.users.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    StateChanged(Snapshot),
}
