use super::*;
use std::sync::Mutex;

use async_trait::async_trait;
use client_core::{BackendTransport, TransportError, CONNECTION_FAILURE_MESSAGE};
use shared::protocol::{INFO_ROUTE, USERS_ROUTE};
use tokio::io::BufReader;

const BASE: &str = "http://backend.test";

/// Answers both endpoints with fixed bodies, or fails `/api/info` with a status.
struct FixedTransport {
    info_status: Option<u16>,
    users_body: &'static str,
}

#[async_trait]
impl BackendTransport for FixedTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        tokio::task::yield_now().await;
        match url.strip_prefix(BASE) {
            Some(INFO_ROUTE) => match self.info_status {
                Some(status) => Err(TransportError::Status {
                    url: url.to_string(),
                    status,
                }),
                None => Ok(br#"{"message":"ok","timestamp":"t1"}"#.to_vec()),
            },
            Some(USERS_ROUTE) => Ok(self.users_body.as_bytes().to_vec()),
            _ => Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn controller(info_status: Option<u16>, users_body: &'static str) -> Arc<FetchLifecycleController> {
    FetchLifecycleController::with_transport(
        BASE,
        Arc::new(FixedTransport {
            info_status,
            users_body,
        }),
    )
}

async fn run_with_input(
    controller: Arc<FetchLifecycleController>,
    input: &'static str,
) -> Vec<String> {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let sink = frames.clone();
    run_session(controller, BufReader::new(input.as_bytes()), move |frame| {
        sink.lock().expect("frames").push(frame);
    })
    .await
    .expect("session");
    let frames = frames.lock().expect("frames").clone();
    frames
}

#[tokio::test]
async fn closed_input_still_renders_the_startup_round() {
    let controller = controller(None, r#"[{"id":1,"name":"Ann","email":"a@x.com"}]"#);
    let frames = run_with_input(controller.clone(), "").await;

    assert!(frames.first().expect("loading frame").contains("Loading..."));
    let last = frames.last().expect("settled frame");
    assert!(last.contains("Backend Connected"));
    assert!(last.contains("Ann <a@x.com>  ID: 1"));
    assert_eq!(controller.snapshot().await.phase, Phase::Ready);
}

#[tokio::test]
async fn closed_input_renders_the_failure_panel() {
    let controller = controller(Some(503), "[]");
    let frames = run_with_input(controller, "").await;

    let last = frames.last().expect("settled frame");
    assert!(last.contains(CONNECTION_FAILURE_MESSAGE));
    assert!(last.contains("Retry Connection"));
}

#[tokio::test]
async fn quit_waits_for_requested_refreshes() {
    let controller = controller(None, "[]");
    let frames = run_with_input(controller, "r\nq\nr\n").await;

    let settled = frames
        .iter()
        .filter(|frame| frame.contains("Backend Connected"))
        .count();
    assert_eq!(frames.last().map(|f| f.contains("(none)")), Some(true));
    assert!(settled >= 1);
    assert!(frames.len() >= 2);
}

#[test]
fn failed_round_is_reported_without_guessing_the_cause() {
    let failed = Snapshot {
        phase: Phase::Failed,
        error_message: Some(CONNECTION_FAILURE_MESSAGE.to_string()),
        ..Snapshot::default()
    };
    let err = settled_outcome(&failed, BASE).expect_err("failed round");
    assert_eq!(err.to_string(), format!("refresh against {BASE} failed"));
    assert!(!err.to_string().contains("unreachable"));

    let ready = Snapshot {
        phase: Phase::Ready,
        ..Snapshot::default()
    };
    assert!(settled_outcome(&ready, BASE).is_ok());
}
