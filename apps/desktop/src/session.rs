//! Interactive front-end loop: refresh on start, then one command per line.

use std::sync::Arc;

use anyhow::{bail, Result};
use client_core::{ControllerEvent, FetchLifecycleController, Phase, Snapshot};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::{broadcast::error::RecvError, broadcast::error::TryRecvError, oneshot},
    task::JoinHandle,
};
use tracing::warn;

use crate::render::{parse_command, render, Command};

/// Exit status for `--once`: a failed round is an error, whatever its cause.
pub fn settled_outcome(snapshot: &Snapshot, backend_url: &str) -> Result<()> {
    if snapshot.phase == Phase::Failed {
        bail!("refresh against {backend_url} failed");
    }
    Ok(())
}

/// Runs until `input` ends or a quit command arrives. Refreshes still in
/// flight at that point are awaited, and every state they publish reaches
/// `output` before this returns.
pub async fn run_session<R, F>(
    controller: Arc<FetchLifecycleController>,
    input: R,
    mut output: F,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(String) + Send + 'static,
{
    let mut events = controller.subscribe();
    let backend_url = controller.backend_url().to_string();
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let renderer = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Ok(ControllerEvent::StateChanged(snapshot)) => {
                        output(render(&snapshot, &backend_url));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "renderer fell behind; skipping to latest state");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = &mut stop_rx => {
                    loop {
                        match events.try_recv() {
                            Ok(ControllerEvent::StateChanged(snapshot)) => {
                                output(render(&snapshot, &backend_url));
                            }
                            Err(TryRecvError::Lagged(_)) => continue,
                            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                        }
                    }
                    break;
                }
            }
        }
    });

    let spawn_refresh = || -> JoinHandle<()> {
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.refresh().await;
        })
    };

    let mut in_flight = vec![spawn_refresh()];

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Refresh) => {
                in_flight.retain(|handle| !handle.is_finished());
                in_flight.push(spawn_refresh());
            }
            Some(Command::Quit) => break,
            None => eprintln!(
                "unknown command '{}'; use r to refresh or q to quit",
                line.trim()
            ),
        }
    }

    for handle in in_flight {
        if let Err(err) = handle.await {
            warn!(error = %err, "refresh task did not complete");
        }
    }

    let _ = stop_tx.send(());
    renderer.await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
