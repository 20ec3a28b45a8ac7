//! Plain-text rendering of controller snapshots.

use std::fmt::Write as _;

use client_core::{Phase, Snapshot};
use shared::domain::UserRecord;

const RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Quit,
}

/// Blank lines count as refresh so a bare Enter acts like the button.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "r" | "refresh" | "retry" => Some(Command::Refresh),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn render(snapshot: &Snapshot, backend_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Backend Probe");
    let _ = writeln!(out, "Frontend <-> Backend Communication Demo");
    let _ = writeln!(out, "{RULE}");

    match snapshot.phase {
        Phase::Idle => {
            let _ = writeln!(out, "Not loaded yet. [r] Fetch data");
        }
        Phase::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        Phase::Failed => render_error(&mut out, snapshot),
        Phase::Ready => render_connected(&mut out, snapshot, backend_url),
    }
    out
}

fn render_error(out: &mut String, snapshot: &Snapshot) {
    let message = snapshot.error_message.as_deref().unwrap_or_default();
    let _ = writeln!(out, "Error");
    let _ = writeln!(out, "  {message}");
    let _ = writeln!(out, "  [r] Retry Connection   [q] Quit");
}

fn render_connected(out: &mut String, snapshot: &Snapshot, backend_url: &str) {
    let _ = writeln!(out, "Backend Connected");
    if let Some(info) = &snapshot.backend_info {
        let _ = writeln!(out, "  Message: {}", info.message);
        let _ = writeln!(out, "  Details: {}", info.timestamp);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Users from Backend");
    if snapshot.users.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for user in &snapshot.users {
        let _ = writeln!(out, "  {}", render_user(user));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Connection Details");
    let _ = writeln!(out, "  Backend URL: {backend_url}");
    let _ = writeln!(out, "  [r] Refresh Data   [q] Quit");
}

fn render_user(user: &UserRecord) -> String {
    format!("{} <{}>  ID: {}", user.name, user.email, user.id)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
