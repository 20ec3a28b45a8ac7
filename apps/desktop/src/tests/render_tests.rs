use super::*;
use client_core::CONNECTION_FAILURE_MESSAGE;
use shared::domain::BackendInfo;

const URL: &str = "http://localhost:8080";

#[test]
fn loading_shows_only_the_loading_line() {
    let snapshot = Snapshot {
        phase: Phase::Loading,
        ..Snapshot::default()
    };
    let out = render(&snapshot, URL);
    assert!(out.contains("Loading..."));
    assert!(!out.contains("Backend Connected"));
    assert!(!out.contains("Retry Connection"));
}

#[test]
fn failure_shows_message_and_retry_but_hides_stale_records() {
    let snapshot = Snapshot {
        phase: Phase::Failed,
        backend_info: Some(BackendInfo::new("old", "t0")),
        users: vec![UserRecord::new(1, "Ann", "a@x.com")],
        error_message: Some(CONNECTION_FAILURE_MESSAGE.to_string()),
    };
    let out = render(&snapshot, URL);
    assert!(out.contains(CONNECTION_FAILURE_MESSAGE));
    assert!(out.contains("[r] Retry Connection"));
    assert!(!out.contains("Ann"));
}

#[test]
fn ready_lists_info_users_in_order_and_backend_url() {
    let snapshot = Snapshot {
        phase: Phase::Ready,
        backend_info: Some(BackendInfo::new("ok", "t1")),
        users: vec![
            UserRecord::new(2, "Jane Smith", "jane@example.com"),
            UserRecord::new(1, "John Doe", "john@example.com"),
        ],
        error_message: None,
    };
    let out = render(&snapshot, URL);
    assert!(out.contains("Message: ok"));
    assert!(out.contains("Details: t1"));
    assert!(out.contains("Jane Smith <jane@example.com>  ID: 2"));
    assert!(out.contains(&format!("Backend URL: {URL}")));

    let jane = out.find("Jane Smith").expect("jane");
    let john = out.find("John Doe").expect("john");
    assert!(jane < john);
}

#[test]
fn ready_without_users_says_so() {
    let snapshot = Snapshot {
        phase: Phase::Ready,
        backend_info: Some(BackendInfo::new("ok", "t1")),
        ..Snapshot::default()
    };
    assert!(render(&snapshot, URL).contains("(none)"));
}

#[test]
fn parses_refresh_and_quit_commands() {
    assert_eq!(parse_command(""), Some(Command::Refresh));
    assert_eq!(parse_command(" R \n"), Some(Command::Refresh));
    assert_eq!(parse_command("retry"), Some(Command::Refresh));
    assert_eq!(parse_command("q"), Some(Command::Quit));
    assert_eq!(parse_command("help"), None);
}
