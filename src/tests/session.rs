use super::{Call, FakeBackend};
use crate::api::RawResponse;
use crate::console::ScriptedConsole;
use crate::session::{bootstrap, StartChoice};
use crate::ClientError;
use reqwest::StatusCode;

fn user(user_id: &str, email: &str) -> RawResponse {
    RawResponse::new(
        StatusCode::OK,
        format!(r#"{{"userId":"{user_id}","email":"{email}"}}"#),
    )
}

#[test]
fn test_start_choice_parse() {
    assert_eq!(StartChoice::parse("1"), Some(StartChoice::LogIn));
    assert_eq!(StartChoice::parse(" 2 "), Some(StartChoice::CreateUser));
    assert_eq!(StartChoice::parse("3"), Some(StartChoice::Exit));
    assert_eq!(StartChoice::parse("4"), None);
    assert_eq!(StartChoice::parse(""), None);
    assert_eq!(StartChoice::parse("log in"), None);
}

#[test]
fn test_login_adopts_identity() {
    let api = FakeBackend::new().respond(user("u1", "a@b.com"));
    let mut console = ScriptedConsole::new(["1", "a@b.com"]);

    let session = bootstrap(&api, &mut console).unwrap().unwrap();

    assert_eq!(session.user_id(), "u1");
    assert_eq!(session.identity().email, "a@b.com");
    assert_eq!(api.calls(), [Call::Login("a@b.com".into())]);
    assert!(console.saw("Logged in as a@b.com (User ID: u1)"));
}

#[test]
fn test_create_user_adopts_identity() {
    let api = FakeBackend::new().respond(RawResponse::new(
        StatusCode::CREATED,
        r#"{"userId":"u2","email":"new@b.com"}"#,
    ));
    let mut console = ScriptedConsole::new(["2", "new@b.com"]);

    let session = bootstrap(&api, &mut console).unwrap().unwrap();

    assert_eq!(session.user_id(), "u2");
    assert_eq!(api.calls(), [Call::CreateUser("new@b.com".into())]);
    assert!(console.saw("User created: new@b.com (User ID: u2)"));
}

#[test]
fn test_exit_makes_no_calls() {
    let api = FakeBackend::new();
    let mut console = ScriptedConsole::new(["3"]);

    assert!(bootstrap(&api, &mut console).unwrap().is_none());
    assert!(api.calls().is_empty());
}

#[test]
fn test_invalid_choices_make_no_calls() {
    let api = FakeBackend::new();
    let mut console = ScriptedConsole::new(["0", "4", "", "abc", "3"]);

    assert!(bootstrap(&api, &mut console).unwrap().is_none());
    assert!(api.calls().is_empty());
    let warnings = console
        .transcript()
        .iter()
        .filter(|l| l.starts_with("warning: Invalid choice"))
        .count();
    assert_eq!(warnings, 4);
    assert_eq!(console.prompts(), 5);
}

#[test]
fn test_malformed_login_leaves_identity_unset() {
    let body = r#"{"email":"a@b.com"}"#;
    let api = FakeBackend::new().respond(RawResponse::new(StatusCode::OK, body));
    let mut console = ScriptedConsole::new(["1", "a@b.com", "3"]);

    let outcome = bootstrap(&api, &mut console).unwrap();

    assert!(outcome.is_none(), "malformed identity must not be adopted");
    assert!(console.saw(&format!(
        "error: Unexpected response format when logging in. Response: {body}"
    )));
    assert_eq!(console.remaining_input(), 0);
}

#[test]
fn test_failed_login_returns_to_start_then_create_succeeds() {
    let api = FakeBackend::new()
        .respond(RawResponse::new(StatusCode::UNAUTHORIZED, ""))
        .respond(user("u9", "a@b.com"));
    let mut console = ScriptedConsole::new(["1", "a@b.com", "2", "a@b.com"]);

    let session = bootstrap(&api, &mut console).unwrap().unwrap();

    assert_eq!(session.user_id(), "u9");
    assert!(console.saw("error: Login failed. User not found or incorrect email."));
    assert_eq!(
        api.calls(),
        [
            Call::Login("a@b.com".into()),
            Call::CreateUser("a@b.com".into())
        ]
    );
}

#[test]
fn test_failed_create_echoes_body() {
    let api = FakeBackend::new().respond(RawResponse::new(
        StatusCode::BAD_REQUEST,
        "email already taken",
    ));
    let mut console = ScriptedConsole::new(["2", "bad", "3"]);

    assert!(bootstrap(&api, &mut console).unwrap().is_none());
    assert!(console.saw("error: Error creating user. Response: email already taken"));
}

#[test]
fn test_transport_failure_stays_at_start() {
    let api = FakeBackend::new().unreachable();
    let mut console = ScriptedConsole::new(["1", "a@b.com", "3"]);

    assert!(bootstrap(&api, &mut console).unwrap().is_none());
    assert!(console.saw("error: test request failed"));
}

#[test]
fn test_input_closed_is_fatal() {
    let api = FakeBackend::new();
    let mut console = ScriptedConsole::new(["7"]);

    let err = bootstrap(&api, &mut console).unwrap_err();
    assert!(matches!(err, ClientError::InputClosed));
}
