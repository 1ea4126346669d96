//! Auth session persistence and role checks through the session

use chrono::{Duration, Utc};
use listkit::auth::{AuthSession, CredentialStore, FileCredentialStore, LoginResponse};
use listkit::guard::{guard, GuardDecision, RouteTable};
use std::sync::Arc;
use tempfile::TempDir;

fn login(expires_at: String, roles: &[&str]) -> LoginResponse {
    LoginResponse {
        access_token: "access-123".to_string(),
        expires_at,
        roles: Some(roles.iter().map(|r| r.to_string()).collect()),
    }
}

#[test]
fn test_session_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(temp_dir.path().join("credentials.json")));

    let expires = (Utc::now() + Duration::hours(1)).to_rfc3339();
    AuthSession::open(Arc::clone(&store))
        .unwrap()
        .login(login(expires, &["admin"]))
        .unwrap();

    let session = AuthSession::open(store).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.access_token().as_deref(), Some("access-123"));

    let table = RouteTable::standard();
    let decision = guard(
        table.resolve("/admin"),
        session.is_authenticated(),
        &session.role_evaluator(None),
    );
    assert_eq!(decision, GuardDecision::Proceed);
}

#[test]
fn test_expired_session_is_sent_to_login() {
    let temp_dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(temp_dir.path().join("credentials.json")));
    let session = AuthSession::open(store).unwrap();

    let expired = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    session.login(login(expired, &["admin"])).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.access_token().is_some());

    let table = RouteTable::standard();
    assert_eq!(
        guard(
            table.resolve("/demo"),
            session.is_authenticated(),
            &session.role_evaluator(None)
        ),
        GuardDecision::Login {
            redirect: "/demo".to_string()
        }
    );
}

#[test]
fn test_corrupt_credential_file_reads_as_logged_out() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("credentials.json");
    std::fs::write(&path, "{not json").unwrap();

    let session = AuthSession::open(Arc::new(FileCredentialStore::new(&path))).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.roles().is_empty());
}
