use photomap::{
    management::{SessionError, SessionManager},
    types::LoginResponse,
};
use tempfile::TempDir;

fn login_response(premium: &str) -> LoginResponse {
    let json = format!(
        r#"{{"token":"abc123","fullname":"Ana Lima","email":"ana@example.com","premium":{}}}"#,
        premium
    );
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_premium_flag_accepts_bool_and_text() {
    assert!(login_response("true").premium);
    assert!(login_response("\"true\"").premium);
    assert!(!login_response("\"false\"").premium);
    assert!(!login_response("null").premium);

    let missing: LoginResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
    assert!(!missing.premium);
    assert!(missing.fullname.is_empty());
}

#[tokio::test]
async fn test_missing_file_means_logged_out() {
    let dir = TempDir::new().unwrap();
    let manager = SessionManager::load_from(dir.path().join("session.json"))
        .await
        .unwrap();

    assert!(!manager.is_logged_in());
    assert!(!manager.is_premium());
    assert!(matches!(manager.require(), Err(SessionError::NotLoggedIn)));
}

#[tokio::test]
async fn test_login_persists_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut manager = SessionManager::load_from(path.clone()).await.unwrap();
    let session = manager.login(login_response("false")).await.unwrap();
    assert_eq!(session.fullname, "Ana Lima");
    assert!(path.is_file());

    let reloaded = SessionManager::load_from(path).await.unwrap();
    let session = reloaded.require().unwrap();
    assert_eq!(session.token, "abc123");
    assert_eq!(session.email, "ana@example.com");
    assert!(!session.is_premium);
}

#[tokio::test]
async fn test_set_premium_is_written_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut manager = SessionManager::load_from(path.clone()).await.unwrap();
    manager.login(login_response("false")).await.unwrap();
    manager.set_premium(true).await.unwrap();

    let reloaded = SessionManager::load_from(path).await.unwrap();
    assert!(reloaded.is_premium());
}

#[tokio::test]
async fn test_set_premium_requires_session() {
    let dir = TempDir::new().unwrap();
    let mut manager = SessionManager::load_from(dir.path().join("session.json"))
        .await
        .unwrap();

    assert!(matches!(
        manager.set_premium(true).await,
        Err(SessionError::NotLoggedIn)
    ));
}

#[tokio::test]
async fn test_logout_removes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut manager = SessionManager::load_from(path.clone()).await.unwrap();
    manager.login(login_response("true")).await.unwrap();
    manager.logout().await.unwrap();

    assert!(!path.exists());
    assert!(!manager.is_logged_in());
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = SessionManager::load_from(path).await;
    assert!(matches!(result, Err(SessionError::SerdeError(_))));
}

#[tokio::test]
async fn test_empty_token_is_not_a_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"token":"","fullname":"A","email":"a@b.c","is_premium":false}"#,
    )
    .unwrap();

    let manager = SessionManager::load_from(path).await.unwrap();
    assert!(manager.current().is_some());
    assert!(!manager.is_logged_in());
}
