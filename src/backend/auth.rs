use reqwest::Client;

use crate::{
    backend::BackendError,
    types::{ErrorMessage, LoginRequest, LoginResponse, RegisterRequest},
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Exchanges email and password for a session token.
///
/// Unlike the authenticated endpoints, a rejected login is not mapped to
/// [`BackendError::Unauthorized`]: the backend explains what went wrong in
/// the response body and that text is handed back as the error message.
///
/// # Arguments
///
/// * `base_url` - Backend base URL without trailing slash
/// * `email` - Account email
/// * `password` - Account password
///
/// # Example
///
/// ```
/// let res = login("http://localhost:8092", "me@example.com", "secret").await?;
/// let session: Session = res.into();
/// ```
pub async fn login(
    base_url: &str,
    email: &str,
    password: &str,
) -> Result<LoginResponse, BackendError> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    let response = Client::new()
        .post(format!("{}/api/auth/login", base_url))
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            message: message.trim().to_string(),
        });
    }

    Ok(response.json::<LoginResponse>().await?)
}

/// Creates a new account.
///
/// The password length is not checked here; callers validate it with
/// [`MIN_PASSWORD_LENGTH`] before sending anything. On failure the backend's
/// JSON `message` is used when present.
pub async fn register(base_url: &str, request: &RegisterRequest) -> Result<(), BackendError> {
    let response = Client::new()
        .post(format!("{}/api/auth/register", base_url))
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorMessage>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Registration failed.".to_string());

    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}
