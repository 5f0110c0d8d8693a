use tabled::Table;

use crate::{
    backend::{Backend, BackendError, HttpBackend, auth},
    cli::{check_unauthorized, load_session, prompt, spinner},
    config, error,
    management::{SessionManager, ValidationError},
    success,
    types::{FactTableRow, RegisterRequest},
    utils, warning,
};

fn ask(label: &str, value: Option<String>) -> String {
    match value {
        Some(v) => v,
        None => match prompt(label) {
            Ok(v) => v,
            Err(e) => error!("Cannot read input. Err: {}", e),
        },
    }
}

pub async fn login(email: Option<String>, password: Option<String>) {
    let email = ask("Email: ", email);
    let password = ask("Password: ", password);

    let pb = spinner("Logging in...");
    let result = auth::login(&config::backend_url(), &email, &password).await;
    pb.finish_and_clear();

    let response = match result {
        Ok(r) => r,
        Err(BackendError::Status { message, .. }) if !message.is_empty() => {
            error!("Login failed. {}", message)
        }
        Err(e) => error!("Login failed. Err: {}", e),
    };

    let mut manager = match SessionManager::load().await {
        Ok(m) => m,
        Err(e) => error!("Failed to load session. Err: {}", e),
    };

    match manager.login(response).await {
        Ok(session) => success!("Welcome back, {}!", session.fullname),
        Err(e) => error!("Failed to store session. Err: {}", e),
    }
}

pub async fn register(
    fullname: Option<String>,
    email: Option<String>,
    password: Option<String>,
    country: Option<String>,
) {
    let request = RegisterRequest {
        fullname: ask("Full name: ", fullname),
        email: ask("Email: ", email),
        password: ask("Password: ", password),
        country: ask("Country: ", country),
    };

    if request.password.chars().count() < auth::MIN_PASSWORD_LENGTH {
        let err = ValidationError::PasswordTooShort;
        warning!("{}: {}", err.title(), err);
        return;
    }

    let pb = spinner("Creating account...");
    let result = auth::register(&config::backend_url(), &request).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => success!("Account created. You can now run photomap login"),
        Err(BackendError::Status { message, .. }) => error!("Registration failed. {}", message),
        Err(e) => error!("Registration failed. Err: {}", e),
    }
}

pub async fn logout() {
    let mut manager = match SessionManager::load().await {
        Ok(m) => m,
        Err(e) => error!("Failed to load session. Err: {}", e),
    };

    if !manager.is_logged_in() {
        warning!("You are not logged in.");
        return;
    }

    match manager.logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to remove session. Err: {}", e),
    }
}

pub async fn premium() {
    let (mut manager, session) = load_session().await;
    if session.is_premium {
        success!("You already are a premium user.");
        return;
    }

    let backend = HttpBackend::from_session(&session);
    let pb = spinner("Upgrading account...");
    let result = backend.make_premium().await.map_err(check_unauthorized);
    pb.finish_and_clear();

    if let Err(e) = result {
        error!("Upgrade failed. Err: {}", e);
    }

    match manager.set_premium(true).await {
        Ok(()) => success!("Welcome to premium! Albums are now available."),
        Err(e) => error!("Failed to store session. Err: {}", e),
    }
}

pub async fn profile() {
    let (_, session) = load_session().await;
    let backend = HttpBackend::from_session(&session);

    let pb = spinner("Fetching profile...");
    let counts = backend.photo_counts().await.map_err(check_unauthorized);
    pb.finish_and_clear();

    let counts = counts.unwrap_or_else(|e| {
        warning!("Photo totals are not available. Err: {}", e);
        Default::default()
    });

    let plan = if session.is_premium { "Premium" } else { "Basic" };
    let rows = vec![
        FactTableRow {
            fact: "Name".to_string(),
            value: session.fullname.clone(),
        },
        FactTableRow {
            fact: "Email".to_string(),
            value: session.email.clone(),
        },
        FactTableRow {
            fact: "Plan".to_string(),
            value: plan.to_string(),
        },
        FactTableRow {
            fact: "Storage".to_string(),
            value: utils::storage_quota(session.is_premium).to_string(),
        },
        FactTableRow {
            fact: "Photos".to_string(),
            value: counts.photo_count.to_string(),
        },
        FactTableRow {
            fact: "Countries".to_string(),
            value: counts.country_count.to_string(),
        },
    ];

    println!("{}", Table::new(rows));
}
