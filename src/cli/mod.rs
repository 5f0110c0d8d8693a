//! # CLI Module
//!
//! This module provides the command-line interface layer for Photomap. It
//! implements every user-facing command and coordinates between the backend
//! client, the third-party country data and the local management layer.
//!
//! ## Command Categories
//!
//! ### Account
//!
//! - [`login`] / [`register`] / [`logout`] - session handling
//! - [`premium`] - upgrade the account to premium
//! - [`profile`] - account details, plan and storage quota
//!
//! ### Photos
//!
//! - [`countries`] - visited countries with totals
//! - [`years`] - years with photos, globally or for one country
//! - [`photos`] - list the photos of a country by year, album or all
//! - [`upload`] - upload files for a country and year
//! - [`delete`] - delete selected photos, a whole year or everything
//! - [`timeline`] - every photo grouped by year
//!
//! ### Albums
//!
//! - [`list_albums`], [`create_album`], [`delete_album`]
//!
//! ### Countries
//!
//! - [`country`] - facts about a country from public APIs
//!
//! ### Interactive
//!
//! - [`manage`] - a prompt driving one photo manager, keeping filter and
//!   selection between actions
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (PhotoManager, SessionManager)
//!     ↓
//! Backend / Enrichment Layer (reqwest)
//! ```
//!
//! Commands never talk HTTP themselves. They load the session, build a
//! backend, run one or more management operations and render the outcome:
//! tables with `tabled`, spinners with `indicatif` and the crate's output
//! macros for notices.
//!
//! ## Error Handling
//!
//! A missing or expired session ends the command with a hint to run
//! `photomap login`. Failed actions print their notice and the command goes
//! on where that makes sense; nothing is retried.

mod albums;
mod auth;
mod country;
mod manage;
mod photos;
mod timeline;

use std::{
    io::{self, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    backend::{BackendError, HttpBackend},
    error,
    management::{MutationError, PhotoManager, SessionManager},
    types::Session,
};

pub use albums::{create_album, delete_album, list_albums};
pub use auth::{login, logout, premium, profile, register};
pub use country::country;
pub use manage::manage;
pub use photos::{countries, delete, photos, upload, years};
pub use timeline::timeline;

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Loads the stored session or ends the command.
async fn load_session() -> (SessionManager, Session) {
    let manager = match SessionManager::load().await {
        Ok(m) => m,
        Err(e) => error!("Failed to load session. Err: {}", e),
    };

    let session = match manager.require() {
        Ok(session) => session.clone(),
        Err(_) => error!("You are not logged in. Please run photomap login"),
    };
    (manager, session)
}

async fn load_backend() -> (HttpBackend, Session) {
    let (_, session) = load_session().await;
    (HttpBackend::from_session(&session), session)
}

async fn photo_manager(country_id: &str) -> PhotoManager<HttpBackend> {
    let (backend, session) = load_backend().await;
    PhotoManager::new(backend, country_id, session.is_premium)
}

/// Ends the command on an expired session, otherwise hands the error back.
fn check_unauthorized(err: BackendError) -> BackendError {
    if matches!(err, BackendError::Unauthorized) {
        error!("Your session has expired. Please run photomap login");
    }
    err
}

/// Prints what the manager queued and ends the command on an expired session.
fn report<T>(
    manager: &mut PhotoManager<HttpBackend>,
    result: Result<T, MutationError>,
) -> Option<T> {
    for notice in manager.take_notices() {
        notice.print();
    }

    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_unauthorized() => {
            error!("Your session has expired. Please run photomap login")
        }
        Err(_) => None,
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(line.trim().to_string())
}

/// Asks a yes/no question, skipped when `yes` was given on the command line.
fn confirm(question: &str, yes: bool) -> bool {
    if yes {
        return true;
    }

    match prompt(&format!("{} [y/N] ", question)) {
        Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
