//! Photomap CLI Library
//!
//! This library provides the client side of Photomap: pinning travel photos to
//! countries, browsing them by year, album or all at once, managing albums and
//! looking up facts about the countries a user visited. It includes modules for
//! backend communication, third-party country data, local state management and
//! the command-line front end.
//!
//! # Modules
//!
//! - `backend` - Photomap backend REST API client
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `countries` - ISO country code to English name lookup
//! - `enrichment` - Country facts from public third-party APIs
//! - `management` - Session, cache, filter and mutation coordination
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use photomap::{config, management::SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> photomap::Res<()> {
//!     config::load_env().await?;
//!     let session = SessionManager::load().await?;
//!     println!("logged in: {}", session.is_logged_in());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod countries;
pub mod enrichment;
pub mod management;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the command-line glue
/// using a boxed dynamic error trait object. Library modules return their
/// own error enums, which all convert into this type with `?`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Fetching photos for {}...", country_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("{} image(s) deleted successfully.", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used only by the command-line layer for errors where there is nothing
/// left to do, such as a missing session before an authenticated command.
///
/// # Example
///
/// ```
/// error!("You are not logged in. Please run photomap login");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a file skipped during upload or a
/// validation message that blocked an action.
///
/// # Example
///
/// ```
/// warning!("Skipping {}: HEIC conversion failed", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
