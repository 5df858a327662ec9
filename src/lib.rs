//! Spotify Playlist Snapshot Daemon Library
//!
//! This library backs up a user's Spotify listening data into generated
//! playlists on a schedule. The heart of it is the OAuth 2.0 PKCE session
//! lifecycle: a stored refresh token is exchanged silently whenever possible,
//! and a short-lived local callback listener handles the one interactive
//! authorization a fresh install needs.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local authorization listener
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy for the authorization core and API gateway
//! - `management` - Session lifecycle and credential persistence
//! - `scheduler` - Interval-driven task execution
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Token exchange and the authenticated request gateway
//! - `tasks` - Playlist snapshot task variants
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE generation and scheduling helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod scheduler;
pub mod server;
pub mod spotify;
pub mod tasks;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the task bodies and CLI glue, where any failure ends at a logged,
/// failed run. The authorization core uses the typed errors in [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a timestamped informational message with a blue bullet point.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!(
      "[{}] [{}] {}",
      ::chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
      "o".blue().bold(),
      std::format_args!($($arg)*)
    );
  })
}

/// Prints a timestamped success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!(
      "[{}] [{}] {}",
      ::chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
      "✓".green().bold(),
      std::format_args!($($arg)*)
    );
  })
}

/// Prints a timestamped error message with a red exclamation mark and exits
/// the program.
///
/// Reserved for unrecoverable startup problems such as missing configuration.
/// Runtime failures inside tasks or the authorization flow are logged with
/// [`warning!`] instead so that scheduling continues.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!(
      "[{}] [{}] {}",
      ::chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
      "!".red().bold(),
      std::format_args!($($arg)*)
    );
    std::process::exit(1);
  })
}

/// Prints a timestamped warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!(
      "[{}] [{}] {}",
      ::chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
      "!".yellow().bold(),
      std::format_args!($($arg)*)
    );
  })
}
