//! Fedora Setup Library
//!
//! This library provides the configuration resolution for the Fedora
//! post-install setup tool. The setup steps themselves (package
//! installation, dotfiles deployment) run out of process and consume the
//! values resolved here.

pub mod cli;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{InstallerConfig, normalize_path, shell_quote};
pub use error::{Result, SetupError};
