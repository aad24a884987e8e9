//! # submodule-guard - stop silent submodule bumps at the server
//!
//! A git `update` hook written in Rust. For every ref a push updates, it looks
//! at the commits being added, finds the ones that move a submodule pointer and
//! rejects the push unless those commits say so in their subject line.
//!
//! ## Features
//!
//! - **Push-aware**: handles branch updates, new branches and tags, and ref deletions
//! - **Two backends**: the `git` executable or in-process libgit2
//! - **Fail open**: a broken check reports the problem and lets the push through
//!
//! ## Quick Start
//!
//! ```bash
//! # Install into a bare repository
//! submodule-guard install --repo /srv/git/project.git
//!
//! # git then runs it for every updated ref
//! hooks/update refs/heads/master <old-sha> <new-sha>
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;

pub use cli::{Cli, Output};
pub use config::GuardConfig;

/// Result type alias for submodule-guard operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
