//! Server-side update hook
//!
//! git runs the `update` hook once per ref a push changes, with the ref name,
//! the old object id and the new object id. [`UpdateGuard`] decides whether
//! the new commits may land:
//!
//! - ref deletions are always accepted
//! - submodule paths come from `.gitmodules` at the old revision, or at the
//!   configured default base when the ref is new
//! - every non-merge commit that touches one of those paths must mention
//!   "submodule" in its subject line
//!
//! [`Outcome`] is the boundary between the check and the process exit code.
//! Internal failures never block a push.

pub mod gitmodules;
mod update;

pub use update::UpdateGuard;

use std::fmt;
use std::process::ExitCode;

use crate::git::{CommitRecord, Revision};

/// Word a commit subject must contain to move a submodule pointer.
pub const KEYWORD: &str = "submodule";

/// The three arguments git passes to the update hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    pub ref_name: String,
    pub old: Revision,
    pub new: Revision,
}

impl PushEvent {
    pub fn new(ref_name: impl Into<String>, old: Revision, new: Revision) -> Self {
        Self {
            ref_name: ref_name.into(),
            old,
            new,
        }
    }
}

/// A commit that bumps a submodule without saying so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub short_hash: String,
    pub author_name: String,
    pub subject: String,
}

impl From<CommitRecord> for Violation {
    fn from(record: CommitRecord) -> Self {
        Self {
            short_hash: record.short_hash,
            author_name: record.author_name,
            subject: record.subject,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commit {} by {} touches a submodule, but does not mention it in the commit message.",
            self.short_hash, self.author_name
        )
    }
}

/// Result of classifying one push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(Vec<Violation>),
}

/// Everything that can come out of a hook run.
#[derive(Debug)]
pub enum Outcome {
    Accept,
    Reject(Vec<Violation>),
    /// The check itself failed; reported, then treated as an accept
    InternalError(anyhow::Error),
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Numeric status: 1 only for a rejected push.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Accept | Outcome::InternalError(_) => 0,
            Outcome::Reject(_) => 1,
        }
    }
}

impl From<anyhow::Result<Decision>> for Outcome {
    fn from(result: anyhow::Result<Decision>) -> Self {
        match result {
            Ok(Decision::Accept) => Outcome::Accept,
            Ok(Decision::Reject(violations)) => Outcome::Reject(violations),
            Err(err) => Outcome::InternalError(err),
        }
    }
}
