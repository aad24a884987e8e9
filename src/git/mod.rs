//! Git integration layer
//!
//! Read-only repository queries used by the update hook. Everything the
//! classifier needs from git goes through [`RepositoryQuery`], which has two
//! implementations: [`GitCli`] shells out to the `git` executable and
//! [`LibGit`] reads the repository through libgit2.
//!
//! Hook installation into a repository's git directory lives in [`install`].

pub mod cli;
pub mod install;
pub mod libgit;

pub use cli::GitCli;
pub use libgit::LibGit;

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

use crate::config::{Backend, GuardConfig};

/// A revision as passed to the update hook.
///
/// git hands the hook an all-zero object id when a ref is created (old side)
/// or deleted (new side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Null,
    Id(String),
}

impl Revision {
    /// The revision as git understands it, `None` for the null revision.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Revision::Null => None,
            Revision::Id(id) => Some(id),
        }
    }
}

impl FromStr for Revision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            bail!("revision cannot be empty");
        }
        if s.starts_with('-') {
            bail!("revision cannot start with '-': {s}");
        }
        if s.chars().any(char::is_whitespace) {
            bail!("revision cannot contain whitespace: {s:?}");
        }
        // SHA-1 and SHA-256 object ids
        if (s.len() == 40 || s.len() == 64) && s.bytes().all(|b| b == b'0') {
            return Ok(Revision::Null);
        }
        Ok(Revision::Id(s.to_string()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Null => write!(f, "{}", "0".repeat(40)),
            Revision::Id(id) => write!(f, "{id}"),
        }
    }
}

/// One line of `git log --format=%h:%an:%ae:%s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub short_hash: String,
    pub author_name: String,
    pub author_email: String,
    pub subject: String,
}

impl CommitRecord {
    /// Log format understood by [`CommitRecord::parse_line`].
    pub const LOG_FORMAT: &'static str = "%h:%an:%ae:%s";

    /// Parse a `hash:name:email:subject` record. The subject keeps any colons
    /// it contains. Blank lines and records with fewer than four fields yield
    /// `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return None;
        }

        let mut fields = line.splitn(4, ':');
        let short_hash = fields.next()?;
        let author_name = fields.next()?;
        let author_email = fields.next()?;
        let subject = fields.next()?;

        if short_hash.is_empty() {
            return None;
        }

        Some(Self {
            short_hash: short_hash.to_string(),
            author_name: author_name.to_string(),
            author_email: author_email.to_string(),
            subject: subject.to_string(),
        })
    }
}

/// Read-only repository access needed by the update hook.
pub trait RepositoryQuery {
    /// Content of `path` at `revision`.
    ///
    /// `Ok(None)` when the path does not exist in that revision's tree; any
    /// other problem, including an unknown revision, is an error.
    fn read_file_at(&self, revision: &str, path: &str) -> Result<Option<String>>;

    /// Non-merge commits reachable from `include` but not from `exclude` that
    /// touch at least one of `paths`, newest first. An empty `paths` slice
    /// applies no path restriction.
    fn log_commits(
        &self,
        exclude: &str,
        include: &str,
        paths: &[String],
    ) -> Result<Vec<CommitRecord>>;
}

/// Open the repository the hook runs in with the configured backend.
pub fn open(config: &GuardConfig) -> Result<Box<dyn RepositoryQuery>> {
    match config.backend {
        Backend::Cli => Ok(Box::new(GitCli::new(&config.git))),
        Backend::Libgit2 => Ok(Box::new(LibGit::open_from_env()?)),
    }
}
