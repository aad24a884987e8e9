use anyhow::Result;

use super::gitmodules::{GITMODULES_PATH, submodule_paths};
use super::{Decision, KEYWORD, PushEvent, Violation};
use crate::git::{CommitRecord, RepositoryQuery, Revision};

/// Decides whether a ref update may move submodule pointers.
pub struct UpdateGuard<'a> {
    repo: &'a dyn RepositoryQuery,
    default_base: String,
}

impl<'a> UpdateGuard<'a> {
    /// `default_base` stands in for the old revision when a push creates a ref.
    pub fn new(repo: &'a dyn RepositoryQuery, default_base: impl Into<String>) -> Self {
        Self {
            repo,
            default_base: default_base.into(),
        }
    }

    pub fn classify(&self, event: &PushEvent) -> Result<Decision> {
        let new = match &event.new {
            Revision::Null => {
                tracing::debug!("{} is being deleted, nothing to check", event.ref_name);
                return Ok(Decision::Accept);
            }
            Revision::Id(new) => new.as_str(),
        };

        let base = event.old.as_str().unwrap_or_else(|| {
            tracing::debug!(
                "{} is a new ref, comparing against {}",
                event.ref_name,
                self.default_base
            );
            self.default_base.as_str()
        });

        let modules = match self.repo.read_file_at(base, GITMODULES_PATH) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!("No {GITMODULES_PATH} at {base}, nothing to protect");
                return Ok(Decision::Accept);
            }
            Err(err) => {
                tracing::warn!("Could not read {GITMODULES_PATH} at {base}: {err:#}");
                return Ok(Decision::Accept);
            }
        };

        let paths: Vec<String> = submodule_paths(&modules).into_iter().collect();
        if paths.is_empty() {
            tracing::debug!("{GITMODULES_PATH} at {base} declares no submodule paths");
            return Ok(Decision::Accept);
        }
        tracing::debug!("Submodule paths at {base}: {}", paths.join(", "));

        let commits = self.repo.log_commits(base, new, &paths)?;
        tracing::debug!(
            "{} commit(s) in {base}..{new} touch a submodule",
            commits.len()
        );

        let violations: Vec<Violation> = commits
            .into_iter()
            .filter(|commit| !mentions_submodule(commit))
            .map(Violation::from)
            .collect();

        if violations.is_empty() {
            Ok(Decision::Accept)
        } else {
            Ok(Decision::Reject(violations))
        }
    }
}

fn mentions_submodule(commit: &CommitRecord) -> bool {
    commit.subject.to_lowercase().contains(KEYWORD)
}
