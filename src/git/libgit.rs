use anyhow::{Context, Result};
use git2::{DiffOptions, ErrorCode, ObjectType, Oid, Repository, Sort};
use std::path::Path;

use super::{CommitRecord, RepositoryQuery};

/// Repository queries answered in-process through libgit2.
pub struct LibGit {
    repo: Repository,
}

impl LibGit {
    /// Open the repository described by the environment (`GIT_DIR`,
    /// `GIT_OBJECT_DIRECTORY`, ...) or discovered from the current directory.
    pub fn open_from_env() -> Result<Self> {
        let repo = Repository::open_from_env().context("No Git repository found")?;
        Ok(Self { repo })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open Git repository")?;
        Ok(Self { repo })
    }

    fn commit_id(&self, revision: &str) -> Result<Oid> {
        let commit = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .with_context(|| format!("Failed to resolve {revision} to a commit"))?;
        Ok(commit.id())
    }

    fn touches_any(&self, commit: &git2::Commit<'_>, paths: &[String]) -> Result<bool> {
        if paths.is_empty() {
            return Ok(true);
        }

        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        // Submodule paths are literal, never globs
        let mut opts = DiffOptions::new();
        opts.disable_pathspec_match(true);
        for path in paths {
            opts.pathspec(path);
        }

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .with_context(|| format!("Failed to diff commit {}", commit.id()))?;

        Ok(diff.deltas().len() > 0)
    }
}

impl RepositoryQuery for LibGit {
    fn read_file_at(&self, revision: &str, path: &str) -> Result<Option<String>> {
        let tree = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_tree())
            .with_context(|| format!("Failed to resolve {revision} to a tree"))?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(err) if err.code() == ErrorCode::NotFound => {
                tracing::debug!("{path} does not exist at {revision}");
                return Ok(None);
            }
            Err(err) => return Err(err).context(format!("Failed to look up {path} at {revision}")),
        };

        if entry.kind() != Some(ObjectType::Blob) {
            tracing::debug!("{path} at {revision} is not a file");
            return Ok(None);
        }

        let blob = self
            .repo
            .find_blob(entry.id())
            .with_context(|| format!("Failed to read {path} at {revision}"))?;
        let content = std::str::from_utf8(blob.content())
            .with_context(|| format!("{path} at {revision} is not valid UTF-8"))?;

        Ok(Some(content.to_string()))
    }

    fn log_commits(
        &self,
        exclude: &str,
        include: &str,
        paths: &[String],
    ) -> Result<Vec<CommitRecord>> {
        let mut walk = self.repo.revwalk().context("Failed to start revision walk")?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(self.commit_id(include)?)?;
        walk.hide(self.commit_id(exclude)?)?;

        let mut records = Vec::new();
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;

            if commit.parent_count() > 1 || !self.touches_any(&commit, paths)? {
                continue;
            }

            let short_id = commit.as_object().short_id()?;
            let author = commit.author();
            records.push(CommitRecord {
                short_hash: short_id.as_str().unwrap_or_default().to_string(),
                author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
                author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
                subject: commit.summary().unwrap_or_default().to_string(),
            });
        }

        Ok(records)
    }
}
