use anyhow::{Context, Result, anyhow};
use std::process::{Command, Output};

use super::{CommitRecord, RepositoryQuery};

/// Repository queries answered by the system `git` executable.
///
/// Commands run in the current directory and inherit the environment, so
/// inside a hook they see `GIT_DIR` and the quarantined objects of the push.
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        tracing::trace!("Running {} {}", self.program, args.join(" "));
        Command::new(&self.program)
            .arg("--literal-pathspecs")
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {} {}", self.program, args.join(" ")))
    }

    fn git_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.git(args)?;

        if !output.status.success() {
            return Err(anyhow!(
                "{} {} failed with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        String::from_utf8(output.stdout).context("Git output is not valid UTF-8")
    }
}

impl RepositoryQuery for GitCli {
    fn read_file_at(&self, revision: &str, path: &str) -> Result<Option<String>> {
        // ls-tree fails for an unknown revision but prints nothing for a
        // missing path, which keeps "absent" apart from real errors.
        let listing = self.git_checked(&["ls-tree", "-z", revision, "--", path])?;

        let Some(entry) = listing.split('\0').find(|entry| !entry.is_empty()) else {
            tracing::debug!("{path} does not exist at {revision}");
            return Ok(None);
        };

        // <mode> SP <type> SP <object> TAB <file>
        let mut meta = entry
            .split('\t')
            .next()
            .unwrap_or_default()
            .split_whitespace();
        let kind = meta.nth(1);
        let object = meta.next();

        match (kind, object) {
            (Some("blob"), Some(object)) => {
                let content = self.git_checked(&["cat-file", "blob", object])?;
                Ok(Some(content))
            }
            (Some(kind), _) => {
                tracing::debug!("{path} at {revision} is a {kind}, not a file");
                Ok(None)
            }
            _ => Err(anyhow!("Unexpected ls-tree output: {entry:?}")),
        }
    }

    fn log_commits(
        &self,
        exclude: &str,
        include: &str,
        paths: &[String],
    ) -> Result<Vec<CommitRecord>> {
        let range = format!("{exclude}..{include}");
        let format = format!("--format={}", CommitRecord::LOG_FORMAT);

        let mut args = vec!["log", "--no-merges", format.as_str(), range.as_str(), "--"];
        args.extend(paths.iter().map(String::as_str));

        let stdout = self.git_checked(&args)?;

        let records = stdout
            .lines()
            .filter_map(|line| {
                let record = CommitRecord::parse_line(line);
                if record.is_none() && !line.trim().is_empty() {
                    tracing::debug!("Skipping malformed log record: {line:?}");
                }
                record
            })
            .collect();

        Ok(records)
    }
}
