//! Hook installation
//!
//! Writes the `update` hook into a repository's git directory. The hook is a
//! small shell script that execs this binary with the arguments git passes.

use anyhow::{Context, Result, bail};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Name of the server-side hook git runs once per updated ref.
pub const HOOK_NAME: &str = "update";

const MARKER: &str = "# installed by submodule-guard";

/// What happened to the hook file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installed(PathBuf),
    Replaced(PathBuf),
    Removed(PathBuf),
    NotInstalled,
    /// A hook exists but was not written by us
    Foreign(PathBuf),
}

/// Git directory hooks for one repository.
pub struct HookInstaller {
    hooks_dir: PathBuf,
}

impl HookInstaller {
    /// Locate the repository at or above `path`. Bare repositories are
    /// supported, since that is where server-side hooks live.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("No Git repository found at {}", path.display()))?;

        Ok(Self::for_git_dir(repo.path()))
    }

    pub fn for_git_dir<P: AsRef<Path>>(git_dir: P) -> Self {
        Self {
            hooks_dir: git_dir.as_ref().join("hooks"),
        }
    }

    pub fn hook_path(&self) -> PathBuf {
        self.hooks_dir.join(HOOK_NAME)
    }

    pub fn is_installed(&self) -> bool {
        std::fs::read_to_string(self.hook_path())
            .map(|content| content.contains(MARKER))
            .unwrap_or(false)
    }

    /// Install a hook running `executable`. A hook not written by us is only
    /// replaced with `force`.
    pub fn install(&self, executable: &Path, force: bool) -> Result<InstallStatus> {
        let hook_path = self.hook_path();
        let existed = hook_path.exists();

        if existed && !self.is_installed() && !force {
            return Ok(InstallStatus::Foreign(hook_path));
        }

        std::fs::create_dir_all(&self.hooks_dir).context("Failed to create hooks directory")?;
        std::fs::write(&hook_path, hook_script(executable)?)
            .context("Failed to write hook file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)
                .context("Failed to set hook file permissions")?;
        }

        if existed {
            Ok(InstallStatus::Replaced(hook_path))
        } else {
            Ok(InstallStatus::Installed(hook_path))
        }
    }

    /// Remove the hook if we installed it.
    pub fn uninstall(&self) -> Result<InstallStatus> {
        let hook_path = self.hook_path();

        if !hook_path.exists() {
            return Ok(InstallStatus::NotInstalled);
        }
        if !self.is_installed() {
            return Ok(InstallStatus::Foreign(hook_path));
        }

        std::fs::remove_file(&hook_path).context("Failed to remove hook file")?;
        Ok(InstallStatus::Removed(hook_path))
    }
}

fn hook_script(executable: &Path) -> Result<String> {
    let Some(executable) = executable.to_str() else {
        bail!("Executable path is not valid UTF-8: {}", executable.display());
    };

    Ok(format!(
        "#!/bin/sh\n{MARKER}\nexec {} \"$@\"\n",
        shell_quote(executable)
    ))
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
