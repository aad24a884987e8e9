//! Shared fixtures: throwaway git repositories with a pinned identity and
//! configuration, isolated from the developer's own git setup.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub const AUTHOR_NAME: &str = "Jane Doe";
pub const AUTHOR_EMAIL: &str = "jane@x.com";

pub fn null_revision() -> String {
    "0".repeat(40)
}

pub struct TestEnv {
    tmp: TempDir,
    global_config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let global_config = tmp.path().join("gitconfig");
        fs::write(
            &global_config,
            "[init]\n\tdefaultBranch = master\n\
             [protocol \"file\"]\n\tallow = always\n\
             [advice]\n\tdetachedHead = false\n",
        )
        .expect("write git config");

        Self { tmp, global_config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn apply_env(&self, cmd: &mut std::process::Command) {
        cmd.env("GIT_CONFIG_GLOBAL", &self.global_config)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", AUTHOR_NAME)
            .env("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL)
            .env("GIT_COMMITTER_NAME", AUTHOR_NAME)
            .env("GIT_COMMITTER_EMAIL", AUTHOR_EMAIL)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .env_remove("SUBMODULE_GUARD_DEFAULT_BASE")
            .env_remove("SUBMODULE_GUARD_BACKEND")
            .env_remove("SUBMODULE_GUARD_GIT")
            .env_remove("RUST_LOG");
    }

    /// Run git in `dir` and return its output, whatever the exit status.
    pub fn git_output(&self, dir: &Path, args: &[&str]) -> Output {
        let mut cmd = std::process::Command::new("git");
        self.apply_env(&mut cmd);
        cmd.args(args)
            .current_dir(dir)
            .output()
            .expect("failed to run git")
    }

    /// Run git in `dir`, panic on failure, return trimmed stdout.
    pub fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = self.git_output(dir, args);
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// The hook binary, run in `dir` with the same isolated environment.
    pub fn guard(&self, dir: &Path) -> Command {
        let mut std_cmd = std::process::Command::new(
            assert_cmd::cargo::cargo_bin("submodule-guard"),
        );
        self.apply_env(&mut std_cmd);
        std_cmd.current_dir(dir);
        Command::from_std(std_cmd)
    }

    pub fn init(&self, name: &str) -> PathBuf {
        let dir = self.path(name);
        self.git(self.tmp.path(), &["init", "--quiet", name]);
        dir
    }

    pub fn init_bare(&self, name: &str) -> PathBuf {
        let dir = self.path(name);
        self.git(self.tmp.path(), &["init", "--quiet", "--bare", name]);
        dir
    }

    pub fn clone(&self, source: &Path, name: &str) -> PathBuf {
        let dir = self.path(name);
        self.git(
            self.tmp.path(),
            &["clone", "--quiet", source.to_str().unwrap(), name],
        );
        dir
    }

    /// Append a line to `file` in `repo`, stage and commit it. Returns the
    /// new commit id.
    pub fn commit_file(&self, repo: &Path, file: &str, line: &str, message: &str) -> String {
        let path = repo.join(file);
        let mut content = fs::read_to_string(&path).unwrap_or_default();
        content.push_str(line);
        content.push('\n');
        fs::write(&path, content).expect("write file");

        self.git(repo, &["add", file]);
        self.git(repo, &["commit", "--quiet", "-m", message]);
        self.rev_parse(repo, "HEAD")
    }

    pub fn rev_parse(&self, repo: &Path, revision: &str) -> String {
        self.git(repo, &["rev-parse", revision])
    }

    pub fn short(&self, repo: &Path, revision: &str) -> String {
        self.git(repo, &["rev-parse", "--short", revision])
    }

    /// Register `library` as a submodule at `path` and commit it.
    pub fn add_submodule(&self, repo: &Path, library: &Path, path: &str, message: &str) -> String {
        self.git(
            repo,
            &["submodule", "--quiet", "add", library.to_str().unwrap(), path],
        );
        self.git(repo, &["commit", "--quiet", "-m", message]);
        self.rev_parse(repo, "HEAD")
    }

    /// Move the submodule at `path` to a new commit and stage the new pointer
    /// in `repo`, without committing.
    pub fn advance_submodule(&self, repo: &Path, path: &str) {
        let checkout = repo.join(path);
        self.commit_file(&checkout, "README.txt", "This version is a lot better", "Improved library");
        self.git(repo, &["add", path]);
    }
}

/// A working repository with `lib/library` registered as a submodule.
pub struct SubmoduleRepo {
    pub env: TestEnv,
    pub library: PathBuf,
    pub repo: PathBuf,
    /// Commit that registered the submodule
    pub base: String,
}

impl SubmoduleRepo {
    pub fn new() -> Self {
        let env = TestEnv::new();

        let library = env.init("library");
        env.commit_file(&library, "README.txt", "This is a library", "First commit of the library");

        let repo = env.init("wc");
        env.commit_file(&repo, "README.txt", "Hello world!", "initial commit");
        let base = env.add_submodule(&repo, &library, "lib/library", "Added library as submodule");

        Self {
            env,
            library,
            repo,
            base,
        }
    }

    /// Commit a submodule bump with `message`, returning the commit id.
    pub fn bump(&self, message: &str) -> String {
        self.env.advance_submodule(&self.repo, "lib/library");
        self.env.git(&self.repo, &["commit", "--quiet", "-m", message]);
        self.env.rev_parse(&self.repo, "HEAD")
    }

    pub fn guard(&self) -> Command {
        self.env.guard(&self.repo)
    }
}
