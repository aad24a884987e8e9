//! Hook installation command

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Output;
use crate::git::install::{HookInstaller, InstallStatus};

#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Repository to install into (bare or with a working tree)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,

    /// Replace an existing update hook that was not installed by us
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: InstallArgs, output: &Output) -> Result<ExitCode> {
    let installer = HookInstaller::discover(&args.repo)?;
    let executable =
        std::env::current_exe().context("Failed to locate the submodule-guard executable")?;

    output.verbose(&format!("Hook will run {}", executable.display()));

    match installer.install(&executable, args.force)? {
        InstallStatus::Installed(path) => {
            output.success(&format!("Installed update hook at {}", path.display()));
        }
        InstallStatus::Replaced(path) => {
            output.success(&format!("Replaced update hook at {}", path.display()));
        }
        InstallStatus::Foreign(path) => {
            bail!(
                "{} already exists and was not installed by submodule-guard; use --force to replace it",
                path.display()
            );
        }
        status => bail!("Unexpected install status: {status:?}"),
    }

    Ok(ExitCode::SUCCESS)
}
