//! Hook removal command

use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Output;
use crate::git::install::{HookInstaller, InstallStatus};

#[derive(Args, Debug, Clone)]
pub struct UninstallArgs {
    /// Repository to remove the hook from
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,
}

pub fn execute(args: UninstallArgs, output: &Output) -> Result<ExitCode> {
    let installer = HookInstaller::discover(&args.repo)?;

    match installer.uninstall()? {
        InstallStatus::Removed(path) => {
            output.success(&format!("Removed update hook at {}", path.display()));
        }
        InstallStatus::NotInstalled => output.info("No update hook installed"),
        InstallStatus::Foreign(path) => {
            output.warning(&format!(
                "{} was not installed by submodule-guard, leaving it in place",
                path.display()
            ));
        }
        status => bail!("Unexpected uninstall status: {status:?}"),
    }

    Ok(ExitCode::SUCCESS)
}
