//! Command-line interface for submodule-guard
//!
//! Without a subcommand the binary behaves as git's `update` hook and expects
//! exactly the three arguments git passes. The subcommands manage the hook
//! and inspect configuration.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

pub use output::Output;

use crate::git::Revision;

/// Git update hook that rejects pushes with unannounced submodule bumps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of the current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub update: UpdateArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments git passes to the update hook
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Name of the ref being updated, e.g. refs/heads/master
    #[arg(value_name = "REFNAME", required = true)]
    pub ref_name: Option<String>,

    /// Object id the ref pointed to, all zeros for a new ref
    #[arg(value_name = "OLDREV", required = true)]
    pub old: Option<Revision>,

    /// Object id the ref will point to, all zeros for a deletion
    #[arg(value_name = "NEWREV", required = true)]
    pub new: Option<Revision>,

    /// Base revision for new refs (overrides configuration)
    #[arg(long, value_name = "REV", global = true)]
    pub default_base: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the update hook into a repository
    Install(commands::install::InstallArgs),
    /// Remove the update hook from a repository
    Uninstall(commands::uninstall::UninstallArgs),
    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<ExitCode> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Install(args)) => commands::install::execute(args, &output),
            Some(Commands::Uninstall(args)) => commands::uninstall::execute(args, &output),
            Some(Commands::Config) => {
                commands::config::execute(self.config.as_deref(), self.update.default_base)
            }
            None => commands::update::execute(self.update, self.config.as_deref(), &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // git forwards hook stderr to the pusher, so stay silent unless asked
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
