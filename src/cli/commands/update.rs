//! The update hook itself
//!
//! Runs the submodule check for one ref and turns the [`Outcome`] into the
//! process exit code: 0 to accept, 1 to reject. A failing check is reported
//! and accepted.

use anyhow::{Result, bail};
use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Output, UpdateArgs};
use crate::config::{GuardConfig, Overrides};
use crate::git;
use crate::hooks::{Decision, Outcome, PushEvent, UpdateGuard};

pub fn execute(args: UpdateArgs, config_path: Option<&Path>, output: &Output) -> Result<ExitCode> {
    let (Some(ref_name), Some(old), Some(new)) = (args.ref_name, args.old, args.new) else {
        bail!("Expected <REFNAME> <OLDREV> <NEWREV>");
    };

    let event = PushEvent::new(ref_name, old, new);
    let overrides = Overrides {
        default_base: args.default_base,
    };

    output.verbose(&format!(
        "Checking {} {}..{}",
        event.ref_name, event.old, event.new
    ));

    let outcome = Outcome::from(check(&event, config_path, &overrides));
    report(&outcome, output);

    Ok(outcome.exit_code())
}

fn check(event: &PushEvent, config_path: Option<&Path>, overrides: &Overrides) -> Result<Decision> {
    let config = GuardConfig::load_with(config_path, overrides)?;
    tracing::debug!(
        "Using {:?} backend, default base {}",
        config.backend,
        config.default_base
    );

    let repo = git::open(&config)?;
    UpdateGuard::new(repo.as_ref(), config.default_base.as_str()).classify(event)
}

fn report(outcome: &Outcome, output: &Output) {
    match outcome {
        Outcome::Accept => tracing::info!("Push accepted"),
        Outcome::Reject(violations) => {
            for violation in violations {
                output.rejection(&violation.to_string());
            }
        }
        Outcome::InternalError(err) => {
            output.error(&format!(
                "Submodule check failed, allowing push: {err:#}"
            ));
        }
    }
}
