use anyhow::{Result, bail};
use contract_cli::config::{OptionOverrides, resolve_options};
use contract_cli::pipeline::{CleanOutcome, default_output_path, run_file};
use tracing::info_span;

use crate::cli::{CheckArgs, CleanArgs};

pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let span = info_span!("clean", dry_run = args.dry_run);
    let _guard = span.enter();

    let overrides = OptionOverrides {
        policy: args.policy.map(Into::into),
        skip_overlaps: args.no_overlap,
    };
    let options = resolve_options(args.config.as_deref(), overrides)?;
    let output = (!args.dry_run).then(|| {
        args.output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input))
    });
    if output.as_deref() == Some(args.input.as_path()) {
        bail!("output would overwrite the input file {}", args.input.display());
    }
    run_file(&args.input, output.as_deref(), &options)
}

pub fn run_check(args: &CheckArgs) -> Result<CleanOutcome> {
    let span = info_span!("check");
    let _guard = span.enter();

    let options = resolve_options(args.config.as_deref(), OptionOverrides::default())?;
    run_file(&args.input, None, &options)
}
