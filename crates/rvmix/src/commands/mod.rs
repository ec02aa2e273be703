//! Command implementations.
//!
//! Each submodule handles a specific CLI command.

mod profile;
mod report;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Profile { .. } => handle_profile(cli),
        Commands::Report { .. } => handle_report(cli),
    }
}

fn handle_profile(cli: &Cli) -> i32 {
    let Commands::Profile {
        target,
        project,
        isa,
        no_pk,
        no_build,
        jobs,
        spike,
        objdump,
        output,
        timeout,
        top,
        watch,
        format,
    } = &cli.command
    else {
        unreachable!("profile command variant mismatch");
    };

    profile::cmd_profile(&profile::ProfileArgs {
        target,
        project,
        isa,
        no_pk: *no_pk,
        no_build: *no_build,
        jobs: *jobs,
        spike: spike.clone(),
        objdump: objdump.clone(),
        output: output.clone(),
        timeout: *timeout,
        top: *top,
        watch,
        format: *format,
    })
}

fn handle_report(cli: &Cli) -> i32 {
    let Commands::Report {
        disasm,
        hist,
        top,
        watch,
        format,
    } = &cli.command
    else {
        unreachable!("report command variant mismatch");
    };

    report::cmd_report(disasm, hist, *top, watch, *format)
}
