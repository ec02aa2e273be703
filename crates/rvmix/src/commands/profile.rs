//! Profile command: build, simulate, disassemble, aggregate.
//!
//! Mirrors the manual workflow: `make <target>`, `spike -g` for the PC
//! histogram, `objdump -d` for the address map, then in-memory aggregation.
//! The histogram arrives on Spike's stderr and the listing on objdump's
//! stdout; both are redirected to files in the output directory and parsed
//! from disk.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use rvmix::{build, toolchain};

use crate::cli::{EXIT_FAILURE, OutputFormat};
use crate::commands::report::aggregate_and_report;
use crate::terminal::Spinner;

/// Arguments for the profile pipeline.
pub struct ProfileArgs<'a> {
    pub target: &'a str,
    pub project: &'a Path,
    pub isa: &'a str,
    pub no_pk: bool,
    pub no_build: bool,
    pub jobs: usize,
    pub spike: Option<PathBuf>,
    pub objdump: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub timeout: u64,
    pub top: usize,
    pub watch: &'a [String],
    pub format: OutputFormat,
}

/// Profile a target's instruction mix under Spike.
pub fn cmd_profile(args: &ProfileArgs<'_>) -> i32 {
    let spike_path = match resolve_spike(args.spike.as_deref()) {
        Ok(path) => path,
        Err(code) => return code,
    };
    let objdump_path = match resolve_objdump(args.objdump.as_deref()) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let output_dir = match prepare_output_dir(args.output.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: failed to prepare output directory: {e}");
            return EXIT_FAILURE;
        }
    };

    let binary = args.project.join(args.target);
    log_setup(&binary, args.isa, &spike_path, &objdump_path, &output_dir);

    if !args.no_build
        && let Err(code) = build_target(args.project, args.target, args.jobs)
    {
        return code;
    }

    if !binary.is_file() {
        eprintln!("Error: binary not found at {}", binary.display());
        return EXIT_FAILURE;
    }

    let hist_path = match run_spike(
        &spike_path,
        &binary,
        args.isa,
        args.no_pk,
        &output_dir,
        args.timeout,
    ) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let disasm_path = match run_objdump(&objdump_path, &binary, &output_dir) {
        Ok(path) => path,
        Err(code) => return code,
    };

    eprintln!("Step 4: Aggregating...");
    aggregate_and_report(&disasm_path, &hist_path, args.top, args.watch, args.format)
}

fn resolve_spike(explicit: Option<&Path>) -> Result<PathBuf, i32> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let Some(path) = toolchain::find_spike() else {
        eprintln!("Error: Spike not found in PATH");
        eprintln!("Install from https://github.com/riscv-software-src/riscv-isa-sim");
        return Err(EXIT_FAILURE);
    };
    Ok(path)
}

fn resolve_objdump(explicit: Option<&Path>) -> Result<PathBuf, i32> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let Some(path) = toolchain::find_objdump() else {
        eprintln!("Error: RISC-V objdump not found in PATH");
        eprintln!("Install a riscv-gnu-toolchain or pass --objdump");
        return Err(EXIT_FAILURE);
    };
    Ok(path)
}

fn prepare_output_dir(output: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => Ok(tempfile::tempdir()?.keep()),
    }
}

fn log_setup(binary: &Path, isa: &str, spike_path: &Path, objdump_path: &Path, output_dir: &Path) {
    eprintln!("Binary: {}", binary.display());
    eprintln!("ISA: {isa}");
    eprintln!("Spike: {}", spike_path.display());
    eprintln!("objdump: {}", objdump_path.display());
    eprintln!("Output: {}", output_dir.display());
    eprintln!();
}

fn build_target(project: &Path, target: &str, jobs: usize) -> Result<(), i32> {
    eprintln!("Step 1: Building {target}...");
    match build::run_make(project, target, jobs) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            Err(EXIT_FAILURE)
        }
    }
}

fn run_spike(
    spike_path: &Path,
    binary: &Path,
    isa: &str,
    no_pk: bool,
    output_dir: &Path,
    timeout: u64,
) -> Result<PathBuf, i32> {
    eprintln!("Step 2: Running Spike...");
    let hist_path = output_dir.join("hist.log");
    let hist_file = match File::create(&hist_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: failed to create {}: {e}", hist_path.display());
            return Err(EXIT_FAILURE);
        }
    };

    let spinner = Spinner::new(format!("Simulating ({isa})..."));
    let mut cmd = Command::new(spike_path);
    cmd.arg("-g").arg(format!("--isa={isa}"));
    if !no_pk {
        cmd.arg("pk");
    }
    cmd.arg(binary).stderr(Stdio::from(hist_file));

    match toolchain::run_command_with_timeout(&mut cmd, Duration::from_secs(timeout)) {
        Ok(status) if status.success() => {
            spinner.finish_with_success("Simulation complete");
            Ok(hist_path)
        }
        Ok(status) => {
            spinner.finish_with_failure(&format!(
                "Spike failed with exit code {:?}",
                status.code()
            ));
            Err(EXIT_FAILURE)
        }
        Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
            spinner.finish_with_failure(&format!("Spike timed out after {timeout}s"));
            Err(EXIT_FAILURE)
        }
        Err(e) => {
            spinner.finish_with_failure(&format!("failed to run Spike: {e}"));
            Err(EXIT_FAILURE)
        }
    }
}

fn run_objdump(objdump_path: &Path, binary: &Path, output_dir: &Path) -> Result<PathBuf, i32> {
    eprintln!("Step 3: Disassembling...");
    let disasm_path = output_dir.join("disasm.log");
    let disasm_file = match File::create(&disasm_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: failed to create {}: {e}", disasm_path.display());
            return Err(EXIT_FAILURE);
        }
    };

    let status = Command::new(objdump_path)
        .arg("-d")
        .arg(binary)
        .stdout(Stdio::from(disasm_file))
        .status();

    match status {
        Ok(status) if status.success() => Ok(disasm_path),
        Ok(status) => {
            eprintln!("Error: objdump failed with exit code {:?}", status.code());
            Err(EXIT_FAILURE)
        }
        Err(e) => {
            eprintln!("Error: failed to run objdump: {e}");
            Err(EXIT_FAILURE)
        }
    }
}
