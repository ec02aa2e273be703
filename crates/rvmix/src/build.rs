//! Build collaborator: drives make for the profiled target.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::{Error, Result};

/// Run `make -j<N> <target>` in the project directory.
///
/// `jobs == 0` selects host CPUs minus two, minimum one. A failing make
/// aborts the whole run; there is nothing to profile without the binary.
pub fn run_make(project_dir: &Path, target: &str, jobs: usize) -> Result<()> {
    let jobs = if jobs == 0 {
        num_cpus::get().saturating_sub(2).max(1)
    } else {
        jobs
    };
    info!(make_target = target, jobs, "running make");

    let status = Command::new("make")
        .arg("-C")
        .arg(project_dir)
        .arg("-j")
        .arg(jobs.to_string())
        .arg(target)
        .status()
        .map_err(|e| Error::BuildFailed(format!("failed to run make: {e}")))?;

    if !status.success() {
        return Err(Error::BuildFailed(format!(
            "make exited with code {:?}",
            status.code()
        )));
    }
    Ok(())
}
