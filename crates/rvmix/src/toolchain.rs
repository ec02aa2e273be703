//! External tool discovery and subprocess control.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Find an executable in PATH.
#[must_use]
pub fn find_program(name: &str) -> Option<PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Find the Spike simulator in PATH.
#[must_use]
pub fn find_spike() -> Option<PathBuf> {
    find_program("spike")
}

/// Find a RISC-V objdump.
///
/// Tries the common RISC-V GCC toolchain prefixes in PATH and returns the
/// first objdump found.
#[must_use]
pub fn find_objdump() -> Option<PathBuf> {
    const PREFIXES: &[&str] = &[
        "riscv64-unknown-elf-",
        "riscv32-unknown-elf-",
        "riscv64-linux-gnu-",
        "riscv32-linux-gnu-",
    ];

    PREFIXES
        .iter()
        .find_map(|prefix| find_program(&format!("{prefix}objdump")))
}

/// Run a command, killing it if the deadline expires.
///
/// Returns `ErrorKind::TimedOut` when the command is killed.
pub fn run_command_with_timeout(
    cmd: &mut Command,
    timeout: Duration,
) -> std::io::Result<ExitStatus> {
    debug!(?cmd, ?timeout, "spawning");
    let mut child = cmd.spawn()?;
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "command timed out",
            ));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shell_in_path() {
        assert!(find_program("sh").is_some());
        assert!(find_program("no-such-binary-rvmix").is_none());
    }

    #[test]
    fn timeout_kills_hung_command() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let err = run_command_with_timeout(&mut cmd, Duration::from_millis(50)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn fast_command_completes() {
        let mut cmd = Command::new("true");
        let status = run_command_with_timeout(&mut cmd, Duration::from_secs(5)).unwrap();
        assert!(status.success());
    }
}
