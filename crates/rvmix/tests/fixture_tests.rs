//! Fixture-driven aggregation tests.
//!
//! Each directory under `tests/fixtures/` holds a recorded objdump listing
//! (`disasm.txt`), a Spike PC histogram (`hist.txt`), and the expected
//! ranking (`expected.txt`, one `<mnemonic> <count>` pair per line).

use std::path::{Path, PathBuf};

use libtest_mimic::{Arguments, Failed, Trial};

fn main() {
    let args = Arguments::from_args();
    let trials = collect_trials();
    libtest_mimic::run(&args, trials).exit();
}

fn collect_trials() -> Vec<Trial> {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let entries = std::fs::read_dir(&fixtures).expect("missing tests/fixtures");

    let mut trials = Vec::new();
    for entry in entries {
        let dir = entry.expect("unreadable fixture entry").path();
        if !dir.is_dir() {
            continue;
        }
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .expect("fixture dir name")
            .to_string();
        trials.push(Trial::test(name, move || run_fixture(&dir)));
    }
    trials
}

fn run_fixture(dir: &Path) -> Result<(), Failed> {
    let disasm = read(dir, "disasm.txt")?;
    let hist = read(dir, "hist.txt")?;
    let expected = read(dir, "expected.txt")?;

    let addr_map = rvmix::disasm::build_address_map(disasm.lines());
    let ranked = rvmix::histogram::rank(rvmix::histogram::aggregate(hist.lines(), &addr_map));

    let actual: Vec<String> = ranked
        .iter()
        .map(|(mnemonic, count)| format!("{mnemonic} {count}"))
        .collect();
    let expected: Vec<String> = expected
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    if actual == expected {
        Ok(())
    } else {
        Err(Failed::from(format!(
            "ranking mismatch\nexpected: {expected:#?}\nactual:   {actual:#?}"
        )))
    }
}

fn read(dir: &Path, name: &str) -> Result<String, Failed> {
    std::fs::read_to_string(dir.join(name))
        .map_err(|e| Failed::from(format!("failed to read {}: {e}", dir.join(name).display())))
}
