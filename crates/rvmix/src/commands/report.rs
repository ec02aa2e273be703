//! Report command and ranked output formatting.

use std::path::Path;

use console::style;
use rvmix::{disasm, histogram};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, OutputFormat};

/// Handle the `report` command: aggregate an existing capture pair.
pub fn cmd_report(
    disasm_path: &Path,
    hist_path: &Path,
    top: usize,
    watch: &[String],
    format: OutputFormat,
) -> i32 {
    aggregate_and_report(disasm_path, hist_path, top, watch, format)
}

/// Parse both captures, rank the counts, and print the report.
pub fn aggregate_and_report(
    disasm_path: &Path,
    hist_path: &Path,
    top: usize,
    watch: &[String],
    format: OutputFormat,
) -> i32 {
    let addr_map = match disasm::parse_disasm_file(disasm_path) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", disasm_path.display());
            return EXIT_FAILURE;
        }
    };
    let counts = match histogram::aggregate_file(hist_path, &addr_map) {
        Ok(counts) => counts,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", hist_path.display());
            return EXIT_FAILURE;
        }
    };
    eprintln!("Address map: {} instructions", addr_map.len());

    let ranked = histogram::rank(counts);
    print_report(&ranked, top, watch, format);
    EXIT_SUCCESS
}

/// Print the ranked instruction-mix report.
pub fn print_report(ranked: &[(String, u64)], top: usize, watch: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text(ranked, top, watch),
        OutputFormat::Json => print_json(ranked, top, watch),
    }
}

fn print_text(ranked: &[(String, u64)], top: usize, watch: &[String]) {
    let total = total_count(ranked);

    if !watch.is_empty() {
        println!();
        for mnemonic in watch {
            println!(
                "{} {}",
                style(format!("{mnemonic}:")).cyan(),
                watched_count(ranked, mnemonic)
            );
        }
    }

    println!();
    println!(
        "{}",
        style(format!(
            "{:>4}  {:<10} {:>14}  {:>6}",
            "#", "mnemonic", "count", "share"
        ))
        .bold()
    );
    for (rank, (mnemonic, count)) in ranked.iter().take(top).enumerate() {
        let share = percentage(*count, total);
        println!("{:>4}  {mnemonic:<10} {count:>14}  {share:>5.1}%", rank + 1);
    }
    println!();
    println!(
        "{total} mapped executions across {} mnemonics",
        ranked.len()
    );
}

fn print_json(ranked: &[(String, u64)], top: usize, watch: &[String]) {
    let total = total_count(ranked);
    let watched: Vec<String> = watch
        .iter()
        .map(|mnemonic| format!(r#""{mnemonic}":{}"#, watched_count(ranked, mnemonic)))
        .collect();
    let entries: Vec<String> = ranked
        .iter()
        .take(top)
        .map(|(mnemonic, count)| format!(r#"{{"mnemonic":"{mnemonic}","count":{count}}}"#))
        .collect();

    println!(
        r#"{{"total":{total},"watch":{{{}}},"top":[{}]}}"#,
        watched.join(","),
        entries.join(",")
    );
}

fn total_count(ranked: &[(String, u64)]) -> u64 {
    ranked.iter().map(|(_, count)| count).sum()
}

fn watched_count(ranked: &[(String, u64)], mnemonic: &str) -> u64 {
    ranked
        .iter()
        .find(|(m, _)| m == mnemonic)
        .map_or(0, |(_, count)| *count)
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
