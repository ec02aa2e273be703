//! PC histogram aggregation.
//!
//! Spike's `-g` flag dumps a program-counter execution histogram on stderr
//! at exit, one `<address> <count>` pair per line. Aggregation folds those
//! counts onto mnemonics through the disassembly address map.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

/// Parse one histogram line into an (address, count) pair.
///
/// The first whitespace-separated field is a hex program counter (a `0x`
/// prefix is accepted), the second a decimal execution count. Anything
/// after the second field is ignored. Banner and summary lines fail the
/// parse and yield `None`.
pub fn parse_line(line: &str) -> Option<(u64, u64)> {
    let mut fields = line.split_whitespace();

    let addr = fields.next()?;
    let addr = addr.strip_prefix("0x").unwrap_or(addr);
    let addr = u64::from_str_radix(addr, 16).ok()?;

    let count = fields.next()?.parse::<u64>().ok()?;
    Some((addr, count))
}

/// Sum execution counts per mnemonic.
///
/// Each histogram line whose address appears in `addr_map` adds its count
/// to that mnemonic's total. Addresses absent from the map and malformed
/// lines contribute nothing. Line order does not matter; a program counter
/// split across several lines accumulates.
pub fn aggregate<'a, I>(lines: I, addr_map: &FxHashMap<u64, String>) -> FxHashMap<String, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = FxHashMap::default();
    for line in lines {
        accumulate(line, addr_map, &mut counts);
    }
    counts
}

/// Read a histogram from disk and aggregate it against the address map.
pub fn aggregate_file(
    path: &Path,
    addr_map: &FxHashMap<u64, String>,
) -> crate::Result<FxHashMap<String, u64>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut counts = FxHashMap::default();
    for line in reader.lines() {
        let line = line?;
        accumulate(&line, addr_map, &mut counts);
    }

    debug!(mnemonics = counts.len(), "aggregated histogram");
    Ok(counts)
}

fn accumulate(line: &str, addr_map: &FxHashMap<u64, String>, counts: &mut FxHashMap<String, u64>) {
    if let Some((addr, count)) = parse_line(line)
        && let Some(mnemonic) = addr_map.get(&addr)
    {
        *counts.entry(mnemonic.clone()).or_insert(0) += count;
    }
}

/// Rank mnemonics by total count, descending.
///
/// Ties order alphabetically so the output is deterministic.
#[must_use]
pub fn rank(counts: FxHashMap<String, u64>) -> Vec<(String, u64)> {
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr_map(entries: &[(u64, &str)]) -> FxHashMap<u64, String> {
        entries
            .iter()
            .map(|(addr, mnemonic)| (*addr, (*mnemonic).to_string()))
            .collect()
    }

    #[test]
    fn parses_plain_line() {
        assert_eq!(parse_line("100 3 x"), Some((0x100, 3)));
    }

    #[test]
    fn parses_0x_prefixed_address() {
        assert_eq!(parse_line("0x80000000 12"), Some((0x8000_0000, 12)));
    }

    #[test]
    fn skips_banner_lines() {
        assert_eq!(parse_line("PC Histogram Size: 2048"), None);
        assert_eq!(parse_line("bbl loader"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn requires_decimal_count() {
        assert_eq!(parse_line("100"), None);
        assert_eq!(parse_line("100 xyz"), None);
        assert_eq!(parse_line("100 -3"), None);
    }

    #[test]
    fn aggregates_counts_per_mnemonic() {
        let map = addr_map(&[(0x100, "addi"), (0x104, "add")]);
        let counts = aggregate(["100 3 x", "104 7 x"], &map);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("addi"), Some(&3));
        assert_eq!(counts.get("add"), Some(&7));
    }

    #[test]
    fn ignores_unmapped_addresses() {
        let map = addr_map(&[(0x100, "addi")]);
        let counts = aggregate(["200 5 x"], &map);
        assert!(counts.is_empty());
    }

    #[test]
    fn sums_duplicate_addresses() {
        let map = addr_map(&[(0x100, "addi")]);
        let counts = aggregate(["100 3", "100 4"], &map);
        assert_eq!(counts.get("addi"), Some(&7));
    }

    #[test]
    fn aggregation_is_order_independent() {
        let map = addr_map(&[(0x100, "addi"), (0x104, "add"), (0x108, "addi")]);
        let forward = aggregate(["100 3", "104 7", "108 2"], &map);
        let reversed = aggregate(["108 2", "104 7", "100 3"], &map);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let map = addr_map(&[(0x100, "addi")]);
        assert!(aggregate(std::iter::empty::<&str>(), &map).is_empty());
    }

    #[test]
    fn rank_sorts_by_count_descending() {
        let counts: FxHashMap<String, u64> = [("a", 5), ("b", 2), ("c", 2), ("d", 9)]
            .into_iter()
            .map(|(m, c)| (m.to_string(), c))
            .collect();

        let ranked = rank(counts);
        assert_eq!(ranked[0], ("d".to_string(), 9));
        assert_eq!(ranked[1], ("a".to_string(), 5));
        // 2-count tie orders alphabetically
        assert_eq!(ranked[2], ("b".to_string(), 2));
        assert_eq!(ranked[3], ("c".to_string(), 2));
    }
}
