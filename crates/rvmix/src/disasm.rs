//! Disassembly listing parser.
//!
//! Builds the program counter to mnemonic map from `objdump -d` output.
//! Only instruction lines carry an entry; section headers, symbol lines,
//! and data directives fail the lexical pattern and are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Parse one disassembly line into an (address, mnemonic) pair.
///
/// Matches the objdump instruction layout: an indented hex address followed
/// by a colon, the encoded-bytes field, then the mnemonic. The mnemonic is
/// the first word token, so dotted forms truncate at the dot: `fadd.d`
/// records as `fadd` and `vadd.vv` as `vadd`. All variants of an
/// instruction therefore aggregate under one stem entry.
pub fn parse_line(line: &str) -> Option<(u64, &str)> {
    let pattern = INSN_PATTERN
        .get_or_init(|| Regex::new(r"^\s+([0-9a-fA-F]+):\s+([0-9a-fA-F]+)\s+(\w+)").unwrap());
    let caps = pattern.captures(line)?;

    let addr = u64::from_str_radix(caps.get(1)?.as_str(), 16).ok()?;
    let mnemonic = caps.get(3)?.as_str();
    Some((addr, mnemonic))
}

/// Build the address to mnemonic map from a disassembly listing.
///
/// Lines that do not match the instruction pattern contribute no entry.
/// A duplicate address keeps the last line seen.
pub fn build_address_map<'a, I>(lines: I) -> FxHashMap<u64, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = FxHashMap::default();
    for line in lines {
        if let Some((addr, mnemonic)) = parse_line(line) {
            map.insert(addr, mnemonic.to_string());
        }
    }
    map
}

/// Read a disassembly listing from disk and build the address map.
pub fn parse_disasm_file(path: &Path) -> crate::Result<FxHashMap<u64, String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut map = FxHashMap::default();
    for line in reader.lines() {
        let line = line?;
        if let Some((addr, mnemonic)) = parse_line(&line) {
            map.insert(addr, mnemonic.to_string());
        }
    }

    debug!(entries = map.len(), "parsed disassembly listing");
    Ok(map)
}

static INSN_PATTERN: OnceLock<Regex> = OnceLock::new();
