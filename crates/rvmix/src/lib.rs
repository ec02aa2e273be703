//! rvmix - RISC-V instruction-mix profiler
//!
//! Builds a target with make, runs it under the Spike simulator to collect a
//! program-counter execution histogram, disassembles it with the RISC-V
//! objdump, and aggregates execution counts per opcode mnemonic.
//!
//! # Example
//!
//! ```ignore
//! use rvmix::{disasm, histogram};
//!
//! let addr_map = disasm::build_address_map(listing.lines());
//! let counts = histogram::aggregate(hist.lines(), &addr_map);
//! for (mnemonic, count) in histogram::rank(counts) {
//!     println!("{mnemonic}: {count}");
//! }
//! ```

pub mod build;
pub mod disasm;
pub mod histogram;
pub mod toolchain;

mod error;
pub use error::{Error, Result};
