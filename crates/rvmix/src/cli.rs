//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rvmix")]
#[command(about = "RISC-V instruction-mix profiler - ranks opcode execution counts")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a target and profile its instruction mix under Spike
    Profile {
        /// Make target (also the executable name)
        #[arg(value_name = "TARGET")]
        target: String,

        /// Project directory containing the Makefile
        #[arg(short = 'C', long, default_value = ".")]
        project: PathBuf,

        /// ISA string passed to Spike
        #[arg(long, default_value = "rv64gcv")]
        isa: String,

        /// Run the binary bare-metal instead of under the proxy kernel
        #[arg(long)]
        no_pk: bool,

        /// Skip the build step
        #[arg(long)]
        no_build: bool,

        /// Number of parallel make jobs (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        /// Spike executable (searched in PATH if not given)
        #[arg(long)]
        spike: Option<PathBuf>,

        /// RISC-V objdump executable (toolchain prefixes tried if not given)
        #[arg(long)]
        objdump: Option<PathBuf>,

        /// Directory for intermediate logs (temp dir if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Simulator timeout in seconds
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Number of top mnemonics to print
        #[arg(long, default_value = "30")]
        top: usize,

        /// Print the total for a specific mnemonic (repeatable)
        #[arg(long, value_name = "MNEMONIC")]
        watch: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Aggregate an existing disassembly/histogram pair
    Report {
        /// Disassembly listing (objdump -d output)
        #[arg(long, value_name = "FILE")]
        disasm: PathBuf,

        /// PC histogram (spike -g stderr output)
        #[arg(long, value_name = "FILE")]
        hist: PathBuf,

        /// Number of top mnemonics to print
        #[arg(long, default_value = "30")]
        top: usize,

        /// Print the total for a specific mnemonic (repeatable)
        #[arg(long, value_name = "MNEMONIC")]
        watch: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for the ranked report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// Single JSON object
    Json,
}
