//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use k5k_core::PatchOrder;

#[derive(Parser)]
#[command(name = "k5k")]
#[command(version, about = "Kawai K5000 sound bank tool")]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true, default_value = "k5k.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the patches of a bank with memory usage
    List {
        /// Bank file (.kaa)
        #[arg(short, long)]
        file: PathBuf,

        /// Sort order: slot, tone, name, sources, size, code
        #[arg(short, long)]
        sort: Option<PatchOrder>,

        /// Accept non-ASCII bytes in patch names
        #[arg(long)]
        lossy_names: bool,
    },

    /// Dump decoded bank contents
    Dump {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
        format: DumpFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        lossy_names: bool,
    },

    /// Write every patch record to its own .ka1 file
    Extract {
        #[arg(short, long)]
        file: PathBuf,

        /// Destination directory (created if missing)
        #[arg(short, long)]
        dir: PathBuf,

        #[arg(long)]
        lossy_names: bool,
    },

    /// Hexdump the raw record of one patch
    Hexdump {
        #[arg(short, long)]
        file: PathBuf,

        /// Patch number as shown by `list` (1-based)
        #[arg(short, long)]
        patch: usize,

        /// Show ASCII column
        #[arg(long)]
        ascii: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
    Tsv,
}
