//! Command-line surface (C9, §4.9), grounded on the derive-based
//! `clap` idiom used throughout this lineage.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "blossom-match", about = "Maximum-cardinality matching of a DIMACS graph")]
pub struct Cli {
    /// Path to a DIMACS-style graph file.
    pub input: PathBuf,

    /// Raise logging verbosity from warn to debug.
    #[arg(short, long)]
    pub verbose: bool,
}
