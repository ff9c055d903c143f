use clap::{Args, Parser, Subcommand};
use eddpack_core::naming::TEMPLATE_NAME;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "eddpack: bundle EDD Chemistry/Sample exports with their header", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct DirArgs {
    /// Directory holding the *Chemistry2e.csv / *Sample2e.csv exports
    #[arg(env = "EDDPACK_DIR")]
    pub dir: PathBuf,

    /// Header template file name inside DIR
    #[arg(long, env = "EDDPACK_TEMPLATE", default_value = TEMPLATE_NAME)]
    pub template: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the header next to every pair and zip the three files together
    Bundle {
        #[command(flatten)]
        dir: DirArgs,

        /// zero entry timestamps for reproducible archives
        #[arg(long)]
        deterministic: bool,

        /// deflate level (0-9)
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=9))]
        level: Option<i64>,

        /// report what would be written without touching the directory
        #[arg(long)]
        dry_run: bool,
    },

    /// Show pairs and unmatched Chemistry files without writing anything
    Scan {
        #[command(flatten)]
        dir: DirArgs,
    },

    /// List the entries of an archive
    List { archive: PathBuf },

    /// Check every pair's archive against the files on disk
    Verify {
        #[command(flatten)]
        dir: DirArgs,
    },
}
