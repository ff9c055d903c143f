pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use eddpack_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Bundle {
            dir,
            deterministic,
            level,
            dry_run,
        } => handlers::handle_bundle(dir.dir, dir.template, deterministic, level, dry_run),
        Commands::Scan { dir } => handlers::handle_scan(dir.dir, dir.template),
        Commands::List { archive } => handlers::handle_list(archive),
        Commands::Verify { dir } => handlers::handle_verify(dir.dir, dir.template),
    }
}
