//! CLI entry point for the N-queens solution counter

use bitqueens::io::cli::{Cli, SearchRunner};
use bitqueens::io::logging::init_tracing;
use clap::Parser;

fn main() -> bitqueens::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    let mut runner = SearchRunner::new(cli);
    runner.run().map(drop)
}
