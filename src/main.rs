use anyhow::Context;
use clap::Parser;
use release_points::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("release point extraction failed")
}
