use anyhow::Result;
use ballot::cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging().init()?;
    cli.run()
}
