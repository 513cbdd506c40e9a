use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{LoggingConfig, OutputFormat};

mod menu;

pub use menu::*;

/// Ballot - in-memory voting ledger
#[derive(Parser, Debug)]
#[command(name = "ballot")]
#[command(about = "Register candidates, collect one vote per voter and tally the results")]
#[command(version)]
pub struct Cli {
    /// Output format for results and voter details: table, json, csv
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Also write the results as JSON to this file whenever they are displayed
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log filter directive (e.g. "info", "ballot=debug")
    #[arg(long, env = "BALLOT_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::resolve(self.log_level.clone(), self.verbose, self.log_json)
    }

    pub fn options(&self) -> MenuOptions {
        MenuOptions {
            format: self.format,
            export: self.export.clone(),
        }
    }

    /// Run the interactive menu on stdin/stdout until Exit or end of input.
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut menu = Menu::new(stdin.lock(), stdout.lock(), self.options());
        menu.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ballot"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.export.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_format_and_export_flags() {
        let cli =
            Cli::try_parse_from(["ballot", "--format", "csv", "--export", "out.json", "-v"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.export, Some(PathBuf::from("out.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["ballot", "--format", "xml"]).is_err());
    }
}
