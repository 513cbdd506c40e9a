//! Runtime configuration: output format and logging.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// How results and the voter roster are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown format '{}' (expected table, json or csv)", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ballot=debug`
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "ballot=warn".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Build from command line values. An explicit level wins, then
    /// `RUST_LOG`, then the default (`debug` when verbose).
    pub fn resolve(level: Option<String>, verbose: bool, json: bool) -> Self {
        let level = level
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| {
                if verbose {
                    "ballot=debug".to_string()
                } else {
                    Self::default().level
                }
            });
        Self { level, json }
    }

    /// Install the global subscriber. Logs go to stderr so they never mix
    /// with the menu on stdout.
    pub fn init(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(&self.level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", self.level, e))?;

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        tracing::debug!(level = %self.level, json = self.json, "logging initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_roundtrip() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv] {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_explicit_level_wins() {
        let config = LoggingConfig::resolve(Some("trace".into()), true, false);
        assert_eq!(config.level, "trace");
        assert!(!config.json);
    }
}
