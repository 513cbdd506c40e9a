use anyhow::Result;
use std::io::Write;

use crate::application::{TallyReport, VoterEntry};
use crate::config::OutputFormat;

/// Writes results and the voter roster in machine-readable formats.
pub struct Exporter {
    format: OutputFormat,
}

impl Exporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Export a tally report. Returns the number of standings written.
    pub fn export_tally<W: Write>(&self, report: &TallyReport, writer: W) -> Result<usize> {
        match self.format {
            OutputFormat::Csv => export_tally_csv(report, writer),
            OutputFormat::Json | OutputFormat::Table => {
                write_json(report, writer)?;
                Ok(report.standings.len())
            }
        }
    }

    /// Export the voter roster. Returns the number of voters written.
    pub fn export_roster<W: Write>(&self, roster: &[VoterEntry], writer: W) -> Result<usize> {
        match self.format {
            OutputFormat::Csv => export_roster_csv(roster, writer),
            OutputFormat::Json | OutputFormat::Table => {
                write_json(&roster, writer)?;
                Ok(roster.len())
            }
        }
    }
}

/// Results as CSV: one row per candidate in ranking order.
pub fn export_tally_csv<W: Write>(report: &TallyReport, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["candidate", "votes", "percentage"])?;

    let mut count = 0;
    for standing in &report.standings {
        csv_writer.write_record(&[
            standing.name.clone(),
            standing.votes.to_string(),
            format!("{:.2}", standing.percentage),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Voter roster as CSV, in roster order.
pub fn export_roster_csv<W: Write>(roster: &[VoterEntry], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["voter_id", "name", "voted_at"])?;

    for entry in roster {
        csv_writer.write_record(&[
            entry.voter_id.clone(),
            entry.name.clone(),
            entry.voted_at.to_rfc3339(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(roster.len())
}

fn write_json<T: serde::Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::VotingLedger;

    fn closed_ledger_report() -> TallyReport {
        let mut ledger = VotingLedger::new();
        ledger.register_candidate("Alice").unwrap();
        ledger.register_candidate("Bob").unwrap();
        ledger.cast_vote("V100", "A", "Alice").unwrap();
        ledger.cast_vote("V101", "B", "Alice").unwrap();
        ledger.cast_vote("V102", "C", "Bob").unwrap();
        ledger.tally().unwrap()
    }

    #[test]
    fn test_tally_csv() {
        let report = closed_ledger_report();
        let mut buf = Vec::new();
        let rows = export_tally_csv(&report, &mut buf).unwrap();

        assert_eq!(rows, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "candidate,votes,percentage\nAlice,2,66.67\nBob,1,33.33\n"
        );
    }

    #[test]
    fn test_tally_json_has_outcome() {
        let report = closed_ledger_report();
        let mut buf = Vec::new();
        Exporter::new(OutputFormat::Json)
            .export_tally(&report, &mut buf)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["total_votes"], 3);
        assert_eq!(value["outcome"]["kind"], "winner");
        assert_eq!(value["outcome"]["candidates"], "Alice");
        assert_eq!(value["standings"][0]["name"], "Alice");
    }

    #[test]
    fn test_roster_csv_quotes_commas() {
        let mut ledger = VotingLedger::new();
        ledger.register_candidate("Alice").unwrap();
        ledger.cast_vote("V200", "Smith, Jane", "Alice").unwrap();

        let mut buf = Vec::new();
        let rows = export_roster_csv(&ledger.voter_roster(), &mut buf).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("voter_id,name,voted_at\n"));
        assert!(text.contains("V200,\"Smith, Jane\","));
    }
}
