use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::{TallyReport, VoterEntry, VotingLedger};
use crate::config::OutputFormat;
use crate::domain::Outcome;
use crate::io::Exporter;

/// Rejected menu or picklist input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input! Please enter a number.")]
    NonNumericInput(String),

    #[error("Invalid choice! Please enter 1-8.")]
    OutOfRangeChoice(i64),
}

/// The eight menu actions, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RegisterCandidate = 1,
    UnregisterCandidate = 2,
    DisplayCandidates = 3,
    CastVote = 4,
    DisplayResults = 5,
    ShowVoterDetails = 6,
    Reset = 7,
    Exit = 8,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::RegisterCandidate,
        MenuChoice::UnregisterCandidate,
        MenuChoice::DisplayCandidates,
        MenuChoice::CastVote,
        MenuChoice::DisplayResults,
        MenuChoice::ShowVoterDetails,
        MenuChoice::Reset,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::RegisterCandidate => "Register Candidate",
            MenuChoice::UnregisterCandidate => "Unregister Candidate",
            MenuChoice::DisplayCandidates => "Display Candidates",
            MenuChoice::CastVote => "Cast Vote",
            MenuChoice::DisplayResults => "Display Results",
            MenuChoice::ShowVoterDetails => "Show Voter Details",
            MenuChoice::Reset => "Reset Voting System",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| *c as i64 == n)
    }
}

/// Parse an integer typed by the user. Surrounding whitespace is ignored.
pub fn parse_number(line: &str) -> Result<i64, InputError> {
    line.trim()
        .parse()
        .map_err(|_| InputError::NonNumericInput(line.to_string()))
}

/// Parse a menu selection, which must be an integer in 1..=8.
pub fn parse_choice(line: &str) -> Result<MenuChoice, InputError> {
    let n = parse_number(line)?;
    MenuChoice::from_number(n).ok_or(InputError::OutOfRangeChoice(n))
}

/// Harness settings that do not belong to the ledger.
#[derive(Debug, Clone, Default)]
pub struct MenuOptions {
    pub format: OutputFormat,
    pub export: Option<PathBuf>,
}

/// Interactive front end of the ledger.
///
/// Owns all I/O. Generic over reader and writer so it can be driven by a
/// terminal or by an in-memory script.
pub struct Menu<R, W> {
    reader: R,
    writer: W,
    ledger: VotingLedger,
    options: MenuOptions,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(reader: R, writer: W, options: MenuOptions) -> Self {
        Self {
            reader,
            writer,
            ledger: VotingLedger::new(),
            options,
        }
    }

    pub fn ledger(&self) -> &VotingLedger {
        &self.ledger
    }

    pub fn into_parts(self) -> (VotingLedger, W) {
        (self.ledger, self.writer)
    }

    /// Loop until Exit is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_choice()? else {
                debug!("end of input, leaving menu");
                return Ok(());
            };

            match choice {
                MenuChoice::RegisterCandidate => self.register_candidate()?,
                MenuChoice::UnregisterCandidate => self.unregister_candidate()?,
                MenuChoice::DisplayCandidates => self.display_candidates()?,
                MenuChoice::CastVote => self.cast_vote()?,
                MenuChoice::DisplayResults => self.display_results()?,
                MenuChoice::ShowVoterDetails => self.display_voter_details()?,
                MenuChoice::Reset => {
                    self.ledger.reset();
                    writeln!(self.writer, "Voting system has been reset. All data cleared.")?;
                }
                MenuChoice::Exit => {
                    writeln!(self.writer, "Exiting...")?;
                    return Ok(());
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "===== Voting System Menu =====")?;
        for choice in MenuChoice::ALL {
            writeln!(self.writer, "{}. {}", choice as u8, choice.label())?;
        }
        Ok(())
    }

    /// Read one line after printing `prompt`. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prompt until an integer is entered. `None` at end of input.
    fn read_number(&mut self, prompt: &str) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_number(&line) {
                Ok(n) => return Ok(Some(n)),
                Err(err) => {
                    debug!(input = %line, "non-numeric input");
                    writeln!(self.writer, "{}", err)?;
                }
            }
        }
    }

    /// Prompt for a menu choice; out-of-range numbers show the menu again.
    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(n) = self.read_number("Enter your choice: ")? else {
                return Ok(None);
            };
            match MenuChoice::from_number(n) {
                Some(choice) => return Ok(Some(choice)),
                None => {
                    writeln!(self.writer, "{}", InputError::OutOfRangeChoice(n))?;
                    self.print_menu()?;
                }
            }
        }
    }

    fn register_candidate(&mut self) -> Result<()> {
        let Some(name) = self.read_line("Enter candidate name: ")? else {
            return Ok(());
        };
        match self.ledger.register_candidate(&name) {
            Ok(name) => writeln!(self.writer, "Candidate '{}' registered successfully!", name)?,
            Err(err) => writeln!(self.writer, "{}", err)?,
        }
        Ok(())
    }

    fn unregister_candidate(&mut self) -> Result<()> {
        let Some(name) = self.read_line("Enter candidate name to unregister: ")? else {
            return Ok(());
        };
        match self.ledger.unregister_candidate(&name) {
            Ok(removed) => writeln!(
                self.writer,
                "Candidate '{}' unregistered successfully!",
                removed.name
            )?,
            Err(err) => writeln!(self.writer, "{}", err)?,
        }
        Ok(())
    }

    fn display_candidates(&mut self) -> Result<()> {
        let names = self.ledger.list_candidates();
        if names.is_empty() {
            writeln!(self.writer, "No candidates registered!")?;
            return Ok(());
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Registered Candidates:")?;
        self.write_numbered(&names)
    }

    fn write_numbered(&mut self, names: &[String]) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            writeln!(self.writer, "{}. {}", i + 1, name)?;
        }
        Ok(())
    }

    fn cast_vote(&mut self) -> Result<()> {
        let Some(voter_id) = self.read_line("Enter voter ID (VXXX format): ")? else {
            return Ok(());
        };
        let Some(voter_name) = self.read_line("Enter voter name: ")? else {
            return Ok(());
        };

        // Numbering is taken from the ledger right now, never from an
        // earlier listing.
        let names = self.ledger.list_candidates();
        if names.is_empty() {
            writeln!(self.writer, "No candidates available!")?;
            return Ok(());
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Available Candidates:")?;
        self.write_numbered(&names)?;

        let Some(number) = self.read_number("Enter candidate number: ")? else {
            return Ok(());
        };
        let Some(candidate) = usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| names.get(i))
        else {
            debug!(number, "candidate number out of range");
            writeln!(self.writer, "Invalid candidate number!")?;
            return Ok(());
        };

        match self.ledger.cast_vote(&voter_id, &voter_name, candidate) {
            Ok(receipt) => writeln!(
                self.writer,
                "Vote cast successfully for {}!",
                receipt.candidate
            )?,
            Err(err) => writeln!(self.writer, "{}", err)?,
        }
        Ok(())
    }

    fn display_results(&mut self) -> Result<()> {
        let Some(report) = self.ledger.tally() else {
            writeln!(self.writer, "No candidates registered!")?;
            return Ok(());
        };

        match self.options.format {
            OutputFormat::Table => self.write_results_table(&report)?,
            format => {
                Exporter::new(format).export_tally(&report, &mut self.writer)?;
            }
        }

        if let Some(path) = &self.options.export {
            let file = File::create(path)
                .with_context(|| format!("Failed to create export file: {}", path.display()))?;
            Exporter::new(OutputFormat::Json).export_tally(&report, file)?;
            info!(path = %path.display(), "results exported");
        }
        Ok(())
    }

    fn write_results_table(&mut self, report: &TallyReport) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "Voting Results:")?;
        for standing in &report.standings {
            writeln!(
                self.writer,
                "{}: {} votes ({:.2}%)",
                standing.name, standing.votes, standing.percentage
            )?;
        }

        match &report.outcome {
            Outcome::NoVotes => {}
            Outcome::Winner(name) => writeln!(self.writer, "Winner: {}", name)?,
            Outcome::Tie(names) => writeln!(self.writer, "Tie between: {}", names.join(", "))?,
        }
        Ok(())
    }

    fn display_voter_details(&mut self) -> Result<()> {
        let roster = self.ledger.voter_roster();
        if roster.is_empty() {
            writeln!(self.writer, "No votes cast yet!")?;
            return Ok(());
        }

        match self.options.format {
            OutputFormat::Table => self.write_roster_table(&roster),
            format => {
                Exporter::new(format).export_roster(&roster, &mut self.writer)?;
                Ok(())
            }
        }
    }

    fn write_roster_table(&mut self, roster: &[VoterEntry]) -> Result<()> {
        let rule = "-".repeat(33);
        writeln!(self.writer)?;
        writeln!(self.writer, "Voter Details ({} voters):", roster.len())?;
        writeln!(self.writer, "{}", rule)?;
        writeln!(self.writer, "{:<10} | {:<20}", "Voter ID", "Name")?;
        writeln!(self.writer, "{}", rule)?;
        for entry in roster {
            writeln!(self.writer, "{:<10} | {:<20}", entry.voter_id, entry.name)?;
        }
        writeln!(self.writer, "{}", rule)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_in_range() {
        assert_eq!(parse_choice("1").unwrap(), MenuChoice::RegisterCandidate);
        assert_eq!(parse_choice(" 8 ").unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn test_parse_choice_rejects_non_numeric() {
        assert!(matches!(
            parse_choice("abc"),
            Err(InputError::NonNumericInput(_))
        ));
        assert!(matches!(parse_choice(""), Err(InputError::NonNumericInput(_))));
        assert!(matches!(parse_choice("4.5"), Err(InputError::NonNumericInput(_))));
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range() {
        assert_eq!(parse_choice("0"), Err(InputError::OutOfRangeChoice(0)));
        assert_eq!(parse_choice("9"), Err(InputError::OutOfRangeChoice(9)));
        assert_eq!(parse_choice("-3"), Err(InputError::OutOfRangeChoice(-3)));
    }

    #[test]
    fn test_menu_numbers_match_labels() {
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(*choice as usize, i + 1);
            assert_eq!(MenuChoice::from_number(i as i64 + 1), Some(*choice));
        }
    }
}
