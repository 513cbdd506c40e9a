// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use ballot::application::VotingLedger;
use ballot::cli::{Menu, MenuOptions};

/// Ledger with the given candidates registered, in order.
pub fn ledger_with(candidates: &[&str]) -> Result<VotingLedger> {
    let mut ledger = VotingLedger::new();
    for name in candidates {
        ledger.register_candidate(name)?;
    }
    Ok(ledger)
}

/// Cast votes given as (voter id, voter name, candidate).
pub fn cast_all(ledger: &mut VotingLedger, ballots: &[(&str, &str, &str)]) -> Result<()> {
    for (id, name, candidate) in ballots {
        ledger.cast_vote(id, name, candidate)?;
    }
    Ok(())
}

/// Drive the menu with scripted input lines. Returns the ledger and
/// everything written to the terminal.
pub fn run_script(lines: &[&str], options: MenuOptions) -> Result<(VotingLedger, String)> {
    let mut input = lines.join("\n");
    input.push('\n');

    let mut menu = Menu::new(Cursor::new(input.into_bytes()), Vec::new(), options);
    menu.run()?;

    let (ledger, output) = menu.into_parts();
    Ok((ledger, String::from_utf8(output)?))
}
