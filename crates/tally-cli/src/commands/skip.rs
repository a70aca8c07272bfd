use crate::Cli;
use anyhow::Result;
use tally_session::{Session, Transition};

pub fn run(cli: &Cli, row: usize) -> Result<()> {
    let mut session = Session::open(&cli.paths(), cli.match_config()?)?;

    match session.skip_row(row)? {
        Transition::Skipped { next, .. } => {
            if !cli.is_quiet() {
                println!("Row {row} skipped; next row {next}");
            }
            Ok(())
        }
        _ if session.is_done() => anyhow::bail!(
            "Nothing left to skip; finished at row {}",
            session.current_row()
        ),
        _ => anyhow::bail!(
            "Row {row} is not awaiting a decision; row {} is",
            session.current_row()
        ),
    }
}
