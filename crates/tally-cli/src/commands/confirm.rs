use crate::Cli;
use anyhow::Result;
use tally_session::{Session, Transition};

pub fn run(cli: &Cli, row: usize, index: usize) -> Result<()> {
    if index == 0 {
        anyhow::bail!("Candidate numbers start at 1");
    }

    let mut session = Session::open(&cli.paths(), cli.match_config()?)?;
    if session.is_done() {
        anyhow::bail!(
            "Nothing left to confirm; finished at row {}",
            session.current_row()
        );
    }

    let (item, matched, count) = match session.decision() {
        Some(d) if d.row == row => (
            d.item_name.clone(),
            d.set.candidates.get(index - 1).map(|c| c.name.clone()),
            d.set.candidates.len(),
        ),
        _ => anyhow::bail!(
            "Row {row} is not awaiting a decision; row {} is",
            session.current_row()
        ),
    };
    if count == 0 {
        anyhow::bail!("Row {row} ({item}) has no candidates; skip it instead");
    }
    let Some(matched) = matched else {
        anyhow::bail!("Candidate {index} is out of range; row {row} lists {count}");
    };

    match session.confirm_selection(row, index - 1)? {
        Transition::Applied { next, .. } => {
            if !cli.is_quiet() {
                println!("Row {row}: {item} -> {matched}; next row {next}");
            }
            Ok(())
        }
        _ => anyhow::bail!("Row {row} was not updated"),
    }
}
