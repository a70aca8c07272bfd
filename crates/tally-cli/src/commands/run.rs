use crate::Cli;
use anyhow::Result;
use std::io::{BufRead, Write};
use tally_render::render_candidates;
use tally_session::{Session, Transition};

/// What happened during an interactive run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub applied: usize,
    pub skipped: usize,
    pub finished: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    let mut session = Session::open(&cli.paths(), cli.match_config()?)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let tally = interact(&mut session, stdin.lock(), stdout.lock())?;
    tracing::info!(
        applied = tally.applied,
        skipped = tally.skipped,
        row = session.current_row(),
        "run finished"
    );

    if !cli.is_quiet() {
        eprintln!(
            "{} applied, {} skipped{}",
            tally.applied,
            tally.skipped,
            if tally.finished { "; all rows handled" } else { "" }
        );
    }
    Ok(())
}

/// Drive the session from line-oriented input until done, quit, or EOF.
///
/// Empty line confirms the selection, a number picks and confirms that
/// candidate, `s` skips, `q` quits. Progress is saved after every decision.
pub fn interact(session: &mut Session, input: impl BufRead, mut out: impl Write) -> Result<Tally> {
    let mut tally = Tally::default();
    let mut lines = input.lines();

    loop {
        session.load()?;
        let Some(decision) = session.decision() else {
            writeln!(out, "Finished all rows up to {}", session.current_row())?;
            tally.finished = true;
            break;
        };

        let count = decision.set.candidates.len();
        writeln!(out)?;
        writeln!(out, "Row {}: {}", decision.row, decision.item_name)?;
        let selected = (count > 0).then_some(decision.selected);
        let suggested = decision.suggestion.as_ref().and_then(|s| s.index);
        write!(out, "{}", render_candidates(&decision.set.candidates, selected, suggested))?;
        if let Some(suggestion) = decision.suggestion.as_ref().filter(|s| s.index.is_none()) {
            writeln!(out, "Suggestion (not listed): {}", suggestion.text)?;
        }
        if count > 0 {
            write!(out, "[enter] confirm, [1-{count}] pick, [s]kip, [q]uit > ")?;
        } else {
            write!(out, "[s]kip, [q]uit > ")?;
        }
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let transition = match line.trim() {
            "" => session.confirm()?,
            "s" | "S" => session.skip()?,
            "q" | "Q" => break,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 && session.choose(n - 1) => session.confirm()?,
                _ => {
                    writeln!(out, "Unrecognized choice: {other}")?;
                    continue;
                }
            },
        };

        match transition {
            Transition::Applied { .. } => tally.applied += 1,
            Transition::Skipped { .. } => tally.skipped += 1,
            Transition::Ignored => writeln!(out, "Nothing to confirm; press s to skip")?,
        }
    }

    Ok(tally)
}
