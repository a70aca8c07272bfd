use crate::{Cli, Format};
use anyhow::Result;
use tally_render::{JsonlWriter, render_candidates};
use tally_session::{NoMatchPolicy, Session};

pub fn run(cli: &Cli, row: Option<usize>, format: Format) -> Result<()> {
    // Inspection must not persist auto-skips.
    let mut config = cli.match_config()?;
    config.no_match_policy = NoMatchPolicy::Surface;
    let session = Session::open(&cli.paths(), config)?;

    let row = row.unwrap_or_else(|| session.current_row());
    let Some(set) = session.candidates(row) else {
        anyhow::bail!(
            "Row {row} has no item name in {}",
            session.table().path().display()
        );
    };

    let awaiting = session.decision().filter(|d| d.row == row);
    let suggested = awaiting
        .and_then(|d| d.suggestion.as_ref())
        .and_then(|s| s.index);

    match format {
        Format::Human => {
            println!("Row {row}: {}", set.query);
            let selected = awaiting.map(|d| d.selected).filter(|_| !set.is_empty());
            print!("{}", render_candidates(&set.candidates, selected, suggested));
            if !cli.is_quiet() {
                eprintln!(
                    "{} of {} reference items passed the prefilter",
                    set.prefiltered,
                    session.index().len()
                );
            }
        }
        Format::Jsonl => {
            let config = session.config();
            let out = JsonlWriter::new(row, &set.query)
                .limit(config.limit)
                .min_score(config.min_score)
                .suggested(suggested)
                .render(&set.candidates, set.prefiltered, session.index().len())?;
            print!("{out}");
        }
    }

    Ok(())
}
