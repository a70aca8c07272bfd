use crate::Cli;
use anyhow::Result;
use tally_session::Session;

pub fn run(cli: &Cli) -> Result<()> {
    let paths = cli.paths();
    let session = Session::inspect(&paths, cli.match_config()?)?;
    let status = session.status();

    println!("Benchmark: {}", paths.benchmark.display());
    println!("Reference: {}", paths.reference.display());
    println!("Progress: {}", paths.progress.display());
    println!();
    println!("Resumed from row: {}", status.resumed_from);
    if status.done {
        println!("Current row: {} (finished)", status.current_row);
    } else {
        println!("Current row: {}", status.current_row);
    }
    println!(
        "Priced rows: {} of {}",
        status.priced_rows, status.benchmark_rows
    );
    println!("Reference items: {}", status.reference_items);
    if status.duplicate_names > 0 {
        println!("Duplicate reference names: {}", status.duplicate_names);
    }

    Ok(())
}
