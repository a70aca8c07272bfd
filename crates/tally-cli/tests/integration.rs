//! Integration test: reconcile a small benchmark table against a CSV catalog,
//! stop, resume, and render candidates as JSONL.

use std::fs;
use tally_core::{CursorState, PriceColumn};
use tally_index::ReferenceIndex;
use tally_render::{JsonlWriter, render_candidates};
use tally_session::{MatchConfig, Phase, Session, SessionPaths, Transition};
use tally_table::BenchmarkTable;

const REFERENCE: &str = "\
Product,Carrefour,Fresho,FreshRich,Grandios,WestZone,Rayyan,WMart
Fresh Milk 1L Carrefour Brand,5.0,,,4.5,,4.8,
Long Life Milk 1L,4.0,3.9,,,3.7,,3.5
Brown Eggs 30pcs,14,,13.5,,,,12.75
";

const BENCHMARK: &str = "\
Code,Item,Carrefour,WestZone/WMart,Grandios,Fresho,FreshRich,Rayyan
B1,Fresh Milk 1L,,,,,,
B2,Eggs 30pcs,,,,,,
B3,Basmati Rice 5kg,,,,,,
B4,Long Life Milk 1L,,,,,,
";

fn create_workspace() -> (tempfile::TempDir, SessionPaths) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("store_prices.csv"), REFERENCE).unwrap();
    fs::write(dir.path().join("updated_benchmark.csv"), BENCHMARK).unwrap();
    let paths = SessionPaths {
        benchmark: dir.path().join("updated_benchmark.csv"),
        reference: dir.path().join("store_prices.csv"),
        progress: dir.path().join("progress.json"),
    };
    (dir, paths)
}

fn open(paths: &SessionPaths) -> Session {
    Session::open(paths, MatchConfig::default()).unwrap()
}

fn saved_cursor(paths: &SessionPaths) -> CursorState {
    serde_json::from_str(&fs::read_to_string(&paths.progress).unwrap()).unwrap()
}

#[test]
fn reconcile_stop_and_resume() {
    let (_dir, paths) = create_workspace();

    // First sitting: confirm the milk row, then stop.
    {
        let mut session = open(&paths);
        let decision = session.decision().unwrap();
        assert_eq!(decision.row, 2);
        assert_eq!(decision.set.candidates[0].name, "Fresh Milk 1L Carrefour Brand");

        assert_eq!(
            session.confirm().unwrap(),
            Transition::Applied { row: 2, next: 3 }
        );
    }
    assert_eq!(saved_cursor(&paths), CursorState { row: 3 });

    let table = BenchmarkTable::load(&paths.benchmark).unwrap();
    let prices = table.price_columns(2);
    assert_eq!(prices.get(PriceColumn::Carrefour), Some(5.0));
    assert_eq!(prices.get(PriceColumn::WestZone), None);
    assert_eq!(prices.get(PriceColumn::Grandios), Some(4.5));
    assert_eq!(prices.get(PriceColumn::Rayyan), Some(4.8));

    // Second sitting: picks up at the eggs row and skips it.
    {
        let mut session = open(&paths);
        assert_eq!(session.status().resumed_from, 3);
        let decision = session.decision().unwrap();
        assert_eq!(decision.item_name, "Eggs 30pcs");
        assert_eq!(decision.set.candidates.len(), 1);

        assert_eq!(
            session.skip().unwrap(),
            Transition::Skipped { row: 3, next: 4 }
        );
        session.load().unwrap();

        // Rice has nothing in the catalog; the empty list is surfaced.
        let decision = session.decision().unwrap();
        assert_eq!(decision.row, 4);
        assert!(decision.set.is_empty());
        assert_eq!(session.confirm().unwrap(), Transition::Ignored);
    }
    assert_eq!(saved_cursor(&paths), CursorState { row: 4 });

    // Third sitting: skip rice, price the long life milk from its own WestZone price.
    let mut session = open(&paths);
    session.skip_row(4).unwrap();
    session.load().unwrap();
    let transition = session.confirm_selection(5, 0).unwrap();
    assert_eq!(transition, Transition::Applied { row: 5, next: 6 });
    session.load().unwrap();
    assert_eq!(session.phase(), &Phase::Done { row: 6 });

    let table = BenchmarkTable::load(&paths.benchmark).unwrap();
    assert!(table.is_priced(2));
    assert!(!table.is_priced(3));
    assert!(!table.is_priced(4));
    let prices = table.price_columns(5);
    assert_eq!(prices.get(PriceColumn::WestZone), Some(3.7));
    assert_eq!(prices.get(PriceColumn::Fresho), Some(3.9));

    let status = session.status();
    assert!(status.done);
    assert_eq!(status.priced_rows, 2);
    assert_eq!(status.benchmark_rows, 4);
    assert_eq!(status.reference_items, 3);
}

#[test]
fn untouched_cells_survive_rewrite() {
    let (_dir, paths) = create_workspace();
    let mut session = open(&paths);
    session.confirm().unwrap();

    let text = fs::read_to_string(&paths.benchmark).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Code,Item,Carrefour,WestZone/WMart,Grandios,Fresho,FreshRich,Rayyan"
    );
    assert_eq!(lines[1], "B1,Fresh Milk 1L,5,,4.5,,,4.8");
    assert_eq!(lines[2], "B2,Eggs 30pcs,,,,,,");
}

#[test]
fn candidates_render_as_jsonl() {
    let (_dir, paths) = create_workspace();
    let session = open(&paths);
    let set = session.candidates(2).unwrap();

    let output = JsonlWriter::new(2, &set.query)
        .limit(10)
        .render(&set.candidates, set.prefiltered, session.index().len())
        .unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), set.candidates.len() + 2);
    assert_eq!(lines[0]["Row"], 2);
    assert_eq!(lines[0]["Query"], "Fresh Milk 1L");
    assert_eq!(lines[1]["Rank"], 1);
    assert_eq!(lines[1]["Name"], "Fresh Milk 1L Carrefour Brand");
    assert_eq!(lines[1]["Words"][0]["Text"], "Fresh");
    assert_eq!(lines[1]["Words"][0]["Explained"], true);

    let footer = lines.last().unwrap();
    assert_eq!(footer["TotalCandidates"], set.candidates.len());
    assert_eq!(footer["Prefiltered"], 2);
    assert_eq!(footer["ReferenceItems"], 3);
}

#[test]
fn human_render_marks_selection() {
    let (_dir, paths) = create_workspace();
    let session = open(&paths);
    let decision = session.decision().unwrap();

    let text = render_candidates(&decision.set.candidates, Some(decision.selected), None);
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("> "));
    assert!(first.contains("[Fresh] [Milk] 1L Carrefour Brand"));
}

#[test]
fn index_loads_from_same_catalog() {
    let (_dir, paths) = create_workspace();
    let index = ReferenceIndex::load(&paths.reference).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.all_names()[2], "Brown Eggs 30pcs");
    assert!(index.duplicates().is_empty());
}
