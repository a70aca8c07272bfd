use crate::config::{MatchConfig, NoMatchPolicy};
use crate::progress::ProgressStore;
use crate::suggest::{CommandSuggester, Suggester, Suggestion};
use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;
use tally_core::{CursorState, TallyError, merge_prices};
use tally_index::ReferenceIndex;
use tally_score::{CandidateFinder, CandidateSet, FuzzyRanker};
use tally_table::BenchmarkTable;

/// Locations of the three files a session owns.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    pub benchmark: PathBuf,
    pub reference: PathBuf,
    pub progress: PathBuf,
}

/// A row waiting for the operator to pick a candidate or skip.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub row: usize,
    pub item_name: String,
    pub set: CandidateSet,
    /// Candidate used by [`Session::confirm`].
    pub selected: usize,
    pub suggestion: Option<Suggestion>,
}

/// Where the reconciliation cursor stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// About to read `row`; resolved by [`Session::load`].
    Loading(usize),
    AwaitingDecision(Decision),
    /// `row` has no item name; every row before it has been handled.
    Done { row: usize },
}

/// Result of an operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied { row: usize, next: usize },
    Skipped { row: usize, next: usize },
    /// The action did not apply to the current state; nothing changed.
    Ignored,
}

/// Summary counts for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub resumed_from: usize,
    pub current_row: usize,
    pub done: bool,
    pub benchmark_rows: usize,
    pub priced_rows: usize,
    pub reference_items: usize,
    pub duplicate_names: usize,
}

/// One operator's reconciliation run over a benchmark table.
///
/// Owns the reference index (read-only), the benchmark table (written only
/// when a match is applied), and the cursor file. Rows are handled one at a
/// time; prices are flushed before the cursor moves.
pub struct Session {
    index: ReferenceIndex,
    table: BenchmarkTable,
    progress: ProgressStore,
    config: MatchConfig,
    finder: CandidateFinder,
    suggester: Option<Box<dyn Suggester>>,
    resumed_from: CursorState,
    phase: Phase,
}

impl Session {
    /// Create a session positioned at the saved cursor. Call [`Session::load`]
    /// before acting on it.
    pub fn new(
        index: ReferenceIndex,
        table: BenchmarkTable,
        progress: ProgressStore,
        config: MatchConfig,
    ) -> Self {
        let resumed_from = progress.load();
        let finder = CandidateFinder::new(
            FuzzyRanker::new()
                .limit(config.limit)
                .min_score(config.min_score),
        );
        Self {
            index,
            table,
            progress,
            config,
            finder,
            suggester: None,
            resumed_from,
            phase: Phase::Loading(resumed_from.row),
        }
    }

    /// Open the files in `paths`, wire up any configured suggester, and load
    /// the first row awaiting a decision.
    pub fn open(paths: &SessionPaths, config: MatchConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let timeout = Duration::from_millis(config.suggest_timeout_ms);
        let suggester = config
            .suggest_command
            .as_deref()
            .map(|argv| CommandSuggester::new(argv).map(|s| s.timeout(timeout)))
            .transpose()?;

        let mut session = Self::read(paths, config)?;
        if let Some(suggester) = suggester {
            session = session.with_suggester(Box::new(suggester));
        }
        session.load().context("loading first row")?;
        Ok(session)
    }

    /// Open the files in `paths` for reading only.
    ///
    /// Rows without candidates are surfaced rather than auto-skipped and no
    /// suggester is run, so resolving the current row never writes the
    /// cursor file.
    pub fn inspect(paths: &SessionPaths, config: MatchConfig) -> anyhow::Result<Self> {
        let config = MatchConfig {
            no_match_policy: NoMatchPolicy::Surface,
            suggest_command: None,
            ..config
        };
        config.validate()?;
        let mut session = Self::read(paths, config)?;
        session.load().context("loading first row")?;
        Ok(session)
    }

    fn read(paths: &SessionPaths, config: MatchConfig) -> anyhow::Result<Self> {
        let index = ReferenceIndex::load(&paths.reference).with_context(|| {
            format!("loading reference catalog {}", paths.reference.display())
        })?;
        let table = BenchmarkTable::load(&paths.benchmark).with_context(|| {
            format!("loading benchmark table {}", paths.benchmark.display())
        })?;
        Ok(Self::new(index, table, ProgressStore::new(&paths.progress), config))
    }

    pub fn with_suggester(mut self, suggester: Box<dyn Suggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn decision(&self) -> Option<&Decision> {
        match &self.phase {
            Phase::AwaitingDecision(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn current_row(&self) -> usize {
        match &self.phase {
            Phase::Loading(row) | Phase::Done { row } => *row,
            Phase::AwaitingDecision(decision) => decision.row,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done { .. })
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn table(&self) -> &BenchmarkTable {
        &self.table
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Resolve `Loading` into the next row needing a decision, or `Done`.
    ///
    /// Rows that already carry a price are passed over without touching the
    /// cursor file. Under [`NoMatchPolicy::AutoSkip`] rows without candidates
    /// are skipped and the skip is persisted.
    pub fn load(&mut self) -> Result<&Phase, TallyError> {
        while let Phase::Loading(row) = self.phase {
            let Some(name) = self.table.item_name(row).map(str::to_string) else {
                tracing::info!(row, "no item name; reconciliation complete");
                self.phase = Phase::Done { row };
                break;
            };

            if self.table.is_priced(row) {
                tracing::debug!(row, item = %name, "row already priced");
                self.phase = Phase::Loading(row + 1);
                continue;
            }

            let set = self.finder.find(&name, self.index.all_names());
            if set.is_empty() && self.config.no_match_policy == NoMatchPolicy::AutoSkip {
                tracing::info!(row, item = %name, "no candidates; skipping");
                self.advance(row)?;
                continue;
            }

            let suggestion = self.consult(&set);
            let selected = match &suggestion {
                Some(Suggestion { index: Some(i), .. }) if self.config.adopt_suggestion => *i,
                _ => 0,
            };
            tracing::debug!(row, item = %name, candidates = set.candidates.len(), "awaiting decision");
            self.phase = Phase::AwaitingDecision(Decision {
                row,
                item_name: name,
                set,
                selected,
                suggestion,
            });
        }
        Ok(&self.phase)
    }

    /// Candidates for any row, without changing state.
    ///
    /// Returns `None` when the row has no item name. For the row awaiting a
    /// decision this is the list already on offer.
    pub fn candidates(&self, row: usize) -> Option<CandidateSet> {
        if let Some(decision) = self.decision().filter(|d| d.row == row) {
            return Some(decision.set.clone());
        }
        let name = self.table.item_name(row)?;
        Some(self.finder.find(name, self.index.all_names()))
    }

    /// Change the default selection. Out-of-range indices are ignored.
    pub fn choose(&mut self, index: usize) -> bool {
        match &mut self.phase {
            Phase::AwaitingDecision(decision) if index < decision.set.candidates.len() => {
                decision.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Apply the currently selected candidate.
    pub fn confirm(&mut self) -> Result<Transition, TallyError> {
        let Some(selected) = self.decision().map(|d| d.selected) else {
            return Ok(Transition::Ignored);
        };
        self.select(selected)
    }

    /// Copy the prices of candidate `index` into the current row, flush the
    /// table, then persist the cursor at the next row.
    ///
    /// An empty list or out-of-range index is ignored. On any write failure
    /// the session stays on the current row.
    pub fn select(&mut self, index: usize) -> Result<Transition, TallyError> {
        let Phase::AwaitingDecision(decision) = &self.phase else {
            return Ok(Transition::Ignored);
        };
        let row = decision.row;
        let Some(candidate) = decision.set.candidates.get(index) else {
            tracing::debug!(row, index, "selection out of range; ignored");
            return Ok(Transition::Ignored);
        };
        let Some(prices) = self.index.prices_for(&candidate.name) else {
            tracing::warn!(row, name = %candidate.name, "candidate missing from reference index");
            return Ok(Transition::Ignored);
        };

        let columns = merge_prices(prices);
        let name = candidate.name.clone();
        self.table.write_prices(row, &columns)?;
        tracing::info!(row, item = %decision.item_name, matched = %name, "prices applied");

        self.advance(row)?;
        Ok(Transition::Applied { row, next: row + 1 })
    }

    /// Leave the current row unpriced and persist the cursor at the next row.
    pub fn skip(&mut self) -> Result<Transition, TallyError> {
        let Some(decision) = self.decision() else {
            return Ok(Transition::Ignored);
        };
        let row = decision.row;
        self.advance(row)?;
        tracing::info!(row, "row skipped");
        Ok(Transition::Skipped { row, next: row + 1 })
    }

    /// [`Session::select`] guarded by the row the caller believes is current.
    pub fn confirm_selection(&mut self, row: usize, index: usize) -> Result<Transition, TallyError> {
        if !self.is_awaiting(row) {
            tracing::debug!(row, current = self.current_row(), "confirm for a row not awaiting a decision");
            return Ok(Transition::Ignored);
        }
        self.select(index)
    }

    /// [`Session::skip`] guarded by the row the caller believes is current.
    pub fn skip_row(&mut self, row: usize) -> Result<Transition, TallyError> {
        if !self.is_awaiting(row) {
            tracing::debug!(row, current = self.current_row(), "skip for a row not awaiting a decision");
            return Ok(Transition::Ignored);
        }
        self.skip()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            resumed_from: self.resumed_from.row,
            current_row: self.current_row(),
            done: self.is_done(),
            benchmark_rows: self.table.row_count(),
            priced_rows: self.table.rows().filter(|&r| self.table.is_priced(r)).count(),
            reference_items: self.index.len(),
            duplicate_names: self.index.duplicates().len(),
        }
    }

    fn is_awaiting(&self, row: usize) -> bool {
        self.decision().is_some_and(|d| d.row == row)
    }

    fn advance(&mut self, row: usize) -> Result<(), TallyError> {
        let next = CursorState::new(row).next();
        self.progress.save(next)?;
        self.phase = Phase::Loading(next.row);
        Ok(())
    }

    fn consult(&self, set: &CandidateSet) -> Option<Suggestion> {
        let suggester = self.suggester.as_ref()?;
        if set.is_empty() {
            return None;
        }

        let names = set.names();
        match suggester.suggest(&set.query, &names) {
            Ok(Some(text)) => {
                let suggestion = Suggestion::new(text, &names);
                if suggestion.index.is_none() {
                    tracing::info!(text = %suggestion.text, "suggestion matches no candidate");
                }
                Some(suggestion)
            }
            Ok(None) => {
                tracing::debug!(query = %set.query, "no suggestion");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "advisory suggestion failed");
                None
            }
        }
    }
}
