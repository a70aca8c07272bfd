use crate::fuzzy::FuzzyRanker;
use crate::highlight::annotate;
use crate::prefilter::prefilter;
use crate::tokenizer::{QueryTokens, Tokenizer};
use tally_core::Candidate;

/// Candidates found for one benchmark item name.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub query: String,
    pub tokens: QueryTokens,
    /// How many reference names survived the prefilter.
    pub prefiltered: usize,
    pub candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// True when nothing matched ("no good match found").
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Tokenize -> prefilter -> rank -> highlight, over a reference name list.
pub struct CandidateFinder {
    ranker: FuzzyRanker,
}

impl CandidateFinder {
    pub fn new(ranker: FuzzyRanker) -> Self {
        Self { ranker }
    }

    pub fn find(&self, query: &str, names: &[String]) -> CandidateSet {
        let tokens = Tokenizer::tokenize(query);
        let filtered = prefilter(&tokens, names);
        let ranked = self.ranker.rank(query, &filtered);

        tracing::debug!(
            query,
            prefiltered = filtered.len(),
            ranked = ranked.len(),
            "candidates ranked"
        );

        let candidates = ranked
            .into_iter()
            .map(|r| Candidate {
                name: r.name.to_string(),
                score: r.score,
                words: annotate(&tokens, r.name),
            })
            .collect();

        CandidateSet {
            query: query.to_string(),
            prefiltered: filtered.len(),
            tokens,
            candidates,
        }
    }
}

impl Default for CandidateFinder {
    fn default() -> Self {
        Self::new(FuzzyRanker::default())
    }
}
