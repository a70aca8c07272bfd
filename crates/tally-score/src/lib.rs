//! Candidate matching: tokenizing, prefiltering, fuzzy ranking, and highlighting.

mod finder;
mod fuzzy;
mod highlight;
mod prefilter;
mod tokenizer;

pub use finder::{CandidateFinder, CandidateSet};
pub use fuzzy::{DEFAULT_LIMIT, DEFAULT_MIN_SCORE, FuzzyRanker, Ranked, partial_token_sort_ratio};
pub use highlight::annotate;
pub use prefilter::prefilter;
pub use tokenizer::{QueryTokens, Tokenizer};
