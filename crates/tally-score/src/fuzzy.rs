use strsim::normalized_levenshtein;

/// Default number of ranked candidates returned.
pub const DEFAULT_LIMIT: usize = 10;
/// Default minimum score; zero keeps everything the prefilter let through.
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

/// Partial, word-order-insensitive similarity in [0, 100].
///
/// Both strings have their whitespace-separated words sorted and rejoined.
/// The shorter result is then aligned against every same-length window of
/// the longer one (plus the shorter prefix/suffix windows at its edges), and
/// the best normalized Levenshtein similarity wins. Comparison is
/// case-sensitive.
pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn partial_ratio(a: &str, b: &str) -> f64 {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (short, long, short_len, long_len) = if a_len <= b_len {
        (a, b, a_len, b_len)
    } else {
        (b, a, b_len, a_len)
    };

    if short_len == 0 {
        return if long_len == 0 { 100.0 } else { 0.0 };
    }

    // Byte offset of every char boundary in `long`, so windows slice without allocating.
    let bounds: Vec<usize> = long
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(long.len()))
        .collect();
    let window = |start: usize, end: usize| &long[bounds[start]..bounds[end]];

    let mut best = 0.0_f64;
    let mut consider = |slice: &str| {
        best = best.max(normalized_levenshtein(short, slice));
        best >= 1.0
    };

    for end in 1..short_len {
        if consider(window(0, end)) {
            return 100.0;
        }
    }
    for start in 0..=long_len - short_len {
        if consider(window(start, start + short_len)) {
            return 100.0;
        }
    }
    for start in long_len - short_len + 1..long_len {
        if consider(window(start, long_len)) {
            return 100.0;
        }
    }

    (best * 100.0).clamp(0.0, 100.0)
}

/// A scored candidate with its position in the input list.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a> {
    pub name: &'a str,
    pub score: f64,
    pub position: usize,
}

/// Scores candidate names against a query and keeps the best `limit`.
pub struct FuzzyRanker {
    limit: usize,
    min_score: f64,
}

impl FuzzyRanker {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Rank `candidates` by descending score; ties keep input order.
    pub fn rank<'a>(&self, query: &str, candidates: &[&'a str]) -> Vec<Ranked<'a>> {
        let mut ranked: Vec<Ranked<'a>> = candidates
            .iter()
            .enumerate()
            .map(|(position, &name)| Ranked {
                name,
                score: partial_token_sort_ratio(query, name),
                position,
            })
            .filter(|r| r.score >= self.min_score)
            .collect();

        // Stable sort keeps earlier candidates first among equal scores.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.limit);
        ranked
    }
}

impl Default for FuzzyRanker {
    fn default() -> Self {
        Self::new()
    }
}
