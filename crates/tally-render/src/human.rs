use std::fmt::Write;
use tally_core::Candidate;

/// Message shown when a row has no candidates.
pub const NO_MATCH: &str = "No good match found";

/// Render candidates as numbered lines, explained words wrapped in `[..]`.
///
/// The selected candidate is marked with `>`, the advisory suggestion with `*`.
pub fn render_candidates(
    candidates: &[Candidate],
    selected: Option<usize>,
    suggested: Option<usize>,
) -> String {
    if candidates.is_empty() {
        return format!("{NO_MATCH}\n");
    }

    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let cursor = if selected == Some(i) { '>' } else { ' ' };
        let hint = if suggested == Some(i) { '*' } else { ' ' };
        let words: Vec<String> = candidate
            .words
            .iter()
            .map(|w| {
                if w.explained {
                    format!("[{}]", w.text)
                } else {
                    w.text.clone()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "{cursor}{hint}{:>2}. {}  (score {:.1})",
            i + 1,
            words.join(" "),
            candidate.score
        );
    }
    out
}
