use crate::tokenizer::QueryTokens;

/// Narrow `names` to those plausibly related to the query, keeping order.
///
/// A name passes when it contains every query number and at least one query
/// word, both as substrings of the lowercased name. A query with no words
/// passes nothing.
pub fn prefilter<'a>(query: &QueryTokens, names: &'a [String]) -> Vec<&'a str> {
    if query.words.is_empty() {
        return Vec::new();
    }

    names
        .iter()
        .filter(|name| passes(query, &name.to_lowercase()))
        .map(String::as_str)
        .collect()
}

fn passes(query: &QueryTokens, name_lower: &str) -> bool {
    query.numbers.iter().all(|n| name_lower.contains(n.as_str()))
        && query.words.iter().any(|w| name_lower.contains(w.as_str()))
}
