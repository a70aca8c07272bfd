use crate::tokenizer::QueryTokens;
use tally_core::CandidateWord;

/// Mark which whitespace-separated words of `name` the query explains.
///
/// Each word is stripped of surrounding non-alphanumeric characters and
/// lowercased before lookup; the original text is kept for display.
pub fn annotate(query: &QueryTokens, name: &str) -> Vec<CandidateWord> {
    name.split_whitespace()
        .map(|word| {
            let cleaned = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            CandidateWord {
                text: word.to_string(),
                explained: !cleaned.is_empty() && query.explains(&cleaned),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    fn flags(words: &[CandidateWord]) -> Vec<bool> {
        words.iter().map(|w| w.explained).collect()
    }

    #[test]
    fn marks_shared_words() {
        let q = Tokenizer::tokenize("Fresh Milk 1L");
        let words = annotate(&q, "Fresh Milk 1L Carrefour Brand");
        assert_eq!(flags(&words), vec![true, true, false, false, false]);
        assert_eq!(words[2].text, "1L");
    }

    #[test]
    fn strips_surrounding_punctuation() {
        let q = Tokenizer::tokenize("Eggs 30");
        let words = annotate(&q, "(Eggs) 30, large");
        assert_eq!(flags(&words), vec![true, true, false]);
        assert_eq!(words[0].text, "(Eggs)");
    }

    #[test]
    fn bare_numbers_are_explained() {
        let q = Tokenizer::tokenize("Water 500ml");
        let words = annotate(&q, "Water 500 ml");
        assert_eq!(flags(&words), vec![true, true, true]);
    }

    #[test]
    fn punctuation_only_words_are_not_explained() {
        let q = Tokenizer::tokenize("milk");
        let words = annotate(&q, "milk - 1L");
        assert_eq!(flags(&words), vec![true, false, false]);
    }

    #[test]
    fn empty_name() {
        let q = Tokenizer::tokenize("milk");
        assert!(annotate(&q, "   ").is_empty());
    }
}
