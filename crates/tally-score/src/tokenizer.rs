use std::collections::BTreeSet;

/// Word and number tokens extracted from an item name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTokens {
    /// Lowercased maximal runs of alphabetic characters.
    pub words: BTreeSet<String>,
    /// Maximal runs of decimal digits.
    pub numbers: BTreeSet<String>,
}

impl QueryTokens {
    /// Whether a cleaned word equals one of the query's words or numbers.
    pub fn explains(&self, token: &str) -> bool {
        self.words.contains(token) || self.numbers.contains(token)
    }
}

/// Item-name tokenizer. Never fails; unusual input yields empty sets.
pub struct Tokenizer;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Run {
    None,
    Word,
    Number,
}

impl Tokenizer {
    /// Split `input` into lowercase word tokens and numeric tokens.
    ///
    /// "Milk 2% 1L" -> words {"milk", "l"}, numbers {"1", "2"}.
    pub fn tokenize(input: &str) -> QueryTokens {
        let mut tokens = QueryTokens::default();
        let mut current = String::new();
        let mut run = Run::None;

        for c in input.chars() {
            let kind = if c.is_alphabetic() {
                Run::Word
            } else if c.is_ascii_digit() {
                Run::Number
            } else {
                Run::None
            };

            if kind != run {
                flush(&mut tokens, run, &mut current);
                run = kind;
            }
            match kind {
                Run::Word => current.extend(c.to_lowercase()),
                Run::Number => current.push(c),
                Run::None => {}
            }
        }
        flush(&mut tokens, run, &mut current);

        tokens
    }
}

fn flush(tokens: &mut QueryTokens, run: Run, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    match run {
        Run::Word => {
            tokens.words.insert(token);
        }
        Run::Number => {
            tokens.numbers.insert(token);
        }
        Run::None => {}
    }
}
