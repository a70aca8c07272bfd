use serde::Serialize;
use std::io::Write;
use tally_core::Candidate;

const FORMAT_VERSION: &str = "0.1";

/// Writes a benchmark row's candidates in JSONL format.
pub struct JsonlWriter {
    row: usize,
    query: String,
    limit: usize,
    min_score: f64,
    suggested: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Header {
    version: String,
    row: usize,
    query: String,
    limit: usize,
    min_score: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Word<'a> {
    text: &'a str,
    explained: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Entry<'a> {
    rank: usize,
    name: &'a str,
    score: f64,
    words: Vec<Word<'a>>,
    suggested: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Footer {
    total_candidates: usize,
    prefiltered: usize,
    reference_items: usize,
}

impl JsonlWriter {
    pub fn new(row: usize, query: &str) -> Self {
        Self {
            row,
            query: query.to_string(),
            limit: 0,
            min_score: 0.0,
            suggested: None,
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

    /// Flag the candidate at this index as the advisory suggestion.
    pub fn suggested(mut self, index: Option<usize>) -> Self {
        self.suggested = index;
        self
    }

    /// Render candidates as a JSONL string.
    pub fn render(
        &self,
        candidates: &[Candidate],
        prefiltered: usize,
        reference_items: usize,
    ) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, candidates, prefiltered, reference_items)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write JSONL output to a writer: header, one line per candidate, footer.
    pub fn write_to(
        &self,
        writer: &mut dyn Write,
        candidates: &[Candidate],
        prefiltered: usize,
        reference_items: usize,
    ) -> anyhow::Result<()> {
        let header = Header {
            version: FORMAT_VERSION.to_string(),
            row: self.row,
            query: self.query.clone(),
            limit: self.limit,
            min_score: self.min_score,
        };
        serde_json::to_writer(&mut *writer, &header)?;
        writeln!(writer)?;

        for (i, candidate) in candidates.iter().enumerate() {
            let entry = Entry {
                rank: i + 1,
                name: &candidate.name,
                score: candidate.score,
                words: candidate
                    .words
                    .iter()
                    .map(|w| Word {
                        text: &w.text,
                        explained: w.explained,
                    })
                    .collect(),
                suggested: self.suggested == Some(i),
            };
            serde_json::to_writer(&mut *writer, &entry)?;
            writeln!(writer)?;
        }

        let footer = Footer {
            total_candidates: candidates.len(),
            prefiltered,
            reference_items,
        };
        serde_json::to_writer(&mut *writer, &footer)?;
        writeln!(writer)?;

        Ok(())
    }
}
